//! Blocking HTTP client for the project backend.

use std::time::Duration;

use log::{debug, info};
use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use seispick_core::PickPoint;

use crate::backend::{
    DataEnvelope, ProcessGridsRequest, ProcessedGrids, ProjectBackend, ProjectOptions,
};
use crate::error::{Error, Result};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/";

/// [`ProjectBackend`] over the REST API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBackend {
    /// Creates a client with a 60 second request timeout.
    ///
    /// # Errors
    /// Returns [`Error::Network`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            token: None,
        })
    }

    /// Sends `Authorization: Bearer <token>` with every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn send(&self, builder: RequestBuilder, url: &str) -> Result<Response> {
        let response = self.authorized(builder).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::Network(format!("{url} returned {status}: {body}")));
        }
        Ok(response)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("GET {url}");
        let response = self.send(self.client.get(&url), &url)?;
        Ok(response.json()?)
    }

    fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let url = self.url(path);
        debug!("POST {url}");
        self.send(self.client.post(&url).json(body), &url)?;
        Ok(())
    }
}

impl ProjectBackend for HttpBackend {
    fn get_options(&self, project_id: &str) -> Result<ProjectOptions> {
        let options: ProjectOptions = self.get_json(&format!("project/{project_id}/options"))?;
        info!(
            "loaded options for project {project_id}: {} records",
            options.records.len()
        );
        Ok(options)
    }

    fn save_options(&self, project_id: &str, options: &ProjectOptions) -> Result<()> {
        self.post_json(&format!("project/{project_id}/options"), options)
    }

    fn get_picks(&self, project_id: &str) -> Result<Vec<PickPoint>> {
        let points: Vec<PickPoint> = self.get_json(&format!("project/{project_id}/picks"))?;
        info!("loaded {} picks for project {project_id}", points.len());
        Ok(points)
    }

    fn save_picks(&self, project_id: &str, points: &[PickPoint]) -> Result<()> {
        self.post_json(&format!("project/{project_id}/picks"), points)
    }

    fn process_grids(&self, request: &ProcessGridsRequest) -> Result<ProcessedGrids> {
        let url = self.url("process/grids");
        let form = request
            .form_fields()
            .into_iter()
            .fold(multipart::Form::new(), |form, (name, value)| {
                form.text(name, value)
            });
        debug!("POST {url} for project {}", request.project_id);
        let response = self.send(self.client.post(&url).multipart(form), &url)?;
        let envelope: DataEnvelope<ProcessedGrids> = response.json()?;
        info!(
            "processed {} grids for project {}",
            envelope.data.grids.len(),
            request.project_id
        );
        Ok(envelope.data)
    }
}
