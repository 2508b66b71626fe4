//! seispick-session: Interactive state for the dispersion picking plot.
//!
//! [`PlotSession`] ties together the pick set, pointer state machine, view
//! transform, record composition and the project backend. Backend calls run
//! on worker threads and report back through a channel that the session
//! drains with [`PlotSession::poll`].
//!

pub mod config;
pub mod error;
pub mod interaction;
pub mod message;
pub mod notification;
pub mod session;
pub mod worker;

pub use config::SessionConfig;
pub use error::{Error, Result};
pub use interaction::{hit_test, InteractionState, PickInteraction, PointerInput, PointerOutcome};
pub use message::SessionMessage;
pub use notification::{Notification, NotificationKind, Notifications};
pub use session::{PlotSession, UploadDecision, UploadOutcome};
pub use worker::{run_request, spawn_request, BackendRequest};
