//! Colour ramps and the built-in colour map presets.
//!
//! A ramp is an ordered list of stops written as `rgb(r,g,b, position)`
//! strings, with positions in `[0, 1]`. Sampling interpolates linearly
//! between the two stops that bracket the value and clamps to the end stops
//! outside the ramp.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::util::f64_to_u8;

static COLOR_STOP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*rgb\(\s*(\d+\.?\d*)\s*,\s*(\d+\.?\d*)\s*,\s*(\d+\.?\d*)\s*,\s*([\d.]+)\s*\)\s*$")
        .expect("color stop pattern is valid")
});

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise linear interpolation, rounded.
    #[must_use]
    pub fn lerp(self, other: Rgb, ratio: f64) -> Rgb {
        let mix = |a: u8, b: u8| f64_to_u8(f64::from(a) + (f64::from(b) - f64::from(a)) * ratio);
        Rgb::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }

    /// RGBA bytes with full opacity.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// One colour transition of a ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub color: Rgb,
    pub position: f64,
}

impl FromStr for ColorStop {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidColorStop(s.to_string());
        let caps = COLOR_STOP.captures(s).ok_or_else(invalid)?;
        let mut values = [0.0f64; 4];
        for (i, value) in values.iter_mut().enumerate() {
            *value = caps[i + 1].parse().map_err(|_| invalid())?;
        }
        let [r, g, b, position] = values;
        Ok(ColorStop {
            color: Rgb::new(f64_to_u8(r), f64_to_u8(g), f64_to_u8(b)),
            position,
        })
    }
}

impl fmt::Display for ColorStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgb({},{},{}, {})",
            self.color.r, self.color.g, self.color.b, self.position
        )
    }
}

/// A finite ordered list of colour stops.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    stops: Vec<ColorStop>,
}

impl ColorRamp {
    /// Builds a ramp, ordering the stops by position.
    ///
    /// The sort is stable, so stops sharing a position keep their order.
    ///
    /// # Errors
    /// Returns [`Error::EmptyRamp`] when `stops` is empty.
    pub fn new(name: &str, mut stops: Vec<ColorStop>) -> Result<Self> {
        if stops.is_empty() {
            return Err(Error::EmptyRamp(name.to_string()));
        }
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        Ok(Self { stops })
    }

    /// Parses a ramp from `rgb(r,g,b, position)` strings.
    ///
    /// # Errors
    /// Returns [`Error::InvalidColorStop`] for the first malformed entry, or
    /// [`Error::EmptyRamp`] when the list is empty.
    pub fn parse<S: AsRef<str>>(name: &str, stops: &[S]) -> Result<Self> {
        let stops = stops
            .iter()
            .map(|s| s.as_ref().parse())
            .collect::<Result<Vec<ColorStop>>>()?;
        Self::new(name, stops)
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// The stops in their string form.
    pub fn to_strings(&self) -> Vec<String> {
        self.stops.iter().map(ToString::to_string).collect()
    }

    /// Colour for a normalised value.
    pub fn sample(&self, value: f64) -> Rgb {
        for pair in self.stops.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            if value >= start.position && value <= end.position {
                let width = end.position - start.position;
                if width <= 0.0 {
                    return start.color;
                }
                return start.color.lerp(end.color, (value - start.position) / width);
            }
        }
        // Non-empty by construction.
        let first = self.stops[0];
        let last = self.stops[self.stops.len() - 1];
        if value <= first.position {
            first.color
        } else {
            last.color
        }
    }

    /// RGBA bytes for a normalised value.
    pub fn apply(&self, value: f64) -> [u8; 4] {
        self.sample(value).to_rgba()
    }
}

/// Built-in colour maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Colormap {
    /// White through blues and greens to dark red.
    VsSurf1,
    /// Diverging blue to red.
    #[default]
    VsSurf2,
    RdYlBu,
    Spectral,
    PuOr,
    RdGy,
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Colormap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Colormap::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| Error::UnknownColormap(s.to_string()))
    }
}

impl Colormap {
    pub const ALL: [Colormap; 6] = [
        Colormap::VsSurf1,
        Colormap::VsSurf2,
        Colormap::RdYlBu,
        Colormap::Spectral,
        Colormap::PuOr,
        Colormap::RdGy,
    ];

    /// Registry name.
    pub fn name(self) -> &'static str {
        match self {
            Colormap::VsSurf1 => "VsSurf-1",
            Colormap::VsSurf2 => "VsSurf-2",
            Colormap::RdYlBu => "RdYlBu",
            Colormap::Spectral => "Spectral",
            Colormap::PuOr => "PuOr",
            Colormap::RdGy => "RdGy",
        }
    }

    /// Stop strings of the preset.
    pub fn stops(self) -> &'static [&'static str] {
        match self {
            Colormap::VsSurf1 => &[
                "rgb(255,255,255, 0.0)",
                "rgb(123,122,230, 0.0784313725)",
                "rgb(102,45,248, 0.137254908)",
                "rgb(99,151,255, 0.1960784314)",
                "rgb(7,90,255, 0.2549019608)",
                "rgb(0,247,255, 0.3921568627)",
                "rgb(10,245,88, 0.5098039216)",
                "rgb(76,204,90, 0.5882352941)",
                "rgb(154,208,48, 0.6470588235)",
                "rgb(168,250,5, 0.7058823529)",
                "rgb(254,247,0, 0.7843137255)",
                "rgb(255,156,0, 0.8431372549)",
                "rgb(255,105,0, 0.9215686275)",
                "rgb(255,0,0, 0.9960784314)",
                "rgb(165,0,38, 1.0)",
            ],
            Colormap::VsSurf2 => &[
                "rgb(49,54,149, 0.0)",
                "rgb(69,117,180, 0.0039215686)",
                "rgb(116,173,209, 0.1254901961)",
                "rgb(171,217,233, 0.2509803922)",
                "rgb(224,243,248, 0.3764705882)",
                "rgb(255,255,191, 0.5019607843)",
                "rgb(254,224,144, 0.6274509804)",
                "rgb(253,174,97, 0.7490196078)",
                "rgb(244,109,67, 0.8745098039)",
                "rgb(215,48,39, 0.99960784314)",
                "rgb(165,0,38, 1.0)",
            ],
            Colormap::RdYlBu => &[
                "rgb(165,0,38, 0.0)",
                "rgb(215,48,39, 0.2)",
                "rgb(253,174,97, 0.5)",
                "rgb(224,243,248, 0.8)",
                "rgb(171,217,233, 0.9)",
                "rgb(49,54,149, 1.0)",
            ],
            Colormap::Spectral => &[
                "rgb(158,1,66, 0.0)",
                "rgb(213,62,79, 0.1)",
                "rgb(244,109,67,0.2)",
                "rgb(253,174,97,0.3)",
                "rgb(254,224,139,0.4)",
                "rgb(255,255,191, 0.5)",
                "rgb(230,245,152, 0.6)",
                "rgb(171,221,164, 0.7)",
                "rgb(102,194,165, 0.8)",
                "rgb(50,136,189, 0.9)",
                "rgb(94,79,162, 1.0)",
            ],
            Colormap::PuOr => &[
                "rgb(127,59,8, 0.0)",
                "rgb(179,88,6, 0.1)",
                "rgb(224,130,20, 0.2)",
                "rgb(253,184,99, 0.3)",
                "rgb(254,224,182, 0.4)",
                "rgb(247,247,247, 0.5)",
                "rgb(216,218,235, 0.6)",
                "rgb(178,171,210, 0.7)",
                "rgb(128,115,172, 0.8)",
                "rgb(84,39,136, 0.9)",
                "rgb(45,0,75, 1.0)",
            ],
            Colormap::RdGy => &[
                "rgb(103,0,31, 0.0)",
                "rgb(178,24,43, 0.1)",
                "rgb(214,96,77, 0.2)",
                "rgb(244,165,130, 0.3)",
                "rgb(253,219,199, 0.4)",
                "rgb(255,255,255, 0.5)",
                "rgb(224,224,224, 0.6)",
                "rgb(186,186,186, 0.7)",
                "rgb(135,135,135, 0.8)",
                "rgb(77,77,77, 0.9)",
                "rgb(26,26,26, 1.0)",
            ],
        }
    }

    /// The preset as a ramp.
    ///
    /// # Errors
    /// Only fails if a preset stop string is malformed.
    pub fn ramp(self) -> Result<ColorRamp> {
        ColorRamp::parse(self.name(), self.stops())
    }
}

/// Named colour ramps: the presets plus any user-defined ones.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMaps {
    ramps: BTreeMap<String, ColorRamp>,
}

impl ColorMaps {
    /// A registry with every preset.
    ///
    /// # Errors
    /// Fails only if a preset cannot be parsed.
    pub fn with_presets() -> Result<Self> {
        let ramps = Colormap::ALL
            .into_iter()
            .map(|c| Ok((c.name().to_string(), c.ramp()?)))
            .collect::<Result<BTreeMap<_, _>>>()?;
        Ok(Self { ramps })
    }

    /// Looks up a ramp by name.
    ///
    /// # Errors
    /// Returns [`Error::UnknownColormap`] when nothing is registered under `name`.
    pub fn get(&self, name: &str) -> Result<&ColorRamp> {
        self.ramps
            .get(name)
            .ok_or_else(|| Error::UnknownColormap(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ramps.contains_key(name)
    }

    /// Registers or replaces a ramp.
    pub fn insert(&mut self, name: impl Into<String>, ramp: ColorRamp) {
        self.ramps.insert(name.into(), ramp);
    }

    /// Parses and registers a ramp from stop strings.
    ///
    /// # Errors
    /// Propagates stop parsing errors; the registry is left unchanged.
    pub fn insert_stops<S: AsRef<str>>(&mut self, name: &str, stops: &[S]) -> Result<()> {
        let ramp = ColorRamp::parse(name, stops)?;
        self.insert(name, ramp);
        Ok(())
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ramps.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ramps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ramps.is_empty()
    }
}
