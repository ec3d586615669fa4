#![forbid(unsafe_code)]

//! Caller-supplied geometry and timing for the card/page transition.
//!
//! # Loading
//!
//! With the `transition-config` feature, a [`TransitionConfig`] can be read
//! from TOML or JSON. Missing keys keep their defaults.
//!
//! ```toml
//! crop = 0.35
//! header_height = 56.0
//! footer_height = 48.0
//! z_index = 20
//!
//! [timeout]
//! enter = 320
//! exit = 260
//!
//! [easing]
//! enter = "cubic-bezier(0.4, 0, 0.2, 1)"
//! exit = "ease-in"
//! ```
//!
//! ```rust,ignore
//! let config = TransitionConfig::from_toml_file("card-page.toml")?;
//! ```

#[cfg(feature = "transition-config")]
use std::path::Path;

#[cfg(feature = "transition-config")]
use serde::{Deserialize, Serialize};

use morph_core::easing::Easing;
use web_time::Duration;

use crate::Direction;

/// Per-direction transition duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "transition-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "transition-config", serde(default))]
pub struct PhaseTiming {
    /// Duration of the opening morph.
    #[cfg_attr(feature = "transition-config", serde(with = "millis"))]
    pub enter: Duration,
    /// Duration of the closing morph.
    #[cfg_attr(feature = "transition-config", serde(with = "millis"))]
    pub exit: Duration,
}

impl Default for PhaseTiming {
    fn default() -> Self {
        Self {
            enter: Duration::from_millis(300),
            exit: Duration::from_millis(250),
        }
    }
}

impl PhaseTiming {
    /// Same duration in both directions.
    pub const fn uniform(duration: Duration) -> Self {
        Self {
            enter: duration,
            exit: duration,
        }
    }

    /// Duration for a direction.
    pub const fn get(&self, direction: Direction) -> Duration {
        match direction {
            Direction::Open => self.enter,
            Direction::Close => self.exit,
        }
    }
}

/// Per-direction timing function.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "transition-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "transition-config", serde(default))]
pub struct PhaseEasing {
    pub enter: Easing,
    pub exit: Easing,
}

impl Default for PhaseEasing {
    fn default() -> Self {
        Self {
            enter: Easing::EaseOut,
            exit: Easing::EaseIn,
        }
    }
}

impl PhaseEasing {
    /// Easing for a direction.
    pub const fn get(&self, direction: Direction) -> Easing {
        match direction {
            Direction::Open => self.enter,
            Direction::Close => self.exit,
        }
    }
}

/// Configuration for [`CardPageTransition`](super::CardPageTransition).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "transition-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "transition-config", serde(default))]
pub struct TransitionConfig {
    /// Vertical crop fraction (0..=1) of the card's media preview.
    pub crop: Option<f64>,
    /// Height of the page's sticky header band.
    pub header_height: f64,
    /// Height of the page's sticky footer band.
    pub footer_height: f64,
    /// Height of the app bar the page slides under. `None` measures the
    /// offset header element instead.
    pub offset_header_height: Option<f64>,
    /// `max-width` applied to the wrapper.
    pub max_width: Option<f64>,
    /// `z-index` applied to the backdrop.
    pub z_index: Option<i32>,
    /// `background-color` applied to the backdrop.
    pub background_color: Option<String>,
    pub timeout: PhaseTiming,
    pub easing: PhaseEasing,
    /// Whether the user asked for reduced motion.
    pub reduced_motion: bool,
    /// Whether to honor `reduced_motion`.
    pub respect_reduced_motion: bool,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            crop: None,
            header_height: 0.0,
            footer_height: 0.0,
            offset_header_height: None,
            max_width: None,
            z_index: None,
            background_color: None,
            timeout: PhaseTiming::default(),
            easing: PhaseEasing::default(),
            reduced_motion: false,
            respect_reduced_motion: true,
        }
    }
}

impl TransitionConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the media crop fraction.
    #[must_use]
    pub fn crop(mut self, crop: f64) -> Self {
        self.crop = Some(crop.clamp(0.0, 1.0));
        self
    }

    /// Set the sticky header height.
    #[must_use]
    pub fn header_height(mut self, height: f64) -> Self {
        self.header_height = height;
        self
    }

    /// Set the sticky footer height.
    #[must_use]
    pub fn footer_height(mut self, height: f64) -> Self {
        self.footer_height = height;
        self
    }

    /// Fix the offset header height instead of measuring it.
    #[must_use]
    pub fn offset_header_height(mut self, height: f64) -> Self {
        self.offset_header_height = Some(height);
        self
    }

    /// Set the wrapper's maximum width.
    #[must_use]
    pub fn max_width(mut self, width: f64) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Set the backdrop stacking order.
    #[must_use]
    pub fn z_index(mut self, z: i32) -> Self {
        self.z_index = Some(z);
        self
    }

    /// Set the backdrop color.
    #[must_use]
    pub fn background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Set both durations.
    #[must_use]
    pub fn timeout(mut self, timing: PhaseTiming) -> Self {
        self.timeout = timing;
        self
    }

    /// Set both easing curves.
    #[must_use]
    pub fn easing(mut self, easing: PhaseEasing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the reduced-motion preference.
    #[must_use]
    pub fn reduced_motion(mut self, enabled: bool) -> Self {
        self.reduced_motion = enabled;
        self
    }

    /// Set whether to respect the reduced-motion preference.
    #[must_use]
    pub fn respect_reduced_motion(mut self, respect: bool) -> Self {
        self.respect_reduced_motion = respect;
        self
    }

    /// Effective duration for a direction, after reduced motion.
    pub fn duration(&self, direction: Direction) -> Duration {
        if self.reduced_motion && self.respect_reduced_motion {
            Duration::ZERO
        } else {
            self.timeout.get(direction)
        }
    }

    /// CSS `transition` value written on every surface for a play step.
    pub fn transition_css(&self, direction: Direction) -> String {
        let ms = self.duration(direction).as_millis();
        let easing = self.easing.get(direction);
        format!("transform {ms}ms {easing}, opacity {ms}ms {easing}")
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if let Some(crop) = self.crop
            && !(0.0..=1.0).contains(&crop)
        {
            errors.push(format!("crop must be in [0, 1], got {crop}"));
        }

        for (name, value) in [
            ("header_height", Some(self.header_height)),
            ("footer_height", Some(self.footer_height)),
            ("offset_header_height", self.offset_header_height),
            ("max_width", self.max_width),
        ] {
            if let Some(value) = value
                && !(value.is_finite() && value >= 0.0)
            {
                errors.push(format!("{name} must be finite and >= 0, got {value}"));
            }
        }

        if let Some(color) = &self.background_color
            && color.trim().is_empty()
        {
            errors.push("background_color must not be empty".into());
        }

        errors
    }

    /// Load from a TOML string.
    #[cfg(feature = "transition-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, TransitionConfigError> {
        let config: Self = toml::from_str(s).map_err(TransitionConfigError::Toml)?;
        config.checked()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "transition-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, TransitionConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(TransitionConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "transition-config")]
    pub fn from_json_str(s: &str) -> Result<Self, TransitionConfigError> {
        let config: Self = serde_json::from_str(s).map_err(TransitionConfigError::Json)?;
        config.checked()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "transition-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TransitionConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(TransitionConfigError::Io)?;
        Self::from_json_str(&content)
    }

    #[cfg(feature = "transition-config")]
    fn checked(self) -> Result<Self, TransitionConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(TransitionConfigError::Validation(errors))
        }
    }
}

/// Errors that can occur when loading a transition configuration.
#[derive(Debug)]
pub enum TransitionConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "transition-config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "transition-config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for TransitionConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "transition-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "transition-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for TransitionConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "transition-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "transition-config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(feature = "transition-config")]
mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use web_time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
