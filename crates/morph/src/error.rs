#![forbid(unsafe_code)]

//! Facade error type.
//!
//! The engines themselves never fail: missing elements and bad geometry
//! degrade to neutral transforms. What can fail is everything that turns
//! text into values before an engine is built, so that is all this enum
//! covers.

use std::fmt;

use morph_core::easing::ParseEasingError;
use morph_core::element::UnknownProperty;
use morph_widgets::card_page::{TransitionConfig, TransitionConfigError};

/// Anything the facade can report.
#[derive(Debug)]
pub enum Error {
    /// Reading, parsing or validating a [`TransitionConfig`].
    Config(TransitionConfigError),
    /// A CSS easing string was not recognised.
    Easing(ParseEasingError),
    /// A CSS property name outside the set the engine writes.
    Property(UnknownProperty),
}

/// Facade result alias.
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Easing(e) => write!(f, "easing: {e}"),
            Self::Property(e) => write!(f, "property: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Easing(e) => Some(e),
            Self::Property(e) => Some(e),
        }
    }
}

impl From<TransitionConfigError> for Error {
    fn from(e: TransitionConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ParseEasingError> for Error {
    fn from(e: ParseEasingError) -> Self {
        Self::Easing(e)
    }
}

impl From<UnknownProperty> for Error {
    fn from(e: UnknownProperty) -> Self {
        Self::Property(e)
    }
}

/// Return `config` if it validates, or every problem at once.
pub fn validated(config: TransitionConfig) -> Result<TransitionConfig> {
    let errors = config.validate();
    if errors.is_empty() {
        Ok(config)
    } else {
        Err(TransitionConfigError::Validation(errors).into())
    }
}
