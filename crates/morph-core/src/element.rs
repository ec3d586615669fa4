#![forbid(unsafe_code)]

//! Element handles and the inline style properties the engine writes.

use std::fmt;
use std::str::FromStr;

/// Opaque, non-owning handle to a host element.
///
/// The host decides what the number means (a slot in a node arena, a
/// `data-` attribute, an index into a JS `Map`). The engine only compares
/// handles and passes them back through [`morph_backend::Document`].
///
/// [`morph_backend::Document`]: https://docs.rs/morph-backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl ElementId {
    /// Wrap a raw host id.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw host id.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Inline style properties touched during a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleProperty {
    Transform,
    Transition,
    Opacity,
    Display,
    Height,
    Visibility,
    ZIndex,
    MaxWidth,
    BackgroundColor,
    Overflow,
}

impl StyleProperty {
    /// Every property, in declaration order.
    pub const ALL: [StyleProperty; 10] = [
        Self::Transform,
        Self::Transition,
        Self::Opacity,
        Self::Display,
        Self::Height,
        Self::Visibility,
        Self::ZIndex,
        Self::MaxWidth,
        Self::BackgroundColor,
        Self::Overflow,
    ];

    /// The CSS property name (as reported by `TransitionEvent.propertyName`).
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Transform => "transform",
            Self::Transition => "transition",
            Self::Opacity => "opacity",
            Self::Display => "display",
            Self::Height => "height",
            Self::Visibility => "visibility",
            Self::ZIndex => "z-index",
            Self::MaxWidth => "max-width",
            Self::BackgroundColor => "background-color",
            Self::Overflow => "overflow",
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// Error returned when a CSS property name is not one the engine tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProperty(pub String);

impl fmt::Display for UnknownProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown style property: {}", self.0)
    }
}

impl std::error::Error for UnknownProperty {}

impl FromStr for StyleProperty {
    type Err = UnknownProperty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|prop| prop.css_name() == s)
            .ok_or_else(|| UnknownProperty(s.to_owned()))
    }
}
