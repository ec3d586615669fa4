#![forbid(unsafe_code)]

//! Host events consumed by the transition engines.
//!
//! The host translates its native events (DOM `transitionend`, `click`)
//! into these values and pushes them into the engine. Only the fields the
//! engine actually reads are carried.

use bitflags::bitflags;

use crate::element::{ElementId, StyleProperty};

/// A CSS transition finished on an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionEnd {
    /// Element whose transition finished (`event.target`).
    pub target: ElementId,
    /// Property that finished transitioning (`event.propertyName`).
    pub property: StyleProperty,
}

impl TransitionEnd {
    /// Create a new transition-end event.
    pub const fn new(target: ElementId, property: StyleProperty) -> Self {
        Self { target, property }
    }
}

/// Pointer button that produced a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Auxiliary,
    Secondary,
}

bitflags! {
    /// Modifier keys held during a pointer event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const META  = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A click on the backdrop layer, forwarded verbatim to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackdropClick {
    /// Viewport x of the pointer.
    pub x: f64,
    /// Viewport y of the pointer.
    pub y: f64,
    pub button: PointerButton,
    pub modifiers: Modifiers,
}

impl BackdropClick {
    /// Primary-button click with no modifiers.
    pub const fn primary(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        }
    }

    /// Set modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
