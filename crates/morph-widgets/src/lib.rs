#![forbid(unsafe_code)]

//! Transition widgets built on the morph runtime.
//!
//! - [`card_page`]: morphs a card embedded in a scrolling list into a
//!   full-bleed page overlay and back, without unmounting either.
//! - [`collapsible`]: a persistent section that animates its height
//!   between collapsed and expanded.
//!
//! Both are host-driven: the embedding calls `on_animation_frame` from its
//! frame loop and forwards `transitionend` events; everything else is
//! plain method calls on the widget state.

pub mod card_page;
pub mod collapsible;

/// Direction of a transition driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward the open / expanded state.
    Open,
    /// Toward the closed / collapsed state.
    Close,
}

impl Direction {
    /// `Open` for `true`, `Close` for `false`.
    #[inline]
    pub const fn from_open(open: bool) -> Self {
        if open { Self::Open } else { Self::Close }
    }

    /// The opposite direction.
    #[inline]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Open => Self::Close,
            Self::Close => Self::Open,
        }
    }
}
