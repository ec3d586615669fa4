#![forbid(unsafe_code)]

//! Card-to-page shared-element transitions.
//!
//! This crate is the public face of the `morph-*` workspace. It re-exports
//! the pieces an embedding needs and offers a [`prelude`] for the common
//! case: build a [`CardPageTransition`] over a set of [`Surfaces`], call
//! `set_open` from UI code, and drive it from the host frame loop.
//!
//! ```rust,ignore
//! use morph::prelude::*;
//!
//! let config = morph::validated(TransitionConfig::new().crop(0.5))?;
//! let mut page = CardPageTransition::new(surfaces, refs, config);
//! page.set_open(true);
//! // once per animation frame:
//! page.on_animation_frame(&mut doc, clock.now_mono());
//! // for every `transitionend` the host sees:
//! page.on_transition_end(&mut doc, event);
//! ```
//!
//! # Crates
//!
//! | Crate | Role |
//! |-------|------|
//! | [`core`] | Geometry, element handles, host events, easing |
//! | [`backend`] | The [`Document`] and [`FrameClock`] host traits |
//! | [`runtime`] | Epoch cancellation, frame queue, transition tracking |
//! | [`widgets`] | The card/page engine and collapsible sections |

pub mod error;

pub use error::{Error, Result, validated};

pub use morph_backend::{Document, FrameClock};
pub use morph_core::easing::Easing;
pub use morph_core::element::{ElementId, StyleProperty};
pub use morph_core::event::{BackdropClick, Modifiers, PointerButton, TransitionEnd};
pub use morph_core::geometry::Rect;
pub use morph_widgets::Direction;
pub use morph_widgets::card_page::{
    CardPageTransition, ElementRefs, GeometrySnapshot, LifecycleEvent, ListenerId, Phase,
    PhaseEasing, PhaseTiming, SurfaceKind, Surfaces, TransitionConfig, TransitionConfigError,
};
pub use morph_widgets::collapsible::{Collapsible, CollapsibleConfig, CollapsibleState};

/// Common imports for embedding the engines.
pub mod prelude {
    pub use crate::{
        BackdropClick, CardPageTransition, Collapsible, CollapsibleConfig, CollapsibleState,
        Document, ElementId, ElementRefs, Error, FrameClock, LifecycleEvent, Phase, Rect, Result,
        Surfaces, TransitionConfig, TransitionEnd,
    };

    pub use crate::{backend, core, runtime, widgets};
}

pub use morph_backend as backend;
pub use morph_core as core;
pub use morph_runtime as runtime;
pub use morph_widgets as widgets;
