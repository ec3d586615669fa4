#![forbid(unsafe_code)]

//! Core: geometry, host events, and easing for the card/page morph engine.
//!
//! # Role in the workspace
//! `morph-core` holds the plain value types every other crate speaks:
//! rectangles in CSS pixels, element handles, the two host events the
//! engine consumes (`transitionend` and backdrop clicks), and the easing
//! curves that end up serialized into CSS `transition` strings.
//!
//! # How it fits in the system
//! `morph-backend` builds the host boundary on these types, `morph-runtime`
//! schedules work against them, and `morph-widgets` turns them into
//! transform strings. Nothing in this crate reads or writes a document.

pub mod easing;
pub mod element;
pub mod event;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
