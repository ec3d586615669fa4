#![forbid(unsafe_code)]

//! Cooperative, frame-synchronized scheduling primitives.
//!
//! # Role in the workspace
//! Transition drivers in `morph-widgets` are resumable step machines. This
//! crate provides the three pieces they are scheduled with:
//!
//! - [`EpochSource`] / [`EpochToken`]: the "still the active driver?" guard.
//! - [`FrameQueue`]: `requestAnimationFrame` / `cancelAnimationFrame`
//!   semantics over host-driven frames.
//! - [`TransitionTracker`]: the "all transitions on these targets settled"
//!   waiter, with a deadline for hosts that never report completion.
//!
//! Everything here is single-threaded. Nothing spawns, sleeps, or reads a
//! clock; the host supplies timestamps.

pub mod epoch;
pub mod frame;
pub mod transition_tracker;

pub use epoch::{Epoch, EpochSource, EpochToken};
pub use frame::{Frame, FrameHandle, FrameQueue};
pub use transition_tracker::{TrackerStatus, TransitionTracker};
