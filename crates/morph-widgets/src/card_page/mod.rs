#![forbid(unsafe_code)]

//! Card → page shared-element transition.
//!
//! A card embedded in a scrolling list morphs into a full-bleed,
//! independently scrolling page overlay, and back, without either being
//! unmounted. The morph is driven by live geometry rather than a
//! declarative animation: the engine measures the card, primes the page
//! stack to look exactly like it with CSS transitions off, then turns
//! transitions on and lets the host animate to the identity transform.
//!
//! | module | role |
//! |--------|------|
//! | [`probe`] | side-effect-free geometry reads with safe fallbacks |
//! | [`snapshot`] | per-cycle measurements |
//! | [`transform`] | pure `(phase, snapshot) -> transform` builders |
//! | [`surface`] | the seven engine-owned layers and caller references |
//! | [`lifecycle`] | phases and listeners |
//! | [`config`] | geometry, timing, easing |
//! | [`engine`] | the phase state machine |

pub mod config;
pub mod engine;
pub mod lifecycle;
pub mod probe;
pub mod snapshot;
pub mod surface;
pub mod transform;

pub use config::{PhaseEasing, PhaseTiming, TransitionConfig, TransitionConfigError};
pub use engine::CardPageTransition;
pub use lifecycle::{LifecycleEvent, ListenerId, Phase};
pub use snapshot::GeometrySnapshot;
pub use surface::{ElementRefs, SurfaceKind, SurfaceSet, Surfaces};
