#![forbid(unsafe_code)]

//! Test harness for the morph engines.
//!
//! Everything here is deterministic: the [`HeadlessDocument`] has no
//! layout engine (rectangles are whatever the test mounts), the
//! [`DeterministicClock`] only moves when told to, and the [`FramePump`]
//! plays the part of the browser's frame loop and `transitionend`
//! dispatch.
//!
//! ```rust,ignore
//! let mut fx = CardFixture::new();
//! let mut page = fx.page(TransitionConfig::default());
//! let rec = LifecycleRecorder::attach(&mut page);
//! let mut pump = FramePump::new();
//! page.set_open_now(&mut fx.doc, true);
//! pump.run_until_settled(&mut fx.doc, &mut page, 10);
//! assert_eq!(rec.phases(), [Phase::Enter, Phase::Entering, Phase::Entered]);
//! ```

pub mod clock;
pub mod document;
pub mod fixture;
pub mod pump;
pub mod recorder;

pub use clock::DeterministicClock;
pub use document::{HeadlessDocument, StyleWrite};
pub use fixture::{CardFixture, CollapsibleFixture};
pub use pump::{Animated, FramePump};
pub use recorder::LifecycleRecorder;
