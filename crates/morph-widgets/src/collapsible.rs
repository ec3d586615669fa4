#![forbid(unsafe_code)]

//! Persistent collapsible section.
//!
//! Unlike the card/page morph, a [`Collapsible`] never leaves the flow: it
//! animates one element's `height` between `0px` and its content height.
//! It uses the same prime-then-play pattern. The synchronous step pins the
//! current rendered height with transitions off, and the next frame turns
//! the transition on and writes the target height.
//!
//! # State Machine
//!
//! ```text
//!              expand                      settle
//! Collapsed ──────────▶ Expanding ─────────────────▶ Expanded
//!     ▲                   │   ▲                         │
//!     │ settle   collapse │   │ expand                  │ collapse
//!     │                   ▼   │                         │
//!     └─────────────── Collapsing ◀────────────────────-┘
//! ```
//!
//! At rest an expanded section has no inline height (`auto`), so content
//! changes reflow naturally; a collapsed one is `height: 0px` with
//! `overflow: hidden`.
//!
//! # Invariants
//!
//! 1. Reversal mid-flight starts from the live rendered height.
//! 2. A superseded play step never writes.
//! 3. Each `on_*` call reports a state only when it changed.

use morph_backend::Document;
use morph_core::element::{ElementId, StyleProperty};
use morph_core::event::TransitionEnd;
use morph_core::{debug, trace, warn};
use morph_runtime::{
    EpochSource, EpochToken, FrameHandle, FrameQueue, TrackerStatus, TransitionTracker,
};
use web_time::Duration;

use crate::Direction;
use crate::card_page::config::{PhaseEasing, PhaseTiming};

/// Where a [`Collapsible`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollapsibleState {
    #[default]
    Collapsed,
    Expanding,
    Expanded,
    Collapsing,
}

impl CollapsibleState {
    /// Whether the section is, or is heading, open.
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Expanding | Self::Expanded)
    }

    /// Whether a height transition is running.
    pub const fn is_animating(self) -> bool {
        matches!(self, Self::Expanding | Self::Collapsing)
    }

    const fn resting(direction: Direction) -> Self {
        match direction {
            Direction::Open => Self::Expanded,
            Direction::Close => Self::Collapsed,
        }
    }
}

/// Timing for a [`Collapsible`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollapsibleConfig {
    pub timing: PhaseTiming,
    pub easing: PhaseEasing,
    /// Skip the tween; state changes still pass through the animating
    /// states for one frame.
    pub reduced_motion: bool,
}

impl CollapsibleConfig {
    /// Default timing.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn timing(mut self, timing: PhaseTiming) -> Self {
        self.timing = timing;
        self
    }

    #[must_use]
    pub fn easing(mut self, easing: PhaseEasing) -> Self {
        self.easing = easing;
        self
    }

    #[must_use]
    pub fn reduced_motion(mut self, enabled: bool) -> Self {
        self.reduced_motion = enabled;
        self
    }

    /// Effective duration for a direction.
    pub fn duration(&self, direction: Direction) -> Duration {
        if self.reduced_motion {
            Duration::ZERO
        } else {
            self.timing.get(direction)
        }
    }

    /// CSS `transition` value for the play step.
    pub fn transition_css(&self, direction: Direction) -> String {
        format!(
            "height {}ms {}",
            self.duration(direction).as_millis(),
            self.easing.get(direction)
        )
    }
}

#[derive(Debug)]
struct Play {
    token: EpochToken,
    direction: Direction,
}

/// A section that animates its height open and closed.
#[derive(Debug)]
pub struct Collapsible {
    root: ElementId,
    content: Option<ElementId>,
    config: CollapsibleConfig,
    state: CollapsibleState,
    desired: bool,
    committed: bool,
    awaiting: bool,
    epochs: EpochSource,
    frames: FrameQueue<Play>,
    pending_frame: Option<FrameHandle>,
    tracker: TransitionTracker,
}

impl Collapsible {
    /// Create a section over `root`, whose open height is read from
    /// `content`.
    ///
    /// Call [`initialize`](Self::initialize) once the element is mounted to
    /// write the resting style.
    pub fn new(
        root: ElementId,
        content: Option<ElementId>,
        config: CollapsibleConfig,
        expanded: bool,
    ) -> Self {
        let state = if expanded {
            CollapsibleState::Expanded
        } else {
            CollapsibleState::Collapsed
        };
        Self {
            root,
            content,
            config,
            state,
            desired: expanded,
            committed: expanded,
            awaiting: false,
            epochs: EpochSource::new(),
            frames: FrameQueue::new(),
            pending_frame: None,
            tracker: TransitionTracker::new(),
        }
    }

    pub fn state(&self) -> CollapsibleState {
        self.state
    }

    /// The desired state, committed or not.
    pub fn is_expanded(&self) -> bool {
        self.desired
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn config(&self) -> &CollapsibleConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: CollapsibleConfig) {
        self.config = config;
    }

    /// Whether the host should keep delivering frames.
    pub fn wants_frame(&self) -> bool {
        !self.frames.is_empty() || self.awaiting || self.desired != self.committed
    }

    /// Write the resting style for the current state.
    pub fn initialize<D: Document + ?Sized>(&self, doc: &mut D) {
        if self.state.is_open() {
            self.rest_expanded(doc);
        } else {
            self.rest_collapsed(doc);
        }
    }

    /// Record the desired state. Takes effect on the next commit.
    pub fn set_expanded(&mut self, expanded: bool) {
        self.desired = expanded;
    }

    /// Toggle the desired state.
    pub fn toggle(&mut self) {
        self.desired = !self.desired;
    }

    /// Start a height transition if the desired state changed.
    pub fn commit<D: Document + ?Sized>(&mut self, doc: &mut D) -> Option<CollapsibleState> {
        if self.desired == self.committed {
            return None;
        }
        self.committed = self.desired;
        self.start(doc, Direction::from_open(self.desired));
        Some(self.state)
    }

    /// [`set_expanded`](Self::set_expanded) followed by [`commit`](Self::commit).
    pub fn set_expanded_now<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        expanded: bool,
    ) -> Option<CollapsibleState> {
        self.set_expanded(expanded);
        self.commit(doc)
    }

    /// Run this frame's play step and the deadline check.
    pub fn on_animation_frame<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        now: Duration,
    ) -> Option<CollapsibleState> {
        let before = self.state;
        let frame = self.frames.begin_frame(now);
        self.pending_frame = None;
        self.commit(doc);
        for (_, play) in frame.tasks {
            if play.token.is_stale() {
                trace!(epoch = %play.token.epoch(), "stale collapsible play step");
                continue;
            }
            self.play(doc, play.direction, now);
        }
        if self.awaiting && self.tracker.is_overdue(now) {
            warn!(state = ?self.state, "collapsible transitionend missing, settling on deadline");
            self.settle(doc);
        }
        (self.state != before).then_some(self.state)
    }

    /// Deliver a `transitionend` from the host.
    pub fn on_transition_end<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        event: TransitionEnd,
    ) -> Option<CollapsibleState> {
        if !self.awaiting || self.tracker.end(&event) != TrackerStatus::Settled {
            return None;
        }
        self.settle(doc);
        Some(self.state)
    }

    fn start<D: Document + ?Sized>(&mut self, doc: &mut D, direction: Direction) {
        if let Some(handle) = self.pending_frame.take() {
            self.frames.cancel(handle);
        }
        self.tracker.clear();
        self.awaiting = false;

        let live = match (direction, self.state) {
            (Direction::Open, CollapsibleState::Collapsed) => 0.0,
            _ => self.live_height(doc),
        };
        doc.set_style(self.root, StyleProperty::Transition, Some("none"));
        doc.set_style(self.root, StyleProperty::Height, Some(px(live).as_str()));
        doc.set_style(self.root, StyleProperty::Overflow, Some("hidden"));

        self.state = match direction {
            Direction::Open => CollapsibleState::Expanding,
            Direction::Close => CollapsibleState::Collapsing,
        };
        let token = self.epochs.advance();
        debug!(state = ?self.state, from = live, "collapsible start");
        self.pending_frame = Some(self.frames.request(Play { token, direction }));
    }

    fn play<D: Document + ?Sized>(&mut self, doc: &mut D, direction: Direction, now: Duration) {
        let target = match direction {
            Direction::Open => self.content_height(doc),
            Direction::Close => 0.0,
        };
        let duration = self.config.duration(direction);
        let unchanged = (self.live_height(doc) - target).abs() < 0.5;
        let css = self.config.transition_css(direction);
        doc.set_style(self.root, StyleProperty::Transition, Some(css.as_str()));
        doc.set_style(self.root, StyleProperty::Height, Some(px(target).as_str()));
        if duration.is_zero() || unchanged {
            self.settle(doc);
            return;
        }
        self.tracker.begin(self.root, StyleProperty::Height, now, duration);
        self.awaiting = true;
    }

    fn settle<D: Document + ?Sized>(&mut self, doc: &mut D) {
        self.tracker.clear();
        self.awaiting = false;
        let direction = Direction::from_open(self.state.is_open());
        self.state = CollapsibleState::resting(direction);
        match direction {
            Direction::Open => self.rest_expanded(doc),
            Direction::Close => self.rest_collapsed(doc),
        }
        debug!(state = ?self.state, "collapsible settled");
    }

    fn rest_expanded<D: Document + ?Sized>(&self, doc: &mut D) {
        doc.clear_style(self.root, StyleProperty::Transition);
        doc.clear_style(self.root, StyleProperty::Height);
        doc.clear_style(self.root, StyleProperty::Overflow);
    }

    fn rest_collapsed<D: Document + ?Sized>(&self, doc: &mut D) {
        doc.clear_style(self.root, StyleProperty::Transition);
        doc.set_style(self.root, StyleProperty::Height, Some("0px"));
        doc.set_style(self.root, StyleProperty::Overflow, Some("hidden"));
    }

    fn live_height<D: Document + ?Sized>(&self, doc: &D) -> f64 {
        doc.offset_height(self.root)
            .filter(|h| h.is_finite() && *h >= 0.0)
            .unwrap_or(0.0)
    }

    fn content_height<D: Document + ?Sized>(&self, doc: &D) -> f64 {
        self.content
            .and_then(|el| doc.offset_height(el))
            .filter(|h| h.is_finite() && *h >= 0.0)
            .unwrap_or(0.0)
    }
}

fn px(value: f64) -> String {
    format!("{}px", value.round())
}
