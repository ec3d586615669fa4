#![forbid(unsafe_code)]

//! Frame loop stand-in.

use morph_backend::FrameClock;
use morph_core::event::TransitionEnd;
use morph_widgets::card_page::CardPageTransition;
use morph_widgets::collapsible::Collapsible;
use web_time::Duration;

use crate::clock::DeterministicClock;
use crate::document::HeadlessDocument;

/// Something the host drives with frames and `transitionend` events.
pub trait Animated {
    /// Run one animation frame at `now`.
    fn frame(&mut self, doc: &mut HeadlessDocument, now: Duration);

    /// Deliver one `transitionend`.
    fn transition_end(&mut self, doc: &mut HeadlessDocument, event: TransitionEnd);

    /// Whether the host should keep scheduling frames.
    fn wants_frame(&self) -> bool;
}

impl Animated for CardPageTransition {
    fn frame(&mut self, doc: &mut HeadlessDocument, now: Duration) {
        self.on_animation_frame(doc, now);
    }

    fn transition_end(&mut self, doc: &mut HeadlessDocument, event: TransitionEnd) {
        self.on_transition_end(doc, event);
    }

    fn wants_frame(&self) -> bool {
        CardPageTransition::wants_frame(self)
    }
}

impl Animated for Collapsible {
    fn frame(&mut self, doc: &mut HeadlessDocument, now: Duration) {
        self.on_animation_frame(doc, now);
    }

    fn transition_end(&mut self, doc: &mut HeadlessDocument, event: TransitionEnd) {
        self.on_transition_end(doc, event);
    }

    fn wants_frame(&self) -> bool {
        Collapsible::wants_frame(self)
    }
}

/// Drives an [`Animated`] target on a [`DeterministicClock`].
///
/// By default every transition the document started is reported as ended
/// right after the frame that started it. With
/// [`deliver_transition_ends(false)`](Self::deliver_transition_ends) the
/// events are swallowed instead, which exercises the deadline fallback.
#[derive(Debug, Clone)]
pub struct FramePump {
    clock: DeterministicClock,
    interval: Duration,
    deliver: bool,
    frames: u64,
}

impl Default for FramePump {
    fn default() -> Self {
        Self::new()
    }
}

impl FramePump {
    /// 60 Hz.
    pub const FRAME: Duration = Duration::from_millis(16);

    pub fn new() -> Self {
        Self {
            clock: DeterministicClock::new(),
            interval: Self::FRAME,
            deliver: true,
            frames: 0,
        }
    }

    /// Use a different frame interval.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Whether `transitionend` events are delivered.
    #[must_use]
    pub fn deliver_transition_ends(mut self, deliver: bool) -> Self {
        self.deliver = deliver;
        self
    }

    /// Current host time.
    pub fn now(&self) -> Duration {
        self.clock.now_mono()
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Let time pass without a frame.
    pub fn idle(&mut self, dt: Duration) {
        self.clock.advance(dt);
    }

    /// Advance one interval and run a frame. Does not deliver events.
    pub fn frame<A: Animated + ?Sized>(&mut self, doc: &mut HeadlessDocument, target: &mut A) {
        self.clock.advance(self.interval);
        self.frames += 1;
        tracing::trace!(frame = self.frames, now = ?self.now(), "harness frame");
        target.frame(doc, self.now());
    }

    /// Deliver (or discard) every pending `transitionend`. Returns how
    /// many were delivered.
    pub fn flush_transitions<A: Animated + ?Sized>(
        &mut self,
        doc: &mut HeadlessDocument,
        target: &mut A,
    ) -> usize {
        let ends = doc.drain_transition_ends();
        if !self.deliver {
            return 0;
        }
        let count = ends.len();
        for end in ends {
            target.transition_end(doc, end);
        }
        count
    }

    /// A frame followed by transition delivery.
    pub fn step<A: Animated + ?Sized>(&mut self, doc: &mut HeadlessDocument, target: &mut A) {
        self.frame(doc, target);
        self.flush_transitions(doc, target);
    }

    /// Step until the target stops asking for frames, at most `max_frames`
    /// times. Returns the frames run.
    pub fn run_until_settled<A: Animated + ?Sized>(
        &mut self,
        doc: &mut HeadlessDocument,
        target: &mut A,
        max_frames: usize,
    ) -> usize {
        let mut ran = 0;
        while ran < max_frames && target.wants_frame() {
            self.step(doc, target);
            ran += 1;
        }
        ran
    }
}
