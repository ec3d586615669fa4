//! "Animations complete" waiter.
//!
//! A play step that turns transitions on registers every `(element,
//! property)` pair it expects to animate. The host reports each
//! `transitionend`; once the set drains the tracker reports
//! [`TrackerStatus::Settled`].
//!
//! Browsers do not fire `transitionend` when the computed value did not
//! change, when the element is detached mid-flight, or when the duration is
//! zero. The tracker therefore also carries a deadline (longest duration
//! plus [`TransitionTracker::GRACE`]) that drivers poll on every frame.

#![forbid(unsafe_code)]

use ahash::AHashSet;
use morph_core::element::{ElementId, StyleProperty};
use morph_core::event::TransitionEnd;
use web_time::Duration;

/// Result of feeding an event into the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerStatus {
    /// The event did not belong to a tracked transition.
    Ignored,
    /// A tracked transition ended but others are still running.
    Pending,
    /// Every tracked transition has ended.
    Settled,
}

/// Tracks running CSS transitions for one play step.
#[derive(Debug, Default, Clone)]
pub struct TransitionTracker {
    running: AHashSet<(ElementId, StyleProperty)>,
    deadline: Option<Duration>,
}

impl TransitionTracker {
    /// Slack added on top of the longest registered duration before the
    /// deadline fires.
    pub const GRACE: Duration = Duration::from_millis(50);

    /// Create an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transition on `(target, property)` that started at
    /// `started_at` and runs for `duration`.
    pub fn begin(
        &mut self,
        target: ElementId,
        property: StyleProperty,
        started_at: Duration,
        duration: Duration,
    ) {
        self.running.insert((target, property));
        let deadline = started_at.saturating_add(duration).saturating_add(Self::GRACE);
        self.deadline = Some(self.deadline.map_or(deadline, |d| d.max(deadline)));
    }

    /// Feed a `transitionend` event.
    pub fn end(&mut self, event: &TransitionEnd) -> TrackerStatus {
        if !self.running.remove(&(event.target, event.property)) {
            return TrackerStatus::Ignored;
        }
        if self.running.is_empty() {
            self.deadline = None;
            TrackerStatus::Settled
        } else {
            TrackerStatus::Pending
        }
    }

    /// Whether nothing is being waited on.
    pub fn is_settled(&self) -> bool {
        self.running.is_empty()
    }

    /// The time after which the waiter gives up.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Whether the deadline passed while transitions were still pending.
    pub fn is_overdue(&self, now: Duration) -> bool {
        !self.running.is_empty() && self.deadline.is_some_and(|d| now >= d)
    }

    /// Forget everything being tracked.
    pub fn clear(&mut self) {
        self.running.clear();
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WRAPPER: ElementId = ElementId::new(1);
    const SHADOW: ElementId = ElementId::new(2);

    #[test]
    fn settles_after_all_targets_end() {
        let mut tracker = TransitionTracker::new();
        tracker.begin(
            WRAPPER,
            StyleProperty::Transform,
            Duration::ZERO,
            Duration::from_millis(300),
        );
        tracker.begin(SHADOW, StyleProperty::Opacity, Duration::ZERO, Duration::from_millis(300));

        let first = TransitionEnd::new(SHADOW, StyleProperty::Opacity);
        assert_eq!(tracker.end(&first), TrackerStatus::Pending);
        assert!(!tracker.is_settled());

        let last = TransitionEnd::new(WRAPPER, StyleProperty::Transform);
        assert_eq!(tracker.end(&last), TrackerStatus::Settled);
        assert!(tracker.is_settled());
        assert_eq!(tracker.deadline(), None);
    }

    #[test]
    fn unrelated_events_are_ignored() {
        let mut tracker = TransitionTracker::new();
        tracker.begin(
            WRAPPER,
            StyleProperty::Transform,
            Duration::ZERO,
            Duration::from_millis(300),
        );
        let other = TransitionEnd::new(WRAPPER, StyleProperty::Opacity);
        assert_eq!(tracker.end(&other), TrackerStatus::Ignored);
        assert!(!tracker.is_settled());
    }

    #[test]
    fn deadline_uses_longest_duration_plus_grace() {
        let mut tracker = TransitionTracker::new();
        let start = Duration::from_millis(1000);
        tracker.begin(WRAPPER, StyleProperty::Transform, start, Duration::from_millis(300));
        tracker.begin(SHADOW, StyleProperty::Opacity, start, Duration::from_millis(100));
        assert_eq!(tracker.deadline(), Some(Duration::from_millis(1350)));
        assert!(!tracker.is_overdue(Duration::from_millis(1349)));
        assert!(tracker.is_overdue(Duration::from_millis(1350)));
    }

    #[test]
    fn cleared_tracker_is_never_overdue() {
        let mut tracker = TransitionTracker::new();
        tracker.begin(WRAPPER, StyleProperty::Transform, Duration::ZERO, Duration::ZERO);
        tracker.clear();
        assert!(!tracker.is_overdue(Duration::from_secs(10)));
    }
}
