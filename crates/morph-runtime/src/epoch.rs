//! Epoch guards for cooperative cancellation of transition drivers.
//!
//! An [`EpochSource`] owns a monotonically increasing counter. Each driver
//! receives an [`EpochToken`] minted by [`EpochSource::advance`]; minting a
//! new token supersedes every earlier one. A driver checks
//! [`EpochToken::is_current`] once at the top of each step and returns
//! early when stale, so an interrupted driver's leftover continuations run
//! as no-ops instead of being hunted down individually.
//!
//! # Example
//!
//! ```
//! use morph_runtime::epoch::EpochSource;
//!
//! let source = EpochSource::new();
//! let opening = source.advance();
//! assert!(opening.is_current());
//!
//! // The caller flips the input again: the open driver is superseded.
//! let closing = source.advance();
//! assert!(!opening.is_current());
//! assert!(closing.is_current());
//! ```

#![forbid(unsafe_code)]

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// A generation number handed out by an [`EpochSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Epoch(u64);

impl Epoch {
    /// The raw generation number.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "epoch {}", self.0)
    }
}

/// The control handle that mints epochs.
///
/// Dropping the source does **not** invalidate outstanding tokens; they keep
/// reporting the state the counter had when the source went away.
#[derive(Debug, Default)]
pub struct EpochSource {
    current: Rc<Cell<u64>>,
}

/// A cloneable guard bound to one epoch of one source.
#[derive(Clone)]
pub struct EpochToken {
    epoch: Epoch,
    current: Rc<Cell<u64>>,
}

impl EpochSource {
    /// Create a source at epoch 0. No token is current until the first
    /// [`advance`](Self::advance).
    pub fn new() -> Self {
        Self::default()
    }

    /// The latest epoch handed out.
    pub fn current(&self) -> Epoch {
        Epoch(self.current.get())
    }

    /// Start a new epoch, superseding every outstanding token.
    pub fn advance(&self) -> EpochToken {
        let next = self.current.get().wrapping_add(1);
        self.current.set(next);
        tracing::trace!(message = "epoch.advance", epoch = next);
        EpochToken {
            epoch: Epoch(next),
            current: Rc::clone(&self.current),
        }
    }

    /// Supersede every outstanding token without starting a new driver.
    pub fn invalidate(&self) {
        let _ = self.advance();
    }

    /// Check whether `epoch` is still the latest.
    pub fn is_current(&self, epoch: Epoch) -> bool {
        self.current.get() == epoch.0
    }
}

impl EpochToken {
    /// The epoch this token is bound to.
    #[inline]
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Returns `true` while no newer epoch has been minted.
    #[inline]
    pub fn is_current(&self) -> bool {
        self.current.get() == self.epoch.0
    }

    /// Returns `true` once a newer epoch has been minted.
    #[inline]
    pub fn is_stale(&self) -> bool {
        !self.is_current()
    }
}

impl fmt::Debug for EpochToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EpochToken")
            .field("epoch", &self.epoch.0)
            .field("current", &self.is_current())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_source_has_no_current_token() {
        let source = EpochSource::new();
        assert_eq!(source.current(), Epoch::default());
    }

    #[test]
    fn advance_supersedes_previous_tokens() {
        let source = EpochSource::new();
        let a = source.advance();
        let a2 = a.clone();
        let b = source.advance();
        assert!(a.is_stale());
        assert!(a2.is_stale());
        assert!(b.is_current());
        assert!(source.is_current(b.epoch()));
        assert!(!source.is_current(a.epoch()));
    }

    #[test]
    fn invalidate_stales_without_new_driver() {
        let source = EpochSource::new();
        let token = source.advance();
        source.invalidate();
        assert!(token.is_stale());
        assert_eq!(source.current().get(), 2);
    }

    #[test]
    fn dropping_source_keeps_token_state() {
        let source = EpochSource::new();
        let token = source.advance();
        drop(source);
        assert!(token.is_current());
    }

    #[test]
    fn debug_shows_liveness() {
        let source = EpochSource::new();
        let token = source.advance();
        let debug = format!("{token:?}");
        assert!(debug.contains("current: true"));
    }
}
