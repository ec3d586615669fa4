#![forbid(unsafe_code)]

//! Logging shim.
//!
//! With the `tracing` feature enabled this module re-exports the `tracing`
//! macros, and the crate root re-exports them again so call sites can write
//! `use morph_core::{debug, trace};` regardless of the feature set.
//!
//! Without the feature the same names resolve to macros that expand to
//! nothing (events) or to a [`NoopSpan`] (spans), so instrumented code
//! compiles unchanged and costs nothing.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Stand-in span returned by the span macros when tracing is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpan;

impl NoopSpan {
    /// Mirror of `tracing::Span::entered`.
    #[inline]
    pub fn entered(self) -> Self {
        self
    }

    /// Mirror of `tracing::Span::in_scope`.
    #[inline]
    pub fn in_scope<F: FnOnce() -> T, T>(&self, f: F) -> T {
        f()
    }
}

#[cfg(not(feature = "tracing"))]
mod noop {
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
    #[macro_export]
    macro_rules! error {
        ($($arg:tt)*) => {};
    }
    #[macro_export]
    macro_rules! trace_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
    #[macro_export]
    macro_rules! info_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
    #[macro_export]
    macro_rules! warn_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
    #[macro_export]
    macro_rules! error_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
}

#[cfg(all(test, not(feature = "tracing")))]
mod tests {
    #[test]
    fn noop_macros_accept_structured_fields() {
        let phase = "enter";
        crate::debug!(message = "card_page.phase", phase, epoch = 3u64);
        crate::trace!("frame {} skipped", 7);
        let span = crate::debug_span!("drive_open", epoch = 1u64).entered();
        assert_eq!(span.in_scope(|| 41 + 1), 42);
    }
}
