#![forbid(unsafe_code)]
#![doc = "Host boundary for the card/page morph engine."]
#![doc = ""]
#![doc = "This crate defines the seam between the transition engines in `morph-widgets`"]
#![doc = "and whatever actually owns the elements: a browser DOM reached through"]
#![doc = "`wasm-bindgen`, a retained-mode scene graph, or the headless document in"]
#![doc = "`morph-harness`."]

use web_time::Duration;

use morph_core::element::{ElementId, StyleProperty};
use morph_core::geometry::Rect;

/// Monotonic clock abstraction.
///
/// Browser hosts forward the `DOMHighResTimeStamp` passed to
/// `requestAnimationFrame`; native hosts use `Instant`. The engines never
/// read the wall clock directly; all time flows through this trait or
/// through the timestamp handed to a frame callback.
pub trait FrameClock {
    /// Returns elapsed time since an unspecified epoch, monotonically increasing.
    fn now_mono(&self) -> Duration;
}

/// Element geometry reads and inline style writes.
///
/// Every method takes an [`ElementId`] that may no longer (or not yet) be
/// mounted. Reads on a missing element return `None`; writes on a missing
/// element are ignored. The engines rely on this to treat absent optional
/// collaborators as "skip", never as an error.
pub trait Document {
    /// Height of the layout viewport in pixels.
    fn viewport_height(&self) -> f64;

    /// Border-box rectangle in viewport coordinates (`getBoundingClientRect`).
    fn bounding_rect(&self, el: ElementId) -> Option<Rect>;

    /// Layout height including borders (`offsetHeight`).
    ///
    /// Reading it may force a synchronous layout, so callers keep these
    /// reads to phase boundaries.
    fn offset_height(&self, el: ElementId) -> Option<f64>;

    /// Vertical scroll offset of a scroll container.
    fn scroll_top(&self, el: ElementId) -> Option<f64>;

    /// Set the vertical scroll offset of a scroll container.
    fn set_scroll_top(&mut self, el: ElementId, value: f64);

    /// Current inline style value, `None` when unset.
    fn style(&self, el: ElementId, prop: StyleProperty) -> Option<String>;

    /// Write an inline style value; `None` removes it so the stylesheet
    /// value applies again.
    fn set_style(&mut self, el: ElementId, prop: StyleProperty, value: Option<&str>);

    /// Remove an inline style value.
    fn clear_style(&mut self, el: ElementId, prop: StyleProperty) {
        self.set_style(el, prop, None);
    }

    /// Whether the element is currently mounted.
    fn is_mounted(&self, el: ElementId) -> bool {
        self.bounding_rect(el).is_some()
    }
}

impl<D: Document + ?Sized> Document for &mut D {
    fn viewport_height(&self) -> f64 {
        (**self).viewport_height()
    }

    fn bounding_rect(&self, el: ElementId) -> Option<Rect> {
        (**self).bounding_rect(el)
    }

    fn offset_height(&self, el: ElementId) -> Option<f64> {
        (**self).offset_height(el)
    }

    fn scroll_top(&self, el: ElementId) -> Option<f64> {
        (**self).scroll_top(el)
    }

    fn set_scroll_top(&mut self, el: ElementId, value: f64) {
        (**self).set_scroll_top(el, value);
    }

    fn style(&self, el: ElementId, prop: StyleProperty) -> Option<String> {
        (**self).style(el, prop)
    }

    fn set_style(&mut self, el: ElementId, prop: StyleProperty, value: Option<&str>) {
        (**self).set_style(el, prop, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    // -----------------------------------------------------------------------
    // Mock implementations for trait testing
    // -----------------------------------------------------------------------

    struct TestClock {
        elapsed: Duration,
    }

    impl FrameClock for TestClock {
        fn now_mono(&self) -> Duration {
            self.elapsed
        }
    }

    #[derive(Default)]
    struct TestDocument {
        rects: BTreeMap<ElementId, Rect>,
        styles: BTreeMap<(ElementId, StyleProperty), String>,
        scroll: BTreeMap<ElementId, f64>,
    }

    impl Document for TestDocument {
        fn viewport_height(&self) -> f64 {
            800.0
        }

        fn bounding_rect(&self, el: ElementId) -> Option<Rect> {
            self.rects.get(&el).copied()
        }

        fn offset_height(&self, el: ElementId) -> Option<f64> {
            self.rects.get(&el).map(|r| r.height)
        }

        fn scroll_top(&self, el: ElementId) -> Option<f64> {
            self.rects.get(&el)?;
            Some(self.scroll.get(&el).copied().unwrap_or(0.0))
        }

        fn set_scroll_top(&mut self, el: ElementId, value: f64) {
            if self.rects.contains_key(&el) {
                self.scroll.insert(el, value);
            }
        }

        fn style(&self, el: ElementId, prop: StyleProperty) -> Option<String> {
            self.styles.get(&(el, prop)).cloned()
        }

        fn set_style(&mut self, el: ElementId, prop: StyleProperty, value: Option<&str>) {
            if !self.rects.contains_key(&el) {
                return;
            }
            match value {
                Some(v) => {
                    self.styles.insert((el, prop), v.to_owned());
                }
                None => {
                    self.styles.remove(&(el, prop));
                }
            }
        }
    }

    const CARD: ElementId = ElementId::new(1);
    const DETACHED: ElementId = ElementId::new(99);

    fn doc() -> TestDocument {
        let mut doc = TestDocument::default();
        doc.rects.insert(CARD, Rect::new(0.0, 120.0, 360.0, 80.0));
        doc
    }

    #[test]
    fn clock_reports_elapsed() {
        let clock = TestClock {
            elapsed: Duration::from_millis(16),
        };
        assert_eq!(clock.now_mono(), Duration::from_millis(16));
    }

    #[test]
    fn clear_style_removes_value() {
        let mut doc = doc();
        doc.set_style(CARD, StyleProperty::Opacity, Some("0"));
        assert_eq!(doc.style(CARD, StyleProperty::Opacity).as_deref(), Some("0"));
        doc.clear_style(CARD, StyleProperty::Opacity);
        assert_eq!(doc.style(CARD, StyleProperty::Opacity), None);
    }

    #[test]
    fn detached_element_reads_none_and_ignores_writes() {
        let mut doc = doc();
        assert!(!doc.is_mounted(DETACHED));
        doc.set_style(DETACHED, StyleProperty::Display, Some("none"));
        assert_eq!(doc.style(DETACHED, StyleProperty::Display), None);
        assert_eq!(doc.scroll_top(DETACHED), None);
    }

    #[test]
    fn mutable_reference_forwards() {
        let mut doc = doc();
        {
            let forwarded = &mut doc;
            forwarded.set_scroll_top(CARD, 42.0);
            assert_eq!(Document::viewport_height(&forwarded), 800.0);
        }
        assert_eq!(doc.scroll_top(CARD), Some(42.0));
    }
}
