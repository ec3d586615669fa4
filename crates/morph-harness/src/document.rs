#![forbid(unsafe_code)]

//! In-memory [`Document`] for tests.
//!
//! There is no layout engine. Each mounted element has the rectangle the
//! test gave it, a scroll offset, and a map of inline styles. Two pieces of
//! browser behaviour are modelled because the engines depend on them:
//!
//! - An inline `height: <n>px` overrides the mounted height for
//!   `offset_height`, so frozen heights read back.
//! - Changing `transform`, `opacity` or `height` while the element's
//!   inline `transition` lists that property with a non-zero duration
//!   starts a transition. Its `transitionend` is queued until the test
//!   drains it, mirroring the browser's "no event if nothing animated"
//!   rule.

use ahash::AHashMap;
use morph_backend::Document;
use morph_core::element::{ElementId, StyleProperty};
use morph_core::event::TransitionEnd;
use morph_core::geometry::Rect;

/// One inline style write, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleWrite {
    pub el: ElementId,
    pub prop: StyleProperty,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default)]
struct Node {
    rect: Rect,
    scroll_top: f64,
    styles: AHashMap<StyleProperty, String>,
}

/// Deterministic headless document.
#[derive(Debug, Clone)]
pub struct HeadlessDocument {
    viewport_height: f64,
    next_id: u32,
    nodes: AHashMap<ElementId, Node>,
    running: Vec<TransitionEnd>,
    writes: Vec<StyleWrite>,
}

impl HeadlessDocument {
    /// Empty document with the given viewport height.
    pub fn new(viewport_height: f64) -> Self {
        Self {
            viewport_height,
            next_id: 1,
            nodes: AHashMap::new(),
            running: Vec::new(),
            writes: Vec::new(),
        }
    }

    /// Mount a new element and return its handle.
    pub fn spawn(&mut self, rect: Rect) -> ElementId {
        let el = ElementId::new(self.next_id);
        self.next_id += 1;
        self.mount(el, rect);
        el
    }

    /// Mount `el` at `rect`, replacing any previous node.
    pub fn mount(&mut self, el: ElementId, rect: Rect) {
        self.next_id = self.next_id.max(el.raw().saturating_add(1));
        self.nodes.insert(
            el,
            Node {
                rect,
                ..Node::default()
            },
        );
    }

    /// Remove `el`. Later reads return `None` and writes are dropped.
    pub fn unmount(&mut self, el: ElementId) {
        self.nodes.remove(&el);
        self.running.retain(|end| end.target != el);
    }

    /// Move or resize a mounted element.
    pub fn set_rect(&mut self, el: ElementId, rect: Rect) {
        if let Some(node) = self.nodes.get_mut(&el) {
            node.rect = rect;
        }
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
    }

    /// Inline style as a borrowed string.
    pub fn style_str(&self, el: ElementId, prop: StyleProperty) -> Option<&str> {
        self.nodes.get(&el)?.styles.get(&prop).map(String::as_str)
    }

    /// Every style write so far.
    pub fn writes(&self) -> &[StyleWrite] {
        &self.writes
    }

    /// Forget the write log.
    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }

    /// Transitions started and not yet drained.
    pub fn running_transitions(&self) -> &[TransitionEnd] {
        &self.running
    }

    /// Take every pending `transitionend`, oldest first.
    pub fn drain_transition_ends(&mut self) -> Vec<TransitionEnd> {
        std::mem::take(&mut self.running)
    }

    /// Drop pending transitions without reporting them, as a browser does
    /// when an element is detached mid-flight.
    pub fn discard_transitions(&mut self) {
        self.running.clear();
    }

    fn start_transition(&mut self, el: ElementId, prop: StyleProperty) {
        let end = TransitionEnd::new(el, prop);
        if !self.running.contains(&end) {
            self.running.push(end);
        }
    }
}

impl Default for HeadlessDocument {
    fn default() -> Self {
        Self::new(800.0)
    }
}

impl Document for HeadlessDocument {
    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn bounding_rect(&self, el: ElementId) -> Option<Rect> {
        self.nodes.get(&el).map(|node| node.rect)
    }

    fn offset_height(&self, el: ElementId) -> Option<f64> {
        let node = self.nodes.get(&el)?;
        let inline = node
            .styles
            .get(&StyleProperty::Height)
            .and_then(|h| h.strip_suffix("px"))
            .and_then(|h| h.trim().parse::<f64>().ok());
        Some(inline.unwrap_or(node.rect.height))
    }

    fn scroll_top(&self, el: ElementId) -> Option<f64> {
        self.nodes.get(&el).map(|node| node.scroll_top)
    }

    fn set_scroll_top(&mut self, el: ElementId, value: f64) {
        if let Some(node) = self.nodes.get_mut(&el) {
            node.scroll_top = value.max(0.0);
        }
    }

    fn style(&self, el: ElementId, prop: StyleProperty) -> Option<String> {
        self.style_str(el, prop).map(str::to_owned)
    }

    fn set_style(&mut self, el: ElementId, prop: StyleProperty, value: Option<&str>) {
        let Some(node) = self.nodes.get_mut(&el) else {
            return;
        };
        let previous = match value {
            Some(v) => node.styles.insert(prop, v.to_owned()),
            None => node.styles.remove(&prop),
        };
        let changed = previous.as_deref() != value;
        let animates = transition_covers(node.styles.get(&StyleProperty::Transition), prop);
        self.writes.push(StyleWrite {
            el,
            prop,
            value: value.map(str::to_owned),
        });
        if changed && animates {
            self.start_transition(el, prop);
        }
    }
}

/// Whether a `transition` value animates `prop` with a non-zero duration.
fn transition_covers(transition: Option<&String>, prop: StyleProperty) -> bool {
    if !matches!(
        prop,
        StyleProperty::Transform | StyleProperty::Opacity | StyleProperty::Height
    ) {
        return false;
    }
    let Some(transition) = transition else {
        return false;
    };
    transition.split(',').any(|segment| {
        let mut parts = segment.split_whitespace();
        let name = parts.next();
        let duration = parts.next().and_then(parse_duration_ms);
        matches!(name, Some(n) if n == prop.css_name() || n == "all")
            && duration.is_some_and(|ms| ms > 0.0)
    })
}

fn parse_duration_ms(token: &str) -> Option<f64> {
    if let Some(ms) = token.strip_suffix("ms") {
        ms.parse().ok()
    } else {
        token.strip_suffix('s')?.parse::<f64>().ok().map(|s| s * 1000.0)
    }
}
