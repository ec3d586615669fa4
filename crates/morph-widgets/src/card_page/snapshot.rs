#![forbid(unsafe_code)]

//! Per-cycle geometry snapshot.
//!
//! A [`GeometrySnapshot`] is created at `enter`, completed on the priming
//! frame once the page is laid out at full size, re-read at `exit` for the
//! scroll rewind, and dropped at `exited`. It is never reused across
//! cycles: list scroll position, card index, and viewport size may all
//! change between one open and the next.

use morph_backend::Document;

use super::config::TransitionConfig;
use super::probe;
use super::surface::{ElementRefs, Surfaces};

/// Measurements captured during one open/close cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeometrySnapshot {
    /// Rendered height of the card in its list position.
    pub collapsed_height: f64,
    /// Distance from the backdrop's top edge to the card's top edge.
    pub collapsed_offset_top: f64,
    /// Distance from the card's bottom edge to the backdrop's bottom edge.
    pub collapsed_offset_bottom: f64,
    /// Height of the backdrop (effectively the viewport).
    pub expanded_height: f64,
    /// Height of the page content laid out at full width.
    pub expanded_content_height: f64,
    /// Page scroll offset captured at `exit`.
    pub scroll_top: f64,
    /// Height of the app bar the page slides under.
    pub offset_header_height: f64,
    /// Sticky header top, relative to the card.
    pub header_y: Option<f64>,
    /// Header sentinel top, relative to the page content.
    pub header_sentinel_y: Option<f64>,
    /// Sticky footer top, relative to the card.
    pub footer_y: Option<f64>,
}

impl GeometrySnapshot {
    /// Measure the collapsed geometry at `enter`.
    ///
    /// The backdrop must already be displayed so its height is real; if it
    /// is not, the viewport height is used.
    pub fn capture_enter<D: Document + ?Sized>(
        doc: &D,
        surfaces: &Surfaces,
        refs: &ElementRefs,
        config: &TransitionConfig,
    ) -> Self {
        let backdrop = Some(surfaces.backdrop);
        let expanded_height = probe::rendered_height(doc, backdrop);
        let backdrop_top = probe::element_top(doc, backdrop);

        let collapsed_height = probe::rendered_height(doc, refs.card);
        let collapsed_offset_top = probe::element_top(doc, refs.card) - backdrop_top;
        let collapsed_offset_bottom = if refs.card.is_some_and(|el| doc.is_mounted(el)) {
            probe::distance_from_bottom(doc, refs.card, backdrop_top + expanded_height)
        } else {
            expanded_height - collapsed_offset_top - collapsed_height
        };

        let offset_header_height = config
            .offset_header_height
            .or_else(|| probe::measured_height(doc, refs.offset_header))
            .unwrap_or(0.0);

        Self {
            collapsed_height,
            collapsed_offset_top,
            collapsed_offset_bottom,
            expanded_height,
            expanded_content_height: expanded_height,
            scroll_top: 0.0,
            offset_header_height,
            header_y: probe::relative_top(doc, refs.header, refs.card),
            header_sentinel_y: None,
            footer_y: probe::relative_top(doc, refs.footer, refs.card),
        }
    }

    /// Complete the snapshot on the priming frame, after the container has
    /// been laid out at full size.
    pub fn capture_layout<D: Document + ?Sized>(&mut self, doc: &D, refs: &ElementRefs) {
        self.expanded_content_height = probe::rendered_height(doc, refs.content);
        self.header_sentinel_y = probe::relative_top(doc, refs.header_sentinel, refs.content);
    }

    /// Record the page scroll offset at `exit`.
    pub fn capture_exit<D: Document + ?Sized>(&mut self, doc: &D, surfaces: &Surfaces) {
        self.scroll_top = doc
            .scroll_top(surfaces.backdrop)
            .filter(|top| top.is_finite() && *top > 0.0)
            .unwrap_or(0.0);
    }

    /// Height of the page area below the offset header.
    pub fn expanded_visible_height(&self) -> f64 {
        (self.expanded_height - self.offset_header_height).max(0.0)
    }

    /// How far the expanded page extends past the card's bottom edge.
    pub fn bottom_overflow(&self) -> f64 {
        (self.expanded_visible_height() - self.collapsed_height).max(0.0)
    }

    /// Card height relative to the backdrop, in `(0, 1]`.
    pub fn height_ratio(&self) -> f64 {
        let ratio = self.collapsed_height / self.expanded_height;
        if ratio.is_finite() && ratio > 0.0 {
            ratio.min(1.0)
        } else {
            1.0
        }
    }
}
