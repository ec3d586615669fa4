#![forbid(unsafe_code)]

//! Ready-made layouts.

use morph_backend::Document;
use morph_core::element::ElementId;
use morph_core::geometry::{Rect, Sides};
use morph_widgets::card_page::{CardPageTransition, ElementRefs, Surfaces, TransitionConfig};
use morph_widgets::collapsible::{Collapsible, CollapsibleConfig};

use crate::document::HeadlessDocument;

/// A 400×800 viewport with a 64px app bar and one 80px card at y=300.
///
/// ```text
///   0 ┌──────────────┐ offset header (64)
///     │              │
/// 300 ├──────────────┤ card (80): header at +0 (20), footer at +60 (20)
/// 380 ├──────────────┤
///     │              │
/// 800 └──────────────┘
/// ```
///
/// The page content is 1600px tall with the header sentinel 40px below its
/// top. The truncated card body renders 120px tall.
#[derive(Debug, Clone)]
pub struct CardFixture {
    pub doc: HeadlessDocument,
    pub surfaces: Surfaces,
    pub refs: ElementRefs,
}

impl CardFixture {
    pub const VIEWPORT: f64 = 800.0;
    pub const WIDTH: f64 = 400.0;
    pub const CARD_TOP: f64 = 300.0;
    pub const CARD_HEIGHT: f64 = 80.0;
    pub const CONTENT_HEIGHT: f64 = 1600.0;
    pub const OFFSET_HEADER_HEIGHT: f64 = 64.0;

    pub fn new() -> Self {
        let mut doc = HeadlessDocument::new(Self::VIEWPORT);
        let full = Rect::from_size(Self::WIDTH, Self::VIEWPORT);
        let page = full.inner(Sides::new(Self::OFFSET_HEADER_HEIGHT, 0.0, 0.0, 0.0));

        let surfaces = Surfaces {
            backdrop: doc.spawn(full),
            wrapper: doc.spawn(page),
            bottom_overflow: doc.spawn(page),
            top_overflow: doc.spawn(page),
            container: doc.spawn(page),
            children_area: doc.spawn(page),
            shadow_area: doc.spawn(page),
        };

        let card = Rect::new(0.0, Self::CARD_TOP, Self::WIDTH, Self::CARD_HEIGHT);
        let band = Rect::new(0.0, Self::CARD_TOP, Self::WIDTH, 20.0);
        let content = Rect::new(0.0, 0.0, Self::WIDTH, Self::CONTENT_HEIGHT);

        let refs = ElementRefs::new()
            .card(doc.spawn(card))
            .content(doc.spawn(content))
            .header(doc.spawn(band))
            .header_sentinel(doc.spawn(Rect::new(0.0, 40.0, Self::WIDTH, 0.0)))
            .footer(doc.spawn(band.translate(0.0, 60.0)))
            .footer_cover(doc.spawn(band.translate(0.0, 60.0)))
            .scroll(doc.spawn(full))
            .offset_header(doc.spawn(Rect::from_size(Self::WIDTH, Self::OFFSET_HEADER_HEIGHT)))
            .offset_header_shadow(doc.spawn(Rect::new(
                0.0,
                Self::OFFSET_HEADER_HEIGHT,
                Self::WIDTH,
                4.0,
            )))
            .truncation_area(doc.spawn(card))
            .truncation_content(doc.spawn(Rect::new(0.0, Self::CARD_TOP, Self::WIDTH, 120.0)));

        Self {
            doc,
            surfaces,
            refs,
        }
    }

    /// Same layout with only the card reference, as for a card type with
    /// no sticky bands or truncation.
    pub fn bare() -> Self {
        let mut fixture = Self::new();
        fixture.refs = ElementRefs::new().card(fixture.card());
        fixture
    }

    /// A transition over this fixture.
    pub fn page(&self, config: TransitionConfig) -> CardPageTransition {
        CardPageTransition::new(self.surfaces, self.refs, config)
    }

    /// Scroll the open page.
    pub fn scroll_page(&mut self, top: f64) {
        self.doc.set_scroll_top(self.surfaces.backdrop, top);
    }

    /// Handle of the card element.
    pub fn card(&self) -> ElementId {
        self.refs.card.unwrap_or(ElementId::new(0))
    }
}

impl Default for CardFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A collapsible section whose content is 240px tall.
#[derive(Debug, Clone)]
pub struct CollapsibleFixture {
    pub doc: HeadlessDocument,
    pub root: ElementId,
    pub content: ElementId,
}

impl CollapsibleFixture {
    pub const CONTENT_HEIGHT: f64 = 240.0;

    pub fn new() -> Self {
        let mut doc = HeadlessDocument::new(800.0);
        let root = doc.spawn(Rect::new(0.0, 100.0, 400.0, Self::CONTENT_HEIGHT));
        let content = doc.spawn(Rect::new(0.0, 100.0, 400.0, Self::CONTENT_HEIGHT));
        Self { doc, root, content }
    }

    /// A collapsible over this fixture, with its resting style written.
    pub fn collapsible(&mut self, config: CollapsibleConfig, expanded: bool) -> Collapsible {
        let section = Collapsible::new(self.root, Some(self.content), config, expanded);
        section.initialize(&mut self.doc);
        section
    }
}

impl Default for CollapsibleFixture {
    fn default() -> Self {
        Self::new()
    }
}
