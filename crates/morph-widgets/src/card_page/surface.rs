#![forbid(unsafe_code)]

//! The fixed layer hierarchy the engine animates, and the caller's element
//! references.
//!
//! ```text
//! backdrop                 fixed, full viewport, scrolls the page
//! └── wrapper              slides between list position and top of viewport
//!     └── bottom_overflow  clips the bottom edge
//!         └── top_overflow clips the top edge
//!             ├── container      carries the content crop
//!             │   └── children_area  caller content
//!             └── shadow_area    scaled drop shadow
//! ```
//!
//! The caller renders these layers; the engine is the only writer of their
//! inline `transform`, `transition`, `opacity` and `display` while a
//! transition runs.

use bitflags::bitflags;
use morph_backend::Document;
use morph_core::element::{ElementId, StyleProperty};

/// One layer of the transitioning hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Backdrop,
    Wrapper,
    BottomOverflow,
    TopOverflow,
    Container,
    ChildrenArea,
    ShadowArea,
}

impl SurfaceKind {
    /// Every layer, outermost first.
    pub const ALL: [SurfaceKind; 7] = [
        Self::Backdrop,
        Self::Wrapper,
        Self::BottomOverflow,
        Self::TopOverflow,
        Self::Container,
        Self::ChildrenArea,
        Self::ShadowArea,
    ];

    /// The flag for this layer.
    pub const fn flag(self) -> SurfaceSet {
        match self {
            Self::Backdrop => SurfaceSet::BACKDROP,
            Self::Wrapper => SurfaceSet::WRAPPER,
            Self::BottomOverflow => SurfaceSet::BOTTOM_OVERFLOW,
            Self::TopOverflow => SurfaceSet::TOP_OVERFLOW,
            Self::Container => SurfaceSet::CONTAINER,
            Self::ChildrenArea => SurfaceSet::CHILDREN_AREA,
            Self::ShadowArea => SurfaceSet::SHADOW_AREA,
        }
    }
}

bitflags! {
    /// A set of layers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SurfaceSet: u8 {
        const BACKDROP        = 1 << 0;
        const WRAPPER         = 1 << 1;
        const BOTTOM_OVERFLOW = 1 << 2;
        const TOP_OVERFLOW    = 1 << 3;
        const CONTAINER       = 1 << 4;
        const CHILDREN_AREA   = 1 << 5;
        const SHADOW_AREA     = 1 << 6;
        /// Layers whose opacity is cross-faded.
        const FADING = Self::BACKDROP.bits() | Self::SHADOW_AREA.bits();
    }
}

/// Element handles for the seven engine-owned layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surfaces {
    pub backdrop: ElementId,
    pub wrapper: ElementId,
    pub bottom_overflow: ElementId,
    pub top_overflow: ElementId,
    pub container: ElementId,
    pub children_area: ElementId,
    pub shadow_area: ElementId,
}

impl Surfaces {
    /// Handle of one layer.
    pub const fn get(&self, kind: SurfaceKind) -> ElementId {
        match kind {
            SurfaceKind::Backdrop => self.backdrop,
            SurfaceKind::Wrapper => self.wrapper,
            SurfaceKind::BottomOverflow => self.bottom_overflow,
            SurfaceKind::TopOverflow => self.top_overflow,
            SurfaceKind::Container => self.container,
            SurfaceKind::ChildrenArea => self.children_area,
            SurfaceKind::ShadowArea => self.shadow_area,
        }
    }

    /// Layers in `set`, outermost first.
    pub fn iter(&self, set: SurfaceSet) -> impl Iterator<Item = (SurfaceKind, ElementId)> + '_ {
        SurfaceKind::ALL
            .into_iter()
            .filter(move |kind| set.contains(kind.flag()))
            .map(|kind| (kind, self.get(kind)))
    }

    /// Write `transition` on every layer.
    pub fn set_transition<D: Document + ?Sized>(&self, doc: &mut D, value: Option<&str>) {
        for (_, el) in self.iter(SurfaceSet::all()) {
            doc.set_style(el, StyleProperty::Transition, value);
        }
    }

    /// Return every layer to the closed baseline: no inline transform,
    /// transition or opacity, backdrop and shadow hidden.
    pub fn reset_to_baseline<D: Document + ?Sized>(&self, doc: &mut D) {
        for (_, el) in self.iter(SurfaceSet::all()) {
            for prop in [
                StyleProperty::Transition,
                StyleProperty::Transform,
                StyleProperty::Opacity,
                StyleProperty::ZIndex,
                StyleProperty::MaxWidth,
                StyleProperty::BackgroundColor,
            ] {
                doc.clear_style(el, prop);
            }
        }
        doc.set_style(self.backdrop, StyleProperty::Display, Some("none"));
        doc.set_style(self.shadow_area, StyleProperty::Display, Some("none"));
        doc.set_scroll_top(self.backdrop, 0.0);
    }
}

/// Caller-owned elements the engine measures and decorates.
///
/// All optional: a missing reference skips the mutation that needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElementRefs {
    /// The card in its list position.
    pub card: Option<ElementId>,
    /// Root of the page content.
    pub content: Option<ElementId>,
    /// Sticky header and the sentinel marking its in-flow position.
    pub header: Option<ElementId>,
    pub header_sentinel: Option<ElementId>,
    /// Sticky footer and the cover hiding content behind it.
    pub footer: Option<ElementId>,
    pub footer_cover: Option<ElementId>,
    /// The list's scroll container, hidden while the page is open.
    pub scroll: Option<ElementId>,
    /// App bar the page slides under, and its drop shadow.
    pub offset_header: Option<ElementId>,
    pub offset_header_shadow: Option<ElementId>,
    /// Card region whose height is frozen while the morph runs.
    pub truncation_area: Option<ElementId>,
    pub truncation_content: Option<ElementId>,
}

macro_rules! ref_setters {
    ($($name:ident),* $(,)?) => {
        $(
            #[doc = concat!("Set the `", stringify!($name), "` reference.")]
            #[must_use]
            pub fn $name(mut self, el: ElementId) -> Self {
                self.$name = Some(el);
                self
            }
        )*
    };
}

impl ElementRefs {
    /// No references.
    pub fn new() -> Self {
        Self::default()
    }

    ref_setters!(
        card,
        content,
        header,
        header_sentinel,
        footer,
        footer_cover,
        scroll,
        offset_header,
        offset_header_shadow,
        truncation_area,
        truncation_content,
    );
}
