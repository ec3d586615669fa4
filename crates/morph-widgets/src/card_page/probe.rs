#![forbid(unsafe_code)]

//! Geometry probes.
//!
//! Side-effect-free reads of live element geometry. The engine calls these
//! only at phase boundaries (`enter`, the priming frame, `exit`), so each
//! transition costs a constant number of forced layouts.
//!
//! # Failure Modes
//!
//! - Absent element: positions read as `0`, heights fall back to the
//!   viewport height.
//! - Zero, negative, or non-finite height: also falls back to the viewport
//!   height, so no `NaN` ever reaches a transform string.

use morph_backend::Document;
use morph_core::element::ElementId;

/// Top edge of `el` in viewport coordinates, `0` when absent.
pub fn element_top<D: Document + ?Sized>(doc: &D, el: Option<ElementId>) -> f64 {
    el.and_then(|el| doc.bounding_rect(el))
        .map(|rect| rect.top())
        .filter(|top| top.is_finite())
        .unwrap_or(0.0)
}

/// Distance from the bottom edge of `el` to `container_bottom`.
///
/// Positive when the element ends above the container's bottom edge.
/// Returns `0` when the element is absent.
pub fn distance_from_bottom<D: Document + ?Sized>(
    doc: &D,
    el: Option<ElementId>,
    container_bottom: f64,
) -> f64 {
    el.and_then(|el| doc.bounding_rect(el))
        .map(|rect| container_bottom - rect.bottom())
        .filter(|distance| distance.is_finite())
        .unwrap_or(0.0)
}

/// Rendered height of `el`, falling back to the viewport height.
pub fn rendered_height<D: Document + ?Sized>(doc: &D, el: Option<ElementId>) -> f64 {
    let measured = el.and_then(|el| doc.offset_height(el));
    match measured {
        Some(height) if height.is_finite() && height > 0.0 => height,
        _ => viewport_height(doc),
    }
}

/// Position of `el` relative to the top of `origin`, `None` when `el` is
/// absent.
pub fn relative_top<D: Document + ?Sized>(
    doc: &D,
    el: Option<ElementId>,
    origin: Option<ElementId>,
) -> Option<f64> {
    let rect = doc.bounding_rect(el?)?;
    let offset = rect.top() - element_top(doc, origin);
    offset.is_finite().then_some(offset)
}

/// Height of `el` if it is mounted and laid out, without fallback.
pub fn measured_height<D: Document + ?Sized>(doc: &D, el: Option<ElementId>) -> Option<f64> {
    doc.offset_height(el?)
        .filter(|height| height.is_finite() && *height >= 0.0)
}

fn viewport_height<D: Document + ?Sized>(doc: &D) -> f64 {
    let height = doc.viewport_height();
    if height.is_finite() && height > 0.0 {
        height
    } else {
        0.0
    }
}
