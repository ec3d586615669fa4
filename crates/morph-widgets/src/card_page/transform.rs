#![forbid(unsafe_code)]

//! Transform builders.
//!
//! Pure functions of `(phase, snapshot, config)`. Each returns the inline
//! value for one surface, or `None` when the surface should fall back to
//! its stylesheet value (the resting phases).
//!
//! Two looks exist. The *collapsed* look (`Enter`, `Exiting`) makes the
//! full-size page stack appear exactly where the card sits in the list.
//! The *expanded* look (`Entering`, `Exit`) is the identity transform. CSS
//! transitions interpolate between the two; the builders only supply the
//! endpoints.
//!
//! # Invariants
//!
//! - No builder emits `NaN` or `inf`: non-finite inputs format as `0`.
//! - The two overflow clippers translate by opposite amounts, so their
//!   composition is the identity in every phase.
//! - `-0` is normalized, so a zero offset always prints as `0px`.

use super::config::TransitionConfig;
use super::lifecycle::Phase;
use super::snapshot::GeometrySnapshot;

/// `translate3d(0, {y}px, 0)`.
pub fn translate_y(y: f64) -> String {
    format!("translate3d(0, {}px, 0)", tidy(y))
}

/// `scaleY({ratio})`.
pub fn scale_y(ratio: f64) -> String {
    format!("scaleY({})", tidy(ratio))
}

/// Round to a thousandth of a pixel and drop non-finite values and `-0`.
fn tidy(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Slides the stack from the card's list position to just below the
/// offset header.
pub fn wrapper(phase: Phase, snap: &GeometrySnapshot) -> Option<String> {
    match phase {
        Phase::Enter | Phase::Exiting => Some(translate_y(
            snap.collapsed_offset_top - snap.offset_header_height,
        )),
        Phase::Entering | Phase::Exit => Some(translate_y(0.0)),
        Phase::Entered | Phase::Exited => None,
    }
}

/// Outer clipper: raises its bottom edge to the card's bottom edge.
pub fn bottom_overflow(phase: Phase, snap: &GeometrySnapshot) -> Option<String> {
    clipper(phase, -snap.bottom_overflow())
}

/// Inner clipper: counter-translates the outer one so content stays put.
pub fn top_overflow(phase: Phase, snap: &GeometrySnapshot) -> Option<String> {
    clipper(phase, snap.bottom_overflow())
}

fn clipper(phase: Phase, offset: f64) -> Option<String> {
    match phase {
        Phase::Enter | Phase::Exiting => Some(translate_y(offset)),
        Phase::Entering | Phase::Exit => Some(translate_y(0.0)),
        Phase::Entered | Phase::Exited => None,
    }
}

/// Offset that shows the card's preview crop of the page media.
///
/// The media band is the page content minus the header and footer bands;
/// the window is the card minus the same bands. `crop` picks where in the
/// overflow the window sits. Zero when no crop is configured.
pub fn crop_offset(snap: &GeometrySnapshot, config: &TransitionConfig) -> f64 {
    let Some(crop) = config.crop else {
        return 0.0;
    };
    let bands = config.header_height + config.footer_height;
    let media = (snap.expanded_content_height - bands).max(0.0);
    let window = (snap.collapsed_height - bands).max(0.0);
    let offset = crop.clamp(0.0, 1.0) * (media - window).max(0.0);
    if offset.is_finite() { offset } else { 0.0 }
}

/// Content crop and scroll rewind.
///
/// At `exit` the crop wins when one is configured, freezing the content on
/// the thumbnail region; otherwise the live scroll offset holds the page
/// where the user left it. From `exiting` on the scroll offset wins while
/// there is one, so the content keeps rewinding naturally.
pub fn container(
    phase: Phase,
    snap: &GeometrySnapshot,
    config: &TransitionConfig,
) -> Option<String> {
    let crop = crop_offset(snap, config);
    match phase {
        Phase::Enter => Some(translate_y(-crop)),
        Phase::Entering => Some(translate_y(0.0)),
        Phase::Exit if config.crop.is_some() => Some(translate_y(-crop)),
        Phase::Exit => Some(translate_y(-snap.scroll_top)),
        Phase::Exiting if snap.scroll_top > 0.0 => Some(translate_y(-snap.scroll_top)),
        Phase::Exiting => Some(translate_y(-crop)),
        Phase::Entered | Phase::Exited => None,
    }
}

/// Distance the sticky header travels from its card position to its
/// in-flow page position. `None` without both measurements.
pub fn header_delta(snap: &GeometrySnapshot, config: &TransitionConfig) -> Option<f64> {
    let header = snap.header_y?;
    let sentinel = snap.header_sentinel_y?;
    Some(header - sentinel + crop_offset(snap, config))
}

/// Distance the sticky footer travels from its card position to the
/// bottom of the page viewport. `None` without a footer measurement.
pub fn footer_delta(snap: &GeometrySnapshot, config: &TransitionConfig) -> Option<f64> {
    let footer = snap.footer_y?;
    Some(footer - (snap.expanded_visible_height() - config.footer_height))
}

/// Sticky header: sentinel delta in the collapsed look, pinned otherwise.
pub fn header(phase: Phase, snap: &GeometrySnapshot, config: &TransitionConfig) -> Option<String> {
    sticky(phase, header_delta(snap, config))
}

/// Sticky footer: card delta in the collapsed look, pinned otherwise.
pub fn footer(phase: Phase, snap: &GeometrySnapshot, config: &TransitionConfig) -> Option<String> {
    sticky(phase, footer_delta(snap, config))
}

fn sticky(phase: Phase, delta: Option<f64>) -> Option<String> {
    let delta = delta?;
    match phase {
        Phase::Enter | Phase::Exiting => Some(translate_y(delta)),
        Phase::Entering | Phase::Exit => Some(translate_y(0.0)),
        Phase::Entered | Phase::Exited => None,
    }
}

/// Drop shadow scale: card-sized in the collapsed look, full otherwise.
pub fn shadow(phase: Phase, snap: &GeometrySnapshot) -> Option<String> {
    match phase {
        Phase::Enter | Phase::Exiting => Some(scale_y(snap.height_ratio())),
        Phase::Entering | Phase::Exit => Some(scale_y(1.0)),
        Phase::Entered | Phase::Exited => None,
    }
}

/// Opacity of the backdrop and shadow: hidden in the collapsed look.
pub fn fade_opacity(phase: Phase) -> &'static str {
    if phase.is_collapsed_look() { "0" } else { "1" }
}

/// Opacity of the footer cover: shown only in the collapsed look.
pub fn footer_cover_opacity(phase: Phase) -> &'static str {
    if phase.is_collapsed_look() { "1" } else { "0" }
}
