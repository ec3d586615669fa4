#![forbid(unsafe_code)]

//! Lifecycle integration tests for the card/page transition.
//!
//! Every test drives a [`CardPageTransition`] over the headless
//! [`CardFixture`] layout with the harness frame pump:
//!
//! 1. Opening twice runs one sequence.
//! 2. A full round trip emits all six phases in order.
//! 3. Closing before `entered` never emits `entered`.
//! 4. Several flips in one tick collapse to one driver.
//! 5. Collapsed geometry adds up to the backdrop height.
//! 6. Crop wins at `exit`, scroll wins at `exiting`.
//! 7. Closing a scrolled page leaves the content where it was.
//! 8. Missing `transitionend` settles on the deadline.

use morph_backend::Document;
use morph_core::element::StyleProperty;
use morph_core::event::{BackdropClick, Modifiers};
use morph_harness::{CardFixture, FramePump, LifecycleRecorder};
use morph_widgets::card_page::{CardPageTransition, Phase, PhaseTiming, TransitionConfig};
use pretty_assertions::assert_eq;
use web_time::Duration;

use Phase::{Enter, Entered, Entering, Exit, Exited, Exiting};

fn setup(
    config: TransitionConfig,
) -> (CardFixture, CardPageTransition, LifecycleRecorder, FramePump) {
    let fx = CardFixture::new();
    let mut page = fx.page(config);
    let rec = LifecycleRecorder::attach(&mut page);
    (fx, page, rec, FramePump::new())
}

fn open(fx: &mut CardFixture, page: &mut CardPageTransition, pump: &mut FramePump) {
    page.set_open_now(&mut fx.doc, true);
    pump.run_until_settled(&mut fx.doc, page, 60);
}

fn close(fx: &mut CardFixture, page: &mut CardPageTransition, pump: &mut FramePump) {
    page.set_open_now(&mut fx.doc, false);
    pump.run_until_settled(&mut fx.doc, page, 60);
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[test]
fn opening_twice_runs_one_sequence() {
    let (mut fx, mut page, rec, mut pump) = setup(TransitionConfig::default());
    assert!(page.set_open_now(&mut fx.doc, true));
    assert!(!page.set_open_now(&mut fx.doc, true));
    pump.run_until_settled(&mut fx.doc, &mut page, 60);
    assert!(!page.set_open_now(&mut fx.doc, true));
    pump.run_until_settled(&mut fx.doc, &mut page, 60);
    assert_eq!(rec.phases(), [Enter, Entering, Entered]);
}

#[test]
fn round_trip_emits_every_phase_in_order() {
    let (mut fx, mut page, rec, mut pump) = setup(TransitionConfig::default());
    open(&mut fx, &mut page, &mut pump);
    assert_eq!(page.phase(), Entered);
    close(&mut fx, &mut page, &mut pump);
    assert_eq!(rec.phases(), [Enter, Entering, Entered, Exit, Exiting, Exited]);
    assert!(!page.wants_frame());
}

#[test]
fn enter_fires_synchronously_and_frames_follow() {
    let (mut fx, mut page, rec, mut pump) = setup(TransitionConfig::default());
    page.set_open_now(&mut fx.doc, true);
    assert_eq!(rec.phases(), [Enter]);
    pump.step(&mut fx.doc, &mut page);
    assert_eq!(rec.phases(), [Enter, Entering]);
    pump.step(&mut fx.doc, &mut page);
    assert_eq!(rec.last(), Some(Entered));
    assert_eq!(pump.frames(), 2);
}

#[test]
fn close_before_entered_skips_entered() {
    let (mut fx, mut page, rec, mut pump) = setup(TransitionConfig::default());
    page.set_open_now(&mut fx.doc, true);
    pump.step(&mut fx.doc, &mut page);
    page.set_open_now(&mut fx.doc, false);
    pump.run_until_settled(&mut fx.doc, &mut page, 60);
    assert_eq!(rec.phases(), [Enter, Entering, Exit, Exiting, Exited]);
    assert_eq!(rec.count(Entered), 0);
}

#[test]
fn close_during_play_reverses_from_live_values() {
    let (mut fx, mut page, rec, mut pump) = setup(TransitionConfig::default());
    page.set_open_now(&mut fx.doc, true);
    pump.step(&mut fx.doc, &mut page);
    pump.frame(&mut fx.doc, &mut page);
    let wrapper = fx.surfaces.wrapper;
    assert_eq!(
        fx.doc.style_str(wrapper, StyleProperty::Transform),
        Some("translate3d(0, 0px, 0)")
    );

    page.set_open_now(&mut fx.doc, false);
    // The reversal keeps the in-flight transform instead of re-priming.
    assert_eq!(
        fx.doc.style_str(wrapper, StyleProperty::Transform),
        Some("translate3d(0, 0px, 0)")
    );
    pump.run_until_settled(&mut fx.doc, &mut page, 60);
    assert_eq!(rec.phases(), [Enter, Entering, Exit, Exiting, Exited]);
}

#[test]
fn reopen_during_close_resumes_without_refiring() {
    let (mut fx, mut page, rec, mut pump) = setup(TransitionConfig::default());
    open(&mut fx, &mut page, &mut pump);
    page.set_open_now(&mut fx.doc, false);
    pump.step(&mut fx.doc, &mut page);
    page.set_open_now(&mut fx.doc, true);
    assert!(page.snapshot().is_some());
    pump.run_until_settled(&mut fx.doc, &mut page, 60);
    assert_eq!(
        rec.phases(),
        [Enter, Entering, Entered, Exit, Exiting, Enter, Entering, Entered]
    );
    assert_eq!(rec.count(Exited), 0);
}

#[test]
fn flips_in_one_tick_collapse_to_one_driver() {
    let (mut fx, mut page, rec, mut pump) = setup(TransitionConfig::default());
    page.set_open(true);
    page.set_open(false);
    page.set_open(true);
    assert!(rec.phases().is_empty());
    assert!(page.commit(&mut fx.doc));
    pump.run_until_settled(&mut fx.doc, &mut page, 60);
    assert_eq!(rec.phases(), [Enter, Entering, Entered]);
}

#[test]
fn flips_that_cancel_out_start_nothing() {
    let (mut fx, mut page, rec, mut pump) = setup(TransitionConfig::default());
    page.set_open(true);
    page.set_open(false);
    pump.step(&mut fx.doc, &mut page);
    assert!(rec.phases().is_empty());
    assert!(!page.wants_frame());
}

#[test]
fn uncommitted_input_is_committed_by_the_next_frame() {
    let (mut fx, mut page, rec, mut pump) = setup(TransitionConfig::default());
    page.set_open(true);
    pump.frame(&mut fx.doc, &mut page);
    assert_eq!(rec.phases(), [Enter]);
    pump.run_until_settled(&mut fx.doc, &mut page, 60);
    assert_eq!(rec.last(), Some(Entered));
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

#[test]
fn collapsed_offsets_add_up_to_backdrop_height() {
    let (mut fx, mut page, _, _) = setup(TransitionConfig::default());
    page.set_open_now(&mut fx.doc, true);
    let snap = page.snapshot().copied().expect("snapshot at enter");
    assert_eq!(snap.collapsed_height, 80.0);
    assert_eq!(snap.expanded_height, 800.0);
    let sum = snap.collapsed_offset_top + snap.collapsed_offset_bottom + snap.collapsed_height;
    assert!((sum - 800.0).abs() < 1e-6, "sum = {sum}");
}

#[test]
fn enter_freezes_truncation_and_shows_layers() {
    let config = TransitionConfig::default()
        .z_index(30)
        .background_color("#fff");
    let (mut fx, mut page, _, _) = setup(config);
    page.set_open_now(&mut fx.doc, true);
    let area = fx.refs.truncation_area.expect("fixture has truncation area");
    let backdrop = fx.surfaces.backdrop;
    assert_eq!(fx.doc.style_str(area, StyleProperty::Height), Some("120px"));
    assert_eq!(fx.doc.style_str(area, StyleProperty::Overflow), Some("hidden"));
    assert_eq!(fx.doc.style_str(backdrop, StyleProperty::Display), Some("block"));
    assert_eq!(fx.doc.style_str(backdrop, StyleProperty::Opacity), Some("0"));
    assert_eq!(fx.doc.style_str(backdrop, StyleProperty::ZIndex), Some("30"));
    assert_eq!(fx.doc.style_str(backdrop, StyleProperty::BackgroundColor), Some("#fff"));
}

#[test]
fn priming_frame_applies_collapsed_look_without_transitions() {
    let (mut fx, mut page, _, mut pump) = setup(TransitionConfig::default());
    page.set_open_now(&mut fx.doc, true);
    pump.frame(&mut fx.doc, &mut page);

    let s = fx.surfaces;
    let header = fx.refs.header.expect("header");
    let footer = fx.refs.footer.expect("footer");
    let style = |el, prop| fx.doc.style_str(el, prop).map(str::to_owned);

    assert_eq!(style(s.wrapper, StyleProperty::Transition).as_deref(), Some("none"));
    // 300 card top - 64 app bar.
    assert_eq!(
        style(s.wrapper, StyleProperty::Transform).as_deref(),
        Some("translate3d(0, 236px, 0)")
    );
    // 800 - 64 - 80.
    assert_eq!(
        style(s.bottom_overflow, StyleProperty::Transform).as_deref(),
        Some("translate3d(0, -656px, 0)")
    );
    assert_eq!(
        style(s.top_overflow, StyleProperty::Transform).as_deref(),
        Some("translate3d(0, 656px, 0)")
    );
    assert_eq!(style(s.shadow_area, StyleProperty::Transform).as_deref(), Some("scaleY(0.1)"));
    assert_eq!(
        style(header, StyleProperty::Transform).as_deref(),
        Some("translate3d(0, -40px, 0)")
    );
    assert_eq!(
        style(footer, StyleProperty::Transform).as_deref(),
        Some("translate3d(0, -676px, 0)")
    );
    assert!(fx.doc.running_transitions().is_empty());

    let snap = page.snapshot().copied().expect("snapshot");
    assert_eq!(snap.expanded_content_height, 1600.0);
    assert_eq!(snap.header_sentinel_y, Some(40.0));
}

#[test]
fn banded_zero_crop_leaves_content_in_place() {
    let config = TransitionConfig::default()
        .header_height(56.0)
        .footer_height(56.0)
        .crop(0.0);
    let (mut fx, mut page, _, mut pump) = setup(config);
    page.set_open_now(&mut fx.doc, true);
    pump.frame(&mut fx.doc, &mut page);
    assert_eq!(
        fx.doc.style_str(fx.surfaces.container, StyleProperty::Transform),
        Some("translate3d(0, 0px, 0)")
    );
}

#[test]
fn crop_wins_at_exit_and_scroll_wins_at_exiting() {
    let (mut fx, mut page, _, mut pump) = setup(TransitionConfig::default().crop(0.5));
    open(&mut fx, &mut page, &mut pump);
    fx.scroll_page(120.0);
    let container = fx.surfaces.container;

    page.set_open_now(&mut fx.doc, false);
    // 0.5 * (1600 - 80).
    assert_eq!(
        fx.doc.style_str(container, StyleProperty::Transform),
        Some("translate3d(0, -760px, 0)")
    );
    assert_eq!(page.snapshot().map(|s| s.scroll_top), Some(120.0));
    assert_eq!(fx.doc.scroll_top(fx.surfaces.backdrop), Some(0.0));

    pump.frame(&mut fx.doc, &mut page);
    assert_eq!(page.phase(), Exiting);
    assert_eq!(
        fx.doc.style_str(container, StyleProperty::Transform),
        Some("translate3d(0, -120px, 0)")
    );
    assert_eq!(fx.doc.scroll_top(fx.surfaces.backdrop), Some(0.0));
}

/// Where the page content is drawn: container translation minus the
/// backdrop's scroll offset.
fn content_offset(fx: &CardFixture) -> f64 {
    let translate = fx
        .doc
        .style_str(fx.surfaces.container, StyleProperty::Transform)
        .and_then(|t| t.strip_prefix("translate3d(0, "))
        .and_then(|t| t.strip_suffix("px, 0)"))
        .and_then(|y| y.parse::<f64>().ok())
        .unwrap_or(0.0);
    let scroll = fx.doc.scroll_top(fx.surfaces.backdrop).unwrap_or(0.0);
    translate - scroll
}

#[test]
fn closing_a_scrolled_page_keeps_content_in_place() {
    let (mut fx, mut page, _, mut pump) = setup(TransitionConfig::default());
    open(&mut fx, &mut page, &mut pump);
    fx.scroll_page(120.0);
    let before = content_offset(&fx);
    assert_eq!(before, -120.0);

    page.set_open_now(&mut fx.doc, false);
    assert_eq!(page.phase(), Exit);
    assert_eq!(content_offset(&fx), before);

    pump.frame(&mut fx.doc, &mut page);
    assert_eq!(page.phase(), Exiting);
    assert_eq!(content_offset(&fx), before);
}

// ---------------------------------------------------------------------------
// Resting states
// ---------------------------------------------------------------------------

#[test]
fn entered_clears_transforms_and_hides_list() {
    let (mut fx, mut page, _, mut pump) = setup(TransitionConfig::default());
    open(&mut fx, &mut page, &mut pump);
    let s = fx.surfaces;
    for el in [s.wrapper, s.bottom_overflow, s.top_overflow, s.container, s.shadow_area] {
        assert_eq!(fx.doc.style(el, StyleProperty::Transform), None);
        assert_eq!(fx.doc.style(el, StyleProperty::Transition), None);
    }
    assert_eq!(fx.doc.style_str(s.shadow_area, StyleProperty::Display), Some("none"));
    let scroll = fx.refs.scroll.expect("scroll");
    assert_eq!(fx.doc.style_str(scroll, StyleProperty::Display), Some("none"));
    let shadow = fx.refs.offset_header_shadow.expect("offset header shadow");
    assert_eq!(fx.doc.style_str(shadow, StyleProperty::Opacity), Some("0"));
}

#[test]
fn exited_restores_closed_baseline() {
    let (mut fx, mut page, _, mut pump) = setup(TransitionConfig::default().max_width(640.0));
    open(&mut fx, &mut page, &mut pump);
    close(&mut fx, &mut page, &mut pump);

    let s = fx.surfaces;
    assert_eq!(fx.doc.style_str(s.backdrop, StyleProperty::Display), Some("none"));
    assert_eq!(fx.doc.style_str(s.shadow_area, StyleProperty::Display), Some("none"));
    assert_eq!(fx.doc.style(s.wrapper, StyleProperty::MaxWidth), None);
    for el in [s.wrapper, s.container, s.backdrop] {
        assert_eq!(fx.doc.style(el, StyleProperty::Transform), None);
        assert_eq!(fx.doc.style(el, StyleProperty::Opacity), None);
    }
    let r = fx.refs;
    let decorated = [
        r.truncation_area,
        r.scroll,
        r.header,
        r.footer,
        r.footer_cover,
        r.offset_header_shadow,
    ];
    for el in decorated.into_iter().flatten() {
        for prop in [
            StyleProperty::Height,
            StyleProperty::Overflow,
            StyleProperty::Display,
            StyleProperty::Transform,
            StyleProperty::Opacity,
            StyleProperty::Transition,
        ] {
            assert_eq!(fx.doc.style(el, prop), None, "{el} {prop}");
        }
    }
    assert!(page.snapshot().is_none());
}

#[test]
fn second_cycle_remeasures() {
    let (mut fx, mut page, _, mut pump) = setup(TransitionConfig::default());
    open(&mut fx, &mut page, &mut pump);
    close(&mut fx, &mut page, &mut pump);

    let card = fx.card();
    fx.doc.set_rect(card, morph_core::geometry::Rect::new(0.0, 500.0, 400.0, 100.0));
    page.set_open_now(&mut fx.doc, true);
    let snap = page.snapshot().copied().expect("snapshot");
    assert_eq!(snap.collapsed_offset_top, 500.0);
    assert_eq!(snap.collapsed_height, 100.0);
    assert_eq!(snap.collapsed_offset_bottom, 200.0);
}

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

#[test]
fn play_uses_configured_transition() {
    let config =
        TransitionConfig::default().timeout(PhaseTiming::uniform(Duration::from_millis(400)));
    let (mut fx, mut page, _, mut pump) = setup(config);
    page.set_open_now(&mut fx.doc, true);
    pump.frame(&mut fx.doc, &mut page);
    pump.frame(&mut fx.doc, &mut page);
    assert_eq!(
        fx.doc.style_str(fx.surfaces.wrapper, StyleProperty::Transition),
        Some("transform 400ms ease-out, opacity 400ms ease-out")
    );
    assert!(page.wants_frame());
}

#[test]
fn missing_transitionend_settles_on_deadline() {
    let fx = CardFixture::new();
    let mut fx = fx;
    let mut page = fx.page(TransitionConfig::default());
    let rec = LifecycleRecorder::attach(&mut page);
    let mut pump = FramePump::new().deliver_transition_ends(false);

    page.set_open_now(&mut fx.doc, true);
    pump.run_until_settled(&mut fx.doc, &mut page, 100);
    assert_eq!(rec.phases(), [Enter, Entering, Entered]);
    // Play ran at 32ms; deadline is 32 + 300 + 50.
    assert!(pump.now() >= Duration::from_millis(382));
    assert!(pump.now() < Duration::from_millis(382 + 16));
}

#[test]
fn reduced_motion_completes_on_play_frame() {
    let (mut fx, mut page, rec, mut pump) = setup(TransitionConfig::default().reduced_motion(true));
    page.set_open_now(&mut fx.doc, true);
    assert_eq!(pump.run_until_settled(&mut fx.doc, &mut page, 60), 2);
    assert!(fx.doc.running_transitions().is_empty());
    page.set_open_now(&mut fx.doc, false);
    assert_eq!(pump.run_until_settled(&mut fx.doc, &mut page, 60), 2);
    assert_eq!(rec.phases(), [Enter, Entering, Entered, Exit, Exiting, Exited]);
}

#[test]
fn reduced_motion_can_be_ignored() {
    let config = TransitionConfig::default()
        .reduced_motion(true)
        .respect_reduced_motion(false);
    assert_eq!(
        config.transition_css(morph_widgets::Direction::Open),
        "transform 300ms ease-out, opacity 300ms ease-out"
    );
}

// ---------------------------------------------------------------------------
// Degraded inputs
// ---------------------------------------------------------------------------

#[test]
fn missing_references_are_skipped() {
    let mut fx = CardFixture::bare();
    let mut page = fx.page(TransitionConfig::default());
    let rec = LifecycleRecorder::attach(&mut page);
    let mut pump = FramePump::new();
    open(&mut fx, &mut page, &mut pump);
    close(&mut fx, &mut page, &mut pump);
    assert_eq!(rec.phases(), [Enter, Entering, Entered, Exit, Exiting, Exited]);
}

#[test]
fn unmounted_card_never_produces_nan() {
    let mut fx = CardFixture::new();
    fx.doc.unmount(fx.card());
    let mut page = fx.page(TransitionConfig::default().crop(0.3));
    let mut pump = FramePump::new();
    open(&mut fx, &mut page, &mut pump);
    close(&mut fx, &mut page, &mut pump);
    for write in fx.doc.writes() {
        let value = write.value.as_deref().unwrap_or_default();
        assert!(!value.contains("NaN") && !value.contains("inf"), "{write:?}");
    }
}

// ---------------------------------------------------------------------------
// Force operations, listeners, backdrop
// ---------------------------------------------------------------------------

#[test]
fn force_open_then_animated_close() {
    let (mut fx, mut page, rec, mut pump) = setup(TransitionConfig::default());
    page.force_open(&mut fx.doc);
    page.force_open(&mut fx.doc);
    assert_eq!(rec.phases(), [Entered]);
    assert!(page.is_open());
    close(&mut fx, &mut page, &mut pump);
    assert_eq!(rec.phases(), [Entered, Exit, Exiting, Exited]);
}

#[test]
fn force_close_mid_open_discards_driver() {
    let (mut fx, mut page, rec, mut pump) = setup(TransitionConfig::default());
    page.set_open_now(&mut fx.doc, true);
    pump.frame(&mut fx.doc, &mut page);
    page.force_close(&mut fx.doc);
    pump.run_until_settled(&mut fx.doc, &mut page, 60);
    assert_eq!(rec.phases(), [Enter, Entering, Exited]);
    assert_eq!(fx.doc.style_str(fx.surfaces.backdrop, StyleProperty::Display), Some("none"));
}

#[test]
fn removed_listener_stops_receiving() {
    let (mut fx, mut page, mut rec, mut pump) = setup(TransitionConfig::default());
    page.set_open_now(&mut fx.doc, true);
    rec.detach(&mut page);
    assert_eq!(page.listener_count(), 0);
    pump.run_until_settled(&mut fx.doc, &mut page, 60);
    assert_eq!(rec.phases(), [Enter]);
}

#[test]
fn backdrop_click_is_forwarded_verbatim() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let (_, mut page, _, _) = setup(TransitionConfig::default());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    page.set_backdrop_click_handler(move |click| sink.borrow_mut().push(*click));
    let click = BackdropClick::primary(12.0, 700.0).with_modifiers(Modifiers::SHIFT);
    assert!(page.click_backdrop(click));
    page.clear_backdrop_click_handler();
    assert!(!page.click_backdrop(click));
    assert_eq!(*seen.borrow(), [click]);
}
