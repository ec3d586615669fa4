#![forbid(unsafe_code)]

//! The card/page phase state machine.
//!
//! # Drivers
//!
//! Committing a change of the desired state starts one driver. A driver
//! runs a synchronous step, then two animation-frame steps:
//!
//! | step | open | close |
//! |------|------|-------|
//! | sync | `Enter`: transitions off, layers shown, snapshot taken | `Exit`: transitions off, list restored, page scroll moved into the container transform |
//! | frame 1 (prime) | `Entering`: collapsed look applied without animating | `Exiting`: container switched to the scroll offset |
//! | frame 2 (play) | transitions on, identity look | transitions on, collapsed look |
//! | settle | `Entered`: inline transforms dropped, list hidden | `Exited`: closed baseline restored |
//!
//! Settling happens on the wrapper's `transitionend`, or on the first frame
//! after the transition deadline when that event never arrives.
//!
//! # Invariants
//!
//! 1. At most one driver is current. Starting a driver mints a new epoch
//!    and cancels the pending frame of the previous one.
//! 2. A stale continuation never writes a style or emits a phase.
//! 3. Each phase is emitted at most once per driver, in lifecycle order.
//! 4. A driver that interrupts another continues from the live styles
//!    rather than re-priming, so reversal never snaps.
//!
//! # Failure Modes
//!
//! - Missing element reference: the write that needs it is skipped.
//! - `transitionend` never delivered: the driver settles on the deadline
//!   and logs a warning.

use std::fmt;

use morph_backend::Document;
use morph_core::element::{ElementId, StyleProperty};
use morph_core::event::{BackdropClick, TransitionEnd};
use morph_core::{debug, trace, warn};
use morph_runtime::{
    EpochSource, EpochToken, FrameHandle, FrameQueue, TrackerStatus, TransitionTracker,
};
use web_time::Duration;

use super::config::TransitionConfig;
use super::lifecycle::{LifecycleEvent, ListenerId, Listeners, Phase};
use super::probe;
use super::snapshot::GeometrySnapshot;
use super::surface::{ElementRefs, SurfaceSet, Surfaces};
use super::transform;
use crate::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Prime,
    Play,
}

#[derive(Debug)]
struct Task {
    token: EpochToken,
    direction: Direction,
    step: Step,
}

type ClickHandler = Box<dyn FnMut(&BackdropClick)>;

/// Morphs a list card into a full-bleed page and back.
///
/// The host owns the document and the frame loop. It calls
/// [`on_animation_frame`](Self::on_animation_frame) from its
/// `requestAnimationFrame` callback and forwards the wrapper's
/// `transitionend` through [`on_transition_end`](Self::on_transition_end).
///
/// ```rust,ignore
/// let mut page = CardPageTransition::new(surfaces, refs, TransitionConfig::default());
/// page.add_listener(|ev| log_phase(ev.phase));
/// page.set_open_now(&mut doc, true);
/// // each paint:
/// page.on_animation_frame(&mut doc, now);
/// ```
pub struct CardPageTransition {
    surfaces: Surfaces,
    refs: ElementRefs,
    config: TransitionConfig,
    phase: Phase,
    desired: bool,
    committed: bool,
    resumed: bool,
    awaiting: bool,
    snapshot: Option<GeometrySnapshot>,
    epochs: EpochSource,
    frames: FrameQueue<Task>,
    pending_frame: Option<FrameHandle>,
    tracker: TransitionTracker,
    listeners: Listeners,
    backdrop_click: Option<ClickHandler>,
}

impl fmt::Debug for CardPageTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardPageTransition")
            .field("phase", &self.phase)
            .field("desired", &self.desired)
            .field("committed", &self.committed)
            .field("epoch", &self.epochs.current())
            .field("snapshot", &self.snapshot)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

impl CardPageTransition {
    /// Create a closed transition over `surfaces`.
    pub fn new(surfaces: Surfaces, refs: ElementRefs, config: TransitionConfig) -> Self {
        Self {
            surfaces,
            refs,
            config,
            phase: Phase::Exited,
            desired: false,
            committed: false,
            resumed: false,
            awaiting: false,
            snapshot: None,
            epochs: EpochSource::new(),
            frames: FrameQueue::new(),
            pending_frame: None,
            tracker: TransitionTracker::new(),
            listeners: Listeners::default(),
            backdrop_click: None,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The last emitted phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The desired state, committed or not.
    pub fn is_open(&self) -> bool {
        self.desired
    }

    /// Whether a driver has not yet settled.
    pub fn is_animating(&self) -> bool {
        !self.phase.is_terminal()
    }

    /// Geometry of the current cycle, `None` while closed.
    pub fn snapshot(&self) -> Option<&GeometrySnapshot> {
        self.snapshot.as_ref()
    }

    pub fn surfaces(&self) -> &Surfaces {
        &self.surfaces
    }

    pub fn refs(&self) -> &ElementRefs {
        &self.refs
    }

    /// Replace the element references. Takes effect at the next write.
    pub fn set_refs(&mut self, refs: ElementRefs) {
        self.refs = refs;
    }

    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect at the next driver step.
    pub fn set_config(&mut self, config: TransitionConfig) {
        self.config = config;
    }

    /// Whether a frame callback is waiting to run.
    pub fn wants_frame(&self) -> bool {
        !self.frames.is_empty() || self.awaiting || self.desired != self.committed
    }

    // -----------------------------------------------------------------------
    // Listeners
    // -----------------------------------------------------------------------

    /// Register a lifecycle listener.
    pub fn add_listener(&mut self, listener: impl FnMut(&LifecycleEvent) + 'static) -> ListenerId {
        self.listeners.add(listener)
    }

    /// Unregister a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Install the backdrop click handler, replacing any previous one.
    pub fn set_backdrop_click_handler(&mut self, handler: impl FnMut(&BackdropClick) + 'static) {
        self.backdrop_click = Some(Box::new(handler));
    }

    pub fn clear_backdrop_click_handler(&mut self) {
        self.backdrop_click = None;
    }

    /// Forward a click on the backdrop layer. Returns `true` if a handler
    /// received it.
    pub fn click_backdrop(&mut self, click: BackdropClick) -> bool {
        match self.backdrop_click.as_mut() {
            Some(handler) => {
                handler(&click);
                true
            }
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Record the desired state. Nothing happens until [`commit`](Self::commit).
    pub fn set_open(&mut self, open: bool) {
        self.desired = open;
    }

    /// Start a driver if the desired state differs from the committed one.
    ///
    /// Returns `true` when a driver was started.
    pub fn commit<D: Document + ?Sized>(&mut self, doc: &mut D) -> bool {
        if self.desired == self.committed {
            return false;
        }
        self.committed = self.desired;
        self.start(doc, Direction::from_open(self.desired));
        true
    }

    /// [`set_open`](Self::set_open) followed by [`commit`](Self::commit).
    pub fn set_open_now<D: Document + ?Sized>(&mut self, doc: &mut D, open: bool) -> bool {
        self.set_open(open);
        self.commit(doc)
    }

    /// Jump to the open resting state without animating.
    ///
    /// Supersedes any driver. Emits `Entered` if the phase changed.
    pub fn force_open<D: Document + ?Sized>(&mut self, doc: &mut D) {
        self.halt();
        self.desired = true;
        self.committed = true;
        if self.phase == Phase::Entered {
            return;
        }
        self.show_layers(doc);
        if self.snapshot.is_none() {
            self.snapshot = Some(GeometrySnapshot::capture_enter(
                doc,
                &self.surfaces,
                &self.refs,
                &self.config,
            ));
        }
        set_opt(doc, self.refs.offset_header_shadow, StyleProperty::Opacity, Some("0"));
        self.settle_open(doc);
    }

    /// Jump to the closed baseline without animating.
    ///
    /// Supersedes any driver. Emits `Exited` if the phase changed.
    pub fn force_close<D: Document + ?Sized>(&mut self, doc: &mut D) {
        self.halt();
        self.desired = false;
        self.committed = false;
        if self.phase == Phase::Exited {
            return;
        }
        self.settle_close(doc);
    }

    // -----------------------------------------------------------------------
    // Host callbacks
    // -----------------------------------------------------------------------

    /// Run the work scheduled for this animation frame.
    ///
    /// Takes the continuations requested before this frame, commits
    /// pending input (which may supersede them), runs whichever are still
    /// current, then checks the transition deadline.
    pub fn on_animation_frame<D: Document + ?Sized>(&mut self, doc: &mut D, now: Duration) {
        let frame = self.frames.begin_frame(now);
        self.pending_frame = None;
        self.commit(doc);
        for (_, task) in frame.tasks {
            if task.token.is_stale() {
                trace!(
                    epoch = %task.token.epoch(),
                    step = ?task.step,
                    "stale card_page continuation"
                );
                continue;
            }
            match (task.direction, task.step) {
                (Direction::Open, Step::Prime) => self.prime_open(doc, task.token),
                (Direction::Open, Step::Play) => self.play(doc, Direction::Open, now),
                (Direction::Close, Step::Prime) => self.prime_close(doc, task.token),
                (Direction::Close, Step::Play) => self.play(doc, Direction::Close, now),
            }
        }
        if self.awaiting && self.tracker.is_overdue(now) {
            warn!(
                phase = %self.phase,
                deadline = ?self.tracker.deadline(),
                "card_page transitionend missing, settling on deadline"
            );
            self.settle(doc);
        }
    }

    /// Deliver a `transitionend` from the host.
    pub fn on_transition_end<D: Document + ?Sized>(&mut self, doc: &mut D, event: TransitionEnd) {
        if !self.awaiting {
            return;
        }
        if self.tracker.end(&event) == TrackerStatus::Settled {
            self.settle(doc);
        }
    }

    // -----------------------------------------------------------------------
    // Drivers
    // -----------------------------------------------------------------------

    fn start<D: Document + ?Sized>(&mut self, doc: &mut D, direction: Direction) {
        if let Some(handle) = self.pending_frame.take() {
            self.frames.cancel(handle);
        }
        self.tracker.clear();
        self.awaiting = false;
        self.resumed = !self.phase.is_terminal();
        let token = self.epochs.advance();
        debug!(
            epoch = %token.epoch(),
            ?direction,
            resumed = self.resumed,
            "card_page driver start"
        );
        match direction {
            Direction::Open => self.enter(doc, token),
            Direction::Close => self.exit(doc, token),
        }
    }

    fn halt(&mut self) {
        self.epochs.invalidate();
        self.frames.cancel_all();
        self.pending_frame = None;
        self.tracker.clear();
        self.awaiting = false;
    }

    fn request(&mut self, token: EpochToken, direction: Direction, step: Step) {
        self.pending_frame = Some(self.frames.request(Task {
            token,
            direction,
            step,
        }));
    }

    fn enter<D: Document + ?Sized>(&mut self, doc: &mut D, token: EpochToken) {
        if !self.resumed {
            self.set_transitions(doc, Some("none"));
        }
        self.show_layers(doc);
        if !self.resumed {
            doc.set_style(self.surfaces.backdrop, StyleProperty::Opacity, Some("0"));
            doc.set_style(self.surfaces.shadow_area, StyleProperty::Opacity, Some("0"));
        }
        if !self.resumed || self.snapshot.is_none() {
            self.snapshot = Some(GeometrySnapshot::capture_enter(
                doc,
                &self.surfaces,
                &self.refs,
                &self.config,
            ));
        }
        if !self.resumed {
            self.freeze_truncation(doc);
        }
        self.emit(Phase::Enter);
        self.request(token, Direction::Open, Step::Prime);
    }

    fn prime_open<D: Document + ?Sized>(&mut self, doc: &mut D, token: EpochToken) {
        if !self.resumed {
            if let Some(snap) = self.snapshot.as_mut() {
                snap.capture_layout(doc, &self.refs);
            }
            self.apply_look(doc, Phase::Enter);
        }
        self.emit(Phase::Entering);
        self.request(token, Direction::Open, Step::Play);
    }

    fn exit<D: Document + ?Sized>(&mut self, doc: &mut D, token: EpochToken) {
        set_opt(doc, self.refs.scroll, StyleProperty::Display, None);
        if self.snapshot.is_none() {
            self.snapshot = Some(GeometrySnapshot::capture_enter(
                doc,
                &self.surfaces,
                &self.refs,
                &self.config,
            ));
        }
        if !self.resumed {
            self.set_transitions(doc, Some("none"));
            if let Some(snap) = self.snapshot.as_mut() {
                snap.capture_exit(doc, &self.surfaces);
            }
            // The container transform takes over the scroll offset.
            doc.set_scroll_top(self.surfaces.backdrop, 0.0);
            doc.set_style(self.surfaces.shadow_area, StyleProperty::Display, Some("block"));
            doc.set_style(self.surfaces.shadow_area, StyleProperty::Opacity, Some("1"));
            self.apply_look(doc, Phase::Exit);
        }
        self.emit(Phase::Exit);
        self.request(token, Direction::Close, Step::Prime);
    }

    fn prime_close<D: Document + ?Sized>(&mut self, doc: &mut D, token: EpochToken) {
        self.emit(Phase::Exiting);
        if !self.resumed
            && let Some(snap) = self.snapshot.as_ref()
        {
            let value = transform::container(Phase::Exiting, snap, &self.config);
            doc.set_style(self.surfaces.container, StyleProperty::Transform, value.as_deref());
        }
        self.request(token, Direction::Close, Step::Play);
    }

    fn play<D: Document + ?Sized>(&mut self, doc: &mut D, direction: Direction, now: Duration) {
        let css = self.config.transition_css(direction);
        self.set_transitions(doc, Some(css.as_str()));
        let (look, header_shadow) = match direction {
            Direction::Open => (Phase::Entering, "0"),
            Direction::Close => (Phase::Exiting, "1"),
        };
        self.apply_look(doc, look);
        set_opt(doc, self.refs.offset_header_shadow, StyleProperty::Opacity, Some(header_shadow));

        let duration = self.config.duration(direction);
        if duration.is_zero() {
            self.settle(doc);
            return;
        }
        self.tracker
            .begin(self.surfaces.wrapper, StyleProperty::Transform, now, duration);
        self.awaiting = true;
    }

    fn settle<D: Document + ?Sized>(&mut self, doc: &mut D) {
        self.tracker.clear();
        self.awaiting = false;
        match self.phase.direction() {
            Direction::Open => self.settle_open(doc),
            Direction::Close => self.settle_close(doc),
        }
    }

    fn settle_open<D: Document + ?Sized>(&mut self, doc: &mut D) {
        for (_, el) in self.surfaces.iter(SurfaceSet::all()) {
            doc.clear_style(el, StyleProperty::Transition);
            doc.clear_style(el, StyleProperty::Transform);
        }
        for (_, el) in self.surfaces.iter(SurfaceSet::FADING) {
            doc.clear_style(el, StyleProperty::Opacity);
        }
        doc.set_style(self.surfaces.shadow_area, StyleProperty::Display, Some("none"));
        set_opt(doc, self.refs.scroll, StyleProperty::Display, Some("none"));
        self.clear_ref_transitions(doc);
        for el in [self.refs.header, self.refs.footer] {
            set_opt(doc, el, StyleProperty::Transform, None);
        }
        set_opt(doc, self.refs.footer_cover, StyleProperty::Opacity, None);
        self.emit(Phase::Entered);
    }

    fn settle_close<D: Document + ?Sized>(&mut self, doc: &mut D) {
        self.surfaces.reset_to_baseline(doc);
        let refs = self.refs;
        set_opt(doc, refs.truncation_area, StyleProperty::Height, None);
        set_opt(doc, refs.truncation_area, StyleProperty::Overflow, None);
        self.clear_ref_transitions(doc);
        for el in [refs.header, refs.footer] {
            set_opt(doc, el, StyleProperty::Transform, None);
        }
        set_opt(doc, refs.footer_cover, StyleProperty::Opacity, None);
        set_opt(doc, refs.offset_header_shadow, StyleProperty::Opacity, None);
        set_opt(doc, refs.scroll, StyleProperty::Display, None);
        self.snapshot = None;
        self.emit(Phase::Exited);
    }

    // -----------------------------------------------------------------------
    // Style helpers
    // -----------------------------------------------------------------------

    fn show_layers<D: Document + ?Sized>(&self, doc: &mut D) {
        let backdrop = self.surfaces.backdrop;
        doc.set_style(backdrop, StyleProperty::Display, Some("block"));
        doc.set_style(self.surfaces.shadow_area, StyleProperty::Display, Some("block"));
        if let Some(z) = self.config.z_index {
            doc.set_style(backdrop, StyleProperty::ZIndex, Some(z.to_string().as_str()));
        }
        if let Some(color) = self.config.background_color.as_deref() {
            doc.set_style(backdrop, StyleProperty::BackgroundColor, Some(color));
        }
        if let Some(width) = self.config.max_width {
            let max_width = format!("{width}px");
            doc.set_style(self.surfaces.wrapper, StyleProperty::MaxWidth, Some(max_width.as_str()));
        }
    }

    fn freeze_truncation<D: Document + ?Sized>(&self, doc: &mut D) {
        let Some(area) = self.refs.truncation_area else {
            return;
        };
        if self.refs.truncation_content.is_none() {
            return;
        }
        let height = probe::rendered_height(doc, self.refs.truncation_content);
        doc.set_style(area, StyleProperty::Height, Some(format!("{height}px").as_str()));
        doc.set_style(area, StyleProperty::Overflow, Some("hidden"));
    }

    /// Caller elements that animate alongside the surfaces.
    fn decorations(&self) -> [Option<ElementId>; 4] {
        [
            self.refs.header,
            self.refs.footer,
            self.refs.footer_cover,
            self.refs.offset_header_shadow,
        ]
    }

    fn set_transitions<D: Document + ?Sized>(&self, doc: &mut D, value: Option<&str>) {
        self.surfaces.set_transition(doc, value);
        for el in self.decorations() {
            set_opt(doc, el, StyleProperty::Transition, value);
        }
    }

    fn clear_ref_transitions<D: Document + ?Sized>(&self, doc: &mut D) {
        for el in self.decorations() {
            set_opt(doc, el, StyleProperty::Transition, None);
        }
    }

    /// Write every per-surface value for `phase`.
    fn apply_look<D: Document + ?Sized>(&self, doc: &mut D, phase: Phase) {
        let Some(snap) = self.snapshot.as_ref() else {
            return;
        };
        let s = &self.surfaces;
        let config = &self.config;
        let writes = [
            (s.wrapper, transform::wrapper(phase, snap)),
            (s.bottom_overflow, transform::bottom_overflow(phase, snap)),
            (s.top_overflow, transform::top_overflow(phase, snap)),
            (s.container, transform::container(phase, snap, config)),
            (s.shadow_area, transform::shadow(phase, snap)),
        ];
        for (el, value) in writes {
            doc.set_style(el, StyleProperty::Transform, value.as_deref());
        }
        let opacity = transform::fade_opacity(phase);
        for (_, el) in s.iter(SurfaceSet::FADING) {
            doc.set_style(el, StyleProperty::Opacity, Some(opacity));
        }
        if let Some(header) = transform::header(phase, snap, config) {
            set_opt(doc, self.refs.header, StyleProperty::Transform, Some(header.as_str()));
        }
        if let Some(footer) = transform::footer(phase, snap, config) {
            set_opt(doc, self.refs.footer, StyleProperty::Transform, Some(footer.as_str()));
        }
        set_opt(
            doc,
            self.refs.footer_cover,
            StyleProperty::Opacity,
            Some(transform::footer_cover_opacity(phase)),
        );
    }

    fn emit(&mut self, phase: Phase) {
        self.phase = phase;
        let root = self.surfaces.backdrop;
        debug!(phase = %phase, root = %root, "card_page phase");
        self.listeners.emit(&LifecycleEvent { phase, root });
    }
}

fn set_opt<D: Document + ?Sized>(
    doc: &mut D,
    el: Option<ElementId>,
    prop: StyleProperty,
    value: Option<&str>,
) {
    if let Some(el) = el {
        doc.set_style(el, prop, value);
    }
}
