#![forbid(unsafe_code)]

//! Lifecycle phases and the observer list that reports them.

use std::fmt;

use morph_core::element::ElementId;

use crate::Direction;

/// One named step of the open/close lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Opening started; collapsed geometry measured, layers visible.
    Enter,
    /// Expanded layout primed; the morph is animating open.
    Entering,
    /// Fully open at rest.
    Entered,
    /// Closing started; content crop frozen at the current scroll.
    Exit,
    /// The morph is animating closed.
    Exiting,
    /// Fully closed at rest. The initial phase.
    #[default]
    Exited,
}

impl Phase {
    /// Every phase in lifecycle order.
    pub const ALL: [Phase; 6] = [
        Self::Enter,
        Self::Entering,
        Self::Entered,
        Self::Exit,
        Self::Exiting,
        Self::Exited,
    ];

    /// Direction of the driver that emits this phase.
    pub const fn direction(self) -> Direction {
        match self {
            Self::Enter | Self::Entering | Self::Entered => Direction::Open,
            Self::Exit | Self::Exiting | Self::Exited => Direction::Close,
        }
    }

    /// `Entered` or `Exited`.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Entered | Self::Exited)
    }

    /// Whether surfaces should look like the card (as opposed to the page).
    pub const fn is_collapsed_look(self) -> bool {
        matches!(self, Self::Enter | Self::Exiting)
    }

    /// Lowercase name (`"enter"`, `"exiting"`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enter => "enter",
            Self::Entering => "entering",
            Self::Entered => "entered",
            Self::Exit => "exit",
            Self::Exiting => "exiting",
            Self::Exited => "exited",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload delivered to lifecycle listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleEvent {
    /// The phase just reached.
    pub phase: Phase,
    /// The transition's root element (the backdrop).
    pub root: ElementId,
}

/// Handle returned by `add_listener`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// The raw id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

type Listener = Box<dyn FnMut(&LifecycleEvent)>;

/// Ordered observer list. Listeners run in registration order.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: impl FnMut(&LifecycleEvent) + 'static) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.push((id, Box::new(listener)));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn emit(&mut self, event: &LifecycleEvent) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.entries.len())
            .finish()
    }
}
