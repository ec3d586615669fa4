#![forbid(unsafe_code)]

//! Lifecycle capture for assertions.

use std::cell::RefCell;
use std::rc::Rc;

use morph_widgets::card_page::{CardPageTransition, ListenerId, Phase};

/// Records every phase a [`CardPageTransition`] emits.
#[derive(Debug, Clone, Default)]
pub struct LifecycleRecorder {
    phases: Rc<RefCell<Vec<Phase>>>,
    id: Option<ListenerId>,
}

impl LifecycleRecorder {
    /// Register a recorder on `page`.
    pub fn attach(page: &mut CardPageTransition) -> Self {
        let phases = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&phases);
        let id = page.add_listener(move |event| sink.borrow_mut().push(event.phase));
        Self {
            phases,
            id: Some(id),
        }
    }

    /// Unregister from `page`. Already recorded phases are kept.
    pub fn detach(&mut self, page: &mut CardPageTransition) {
        if let Some(id) = self.id.take() {
            page.remove_listener(id);
        }
    }

    /// Phases recorded so far.
    pub fn phases(&self) -> Vec<Phase> {
        self.phases.borrow().clone()
    }

    /// How many times `phase` was recorded.
    pub fn count(&self, phase: Phase) -> usize {
        self.phases.borrow().iter().filter(|p| **p == phase).count()
    }

    pub fn last(&self) -> Option<Phase> {
        self.phases.borrow().last().copied()
    }

    pub fn clear(&self) {
        self.phases.borrow_mut().clear();
    }
}
