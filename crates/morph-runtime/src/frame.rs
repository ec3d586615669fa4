//! Host-driven animation frame queue.
//!
//! [`FrameQueue`] mirrors `requestAnimationFrame` semantics without owning
//! a clock: the host calls [`FrameQueue::begin_frame`] once per paint
//! opportunity and runs the returned tasks. A task requested while a frame
//! is being run lands in the *next* frame, exactly like a nested
//! `requestAnimationFrame` call, which is what makes the two-frame
//! "prime, then play" sequence of the transition drivers possible.
//!
//! # Invariants
//!
//! 1. Tasks run in request order.
//! 2. A task runs in the first frame that begins after it was requested.
//! 3. A cancelled task never runs; cancelling twice is harmless.

#![forbid(unsafe_code)]

use std::collections::VecDeque;

use web_time::Duration;

/// Handle returned by [`FrameQueue::request`], used to cancel the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

impl FrameHandle {
    /// The raw request id.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// The tasks due in one frame, together with the frame timestamp.
#[derive(Debug)]
pub struct Frame<T> {
    /// Host timestamp for this frame.
    pub now: Duration,
    /// Sequence number of this frame (1-based).
    pub index: u64,
    /// Tasks in request order.
    pub tasks: Vec<(FrameHandle, T)>,
}

/// Queue of tasks waiting for the next animation frame.
#[derive(Debug)]
pub struct FrameQueue<T> {
    next_handle: u64,
    frames_run: u64,
    pending: VecDeque<(FrameHandle, T)>,
}

impl<T> Default for FrameQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrameQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            frames_run: 0,
            pending: VecDeque::new(),
        }
    }

    /// Schedule `task` for the next frame.
    pub fn request(&mut self, task: T) -> FrameHandle {
        let handle = FrameHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push_back((handle, task));
        handle
    }

    /// Cancel a pending task, returning it if it had not run yet.
    pub fn cancel(&mut self, handle: FrameHandle) -> Option<T> {
        let pos = self.pending.iter().position(|(h, _)| *h == handle)?;
        tracing::trace!(message = "frame.cancel", handle = handle.0);
        self.pending.remove(pos).map(|(_, task)| task)
    }

    /// Cancel every pending task.
    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            tracing::trace!(message = "frame.cancel_all", count = self.pending.len());
        }
        self.pending.clear();
    }

    /// Number of tasks waiting for the next frame.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no task is waiting.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of frames begun so far.
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    /// Start a frame: take every task requested so far.
    ///
    /// Tasks requested after this call belong to the following frame.
    pub fn begin_frame(&mut self, now: Duration) -> Frame<T> {
        self.frames_run += 1;
        Frame {
            now,
            index: self.frames_run,
            tasks: std::mem::take(&mut self.pending).into(),
        }
    }
}
