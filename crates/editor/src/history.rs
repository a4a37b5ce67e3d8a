//! Bounded snapshot undo/redo over whole-sample states.
//!
//! Every mutation commits the full new sample; `past` holds the states the
//! sample went through (oldest first, FIFO-evicted at the bound) and
//! `future` the states undone from, earliest first. A fresh commit forks
//! the timeline and clears `future`.

use std::collections::VecDeque;

use annotation::Sample;

pub struct History {
    present: Option<Sample>,
    past: VecDeque<Sample>,
    future: VecDeque<Sample>,
    max_entries: usize,
}

impl History {
    pub fn new(max_entries: usize) -> Self {
        Self {
            present: None,
            past: VecDeque::new(),
            future: VecDeque::new(),
            max_entries,
        }
    }

    pub fn present(&self) -> Option<&Sample> {
        self.present.as_ref()
    }

    /// Replace the tracked sample and drop both stacks. Used when the user
    /// navigates to a different sample: no cross-sample undo.
    pub fn reset(&mut self, sample: Option<Sample>) {
        self.past.clear();
        self.future.clear();
        self.present = sample;
        tracing::debug!("history reset");
    }

    /// Record the current state and make `new` current. Evicts the oldest
    /// past entry past the bound, silently. Clears redo: a new edit
    /// invalidates the undone branch.
    pub fn commit(&mut self, new: Sample) {
        if let Some(previous) = self.present.replace(new) {
            self.past.push_back(previous);
            while self.past.len() > self.max_entries {
                self.past.pop_front();
            }
        }
        self.future.clear();
        tracing::debug!(past = self.past.len(), "commit");
    }

    /// Step back one state. Returns the restored state, or `None` at the
    /// boundary.
    pub fn undo(&mut self) -> Option<&Sample> {
        let restored = self.past.pop_back()?;
        if let Some(current) = self.present.take() {
            self.future.push_front(current);
        }
        tracing::debug!(past = self.past.len(), future = self.future.len(), "undo");
        Some(self.present.insert(restored))
    }

    /// Step forward one undone state. Returns the restored state, or `None`
    /// at the boundary.
    pub fn redo(&mut self) -> Option<&Sample> {
        let restored = self.future.pop_front()?;
        if let Some(current) = self.present.take() {
            self.past.push_back(current);
        }
        tracing::debug!(past = self.past.len(), future = self.future.len(), "redo");
        Some(self.present.insert(restored))
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}
