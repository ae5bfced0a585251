//! Callback queue implementation
//!
//! The callback queue holds callbacks that are ready to run.  The event loop
//! consumes it in FIFO order, except promise callbacks (microtasks) are
//! inserted at the front, giving them priority over timer callbacks.  This
//! mirrors real event loop ordering at a coarse level.

use std::collections::VecDeque;

/// What scheduled a callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackKind {
    Timeout,
    Interval,
    Event,
    Promise,
    Other,
}

impl CallbackKind {
    /// Microtasks drain before any timer callback regardless of delay
    pub fn is_microtask(self) -> bool {
        matches!(self, CallbackKind::Promise)
    }
}

/// A callback waiting in the queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackQueueEntry {
    pub id: usize,
    pub name: String,
    pub kind: CallbackKind,
    pub delay: Option<u64>,
    pub line_number: Option<usize>,
}

/// The callback queue
#[derive(Debug, Clone, Default)]
pub struct CallbackQueue {
    entries: VecDeque<CallbackQueueEntry>,
}

impl CallbackQueue {
    pub fn new() -> Self {
        CallbackQueue {
            entries: VecDeque::new(),
        }
    }

    /// Enqueue a macrotask callback at the back
    pub fn push_back(&mut self, entry: CallbackQueueEntry) {
        self.entries.push_back(entry);
    }

    /// Enqueue a microtask callback at the front
    pub fn push_front(&mut self, entry: CallbackQueueEntry) {
        self.entries.push_front(entry);
    }

    /// Dequeue the front callback
    pub fn pop_front(&mut self) -> Option<CallbackQueueEntry> {
        self.entries.pop_front()
    }

    /// Remove a callback by id, wherever it sits
    pub fn remove(&mut self, id: usize) -> Option<CallbackQueueEntry> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        self.entries.remove(pos)
    }

    /// Get all entries front to back, as an owned list for snapshotting
    pub fn snapshot(&self) -> Vec<CallbackQueueEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Number of queued callbacks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
