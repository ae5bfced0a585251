//! Call stack implementation
//!
//! This module provides the call stack for the simulated run:
//! - [`CallStack`]: ordered LIFO sequence of entries
//! - [`CallStackEntry`]: a single activation record
//!
//! The top entry is the most recently pushed and represents the frame
//! currently "executing".  Entries are created on synchronous calls and
//! callback invocations, and destroyed on return.

/// A single call stack entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallStackEntry {
    pub id: usize,
    pub name: String,
    pub line_number: Option<usize>,
}

/// The call stack
#[derive(Debug, Clone, Default)]
pub struct CallStack {
    entries: Vec<CallStackEntry>,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack {
            entries: Vec::new(),
        }
    }

    /// Push a new entry onto the stack
    pub fn push(&mut self, entry: CallStackEntry) {
        self.entries.push(entry);
    }

    /// Pop the top entry
    pub fn pop(&mut self) -> Option<CallStackEntry> {
        self.entries.pop()
    }

    /// Get the current (top) entry
    pub fn top(&self) -> Option<&CallStackEntry> {
        self.entries.last()
    }

    /// Get all entries, bottom first
    pub fn entries(&self) -> &[CallStackEntry] {
        &self.entries
    }

    /// Get the depth of the stack
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Check if the stack is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
