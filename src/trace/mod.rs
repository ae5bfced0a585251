//! Execution trace records
//!
//! This module defines the output contract of the simulator:
//! - [`ExecutionStep`]: one atomic, ordered record of a state transition
//! - [`StateSnapshot`]: value copy of the three visualized containers
//! - [`ConsoleLog`]: console output captured by a step
//!
//! Steps are immutable once emitted.  Replaying a trace front to back
//! reconstructs the full animated state history, which is exactly what the
//! TUI playback does.

use crate::state::queue::CallbackQueueEntry;
use crate::state::stack::CallStackEntry;
use crate::state::webapi::WebApiRegistration;

/// The kind of state transition a step records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Something was pushed onto the call stack
    FunctionCall,
    /// The top call stack entry returned and was popped
    FunctionReturn,
    /// A timer or promise was registered with the Web APIs
    WebApi,
    /// A callback moved from the Web APIs into the callback queue
    CallbackQueue,
    /// Standalone console output
    ConsoleLog,
}

impl StepKind {
    /// Short label for the status bar
    pub fn label(self) -> &'static str {
        match self {
            StepKind::FunctionCall => "call",
            StepKind::FunctionReturn => "return",
            StepKind::WebApi => "web-api",
            StepKind::CallbackQueue => "queue",
            StepKind::ConsoleLog => "console",
        }
    }
}

/// Severity of a console message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Log,
    Info,
    Warn,
    Error,
    Success,
}

/// A console message captured while a step executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLog {
    pub id: usize,
    pub message: String,
    pub kind: LogKind,
}

/// Value copy of the call stack, callback queue, and Web API registrations
/// at the instant a step completed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateSnapshot {
    pub call_stack: Vec<CallStackEntry>,
    pub callback_queue: Vec<CallbackQueueEntry>,
    pub web_apis: Vec<WebApiRegistration>,
}

/// One ordered, immutable execution step
///
/// `id` is monotonically increasing within a run and reset per run, so two
/// simulations of the same source produce identical traces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionStep {
    pub id: usize,
    pub kind: StepKind,
    pub description: String,
    pub line_number: Option<usize>,
    pub snapshot: StateSnapshot,
    pub console_logs: Vec<ConsoleLog>,
}
