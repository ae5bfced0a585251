//! The simulation engine
//!
//! [`simulate`] is the single entry point: a pure function from source text
//! to an ordered step trace.  Each call builds a fresh [`Simulator`] so no
//! state persists between runs and identical inputs produce identical
//! traces.
//!
//! A run has two phases.  The synchronous pass scans top-level lines in
//! source order, emitting steps for recognized statements and collecting
//! pending async callbacks.  The drain pass then orders those callbacks
//! (microtasks first, then timers by ascending delay) and replays each
//! callback body through the same statement dispatch, emitting the
//! queue-transition and call-stack steps around it.
//!
//! The engine never fails.  Malformed braces, unterminated regions, and
//! unknown call targets are ordinary unrecognized statements that produce no
//! steps.

use crate::simulator::blocks::{self, CallbackRegion, FunctionDecl, FunctionTable};
use crate::simulator::statements::{self, Statement};
use crate::state::queue::{CallbackKind, CallbackQueue, CallbackQueueEntry};
use crate::state::stack::{CallStack, CallStackEntry};
use crate::state::webapi::{WebApiKind, WebApiList, WebApiRegistration};
use crate::trace::{ConsoleLog, ExecutionStep, LogKind, StateSnapshot, StepKind};

/// Simulate the given source text, returning the full ordered step trace
pub fn simulate(source: &str) -> Vec<ExecutionStep> {
    Simulator::new(source).run()
}

/// A callback collected during the synchronous pass, waiting to be drained
#[derive(Debug, Clone)]
struct PendingCallback {
    entry: CallbackQueueEntry,
    delay: u64,
    /// Registration to remove when this callback is handed to the queue
    web_api_id: usize,
}

/// Which construct's body is being replayed, controlling console message
/// extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallbackContext {
    Timer,
    Promise,
}

/// Single-run simulation state
///
/// Owns the three visualized containers exclusively for the duration of one
/// run; callers only see the snapshots attached to emitted steps.
struct Simulator<'a> {
    lines: Vec<&'a str>,
    functions: FunctionTable,
    timeout_regions: Vec<CallbackRegion>,
    promise_regions: Vec<CallbackRegion>,
    call_stack: CallStack,
    callback_queue: CallbackQueue,
    web_apis: WebApiList,
    pending: Vec<PendingCallback>,
    steps: Vec<ExecutionStep>,
    next_id: usize,
}

impl<'a> Simulator<'a> {
    fn new(source: &'a str) -> Self {
        let lines: Vec<&str> = source.lines().collect();
        let functions = FunctionTable::parse(&lines);
        let timeout_regions = blocks::find_timeout_regions(&lines);
        let promise_regions = blocks::find_promise_regions(&lines);

        Simulator {
            lines,
            functions,
            timeout_regions,
            promise_regions,
            call_stack: CallStack::new(),
            callback_queue: CallbackQueue::new(),
            web_apis: WebApiList::new(),
            pending: Vec::new(),
            steps: Vec::new(),
            next_id: 0,
        }
    }

    fn run(mut self) -> Vec<ExecutionStep> {
        self.synchronous_pass();
        self.drain_callbacks();
        self.steps
    }

    /// 1-based line access; indices always come from region/table bounds
    /// clamped to the source, so this never goes out of range
    fn line(&self, line_number: usize) -> &'a str {
        self.lines[line_number - 1]
    }

    fn alloc_id(&mut self) -> usize {
        self.next_id += 1;
        self.next_id
    }

    // === Synchronous pass ===

    fn synchronous_pass(&mut self) {
        for index in 0..self.lines.len() {
            let line_number = index + 1;
            let trimmed = self.lines[index].trim();
            if trimmed.is_empty() {
                continue;
            }

            // Lines inside function bodies and callback regions are replayed
            // later, not scanned here
            if self.functions.is_inside_body(line_number) {
                continue;
            }
            if self.in_region_interior(line_number) {
                continue;
            }

            match Statement::classify(trimmed) {
                Statement::SetTimeout => self.register_timeout(index),
                Statement::PromiseResolve => self.register_promise(index),
                Statement::ConsoleLog => self.sim_console_log(trimmed, line_number),
                Statement::SetInterval => self.register_interval(trimmed, line_number),
                Statement::Call(name) if self.functions.contains(name) => {
                    self.sim_function_call(name, line_number);
                }
                Statement::Call(_) | Statement::Other => {}
            }
        }
    }

    fn in_region_interior(&self, line_number: usize) -> bool {
        self.timeout_regions
            .iter()
            .chain(self.promise_regions.iter())
            .any(|r| r.contains_interior(line_number))
    }

    /// `setTimeout` is synchronous: it only registers the timer.  The
    /// callback is deferred into the pending list for the drain pass.
    fn register_timeout(&mut self, index: usize) {
        let line_number = index + 1;
        let delay = statements::timeout_delay(&self.lines, index);

        let frame_id = self.alloc_id();
        self.call_stack.push(CallStackEntry {
            id: frame_id,
            name: String::from("setTimeout"),
            line_number: Some(line_number),
        });
        self.emit(
            StepKind::FunctionCall,
            String::from("setTimeout() called - added to call stack"),
            Some(line_number),
            Vec::new(),
        );

        let web_api_id = self.alloc_id();
        self.web_apis.register(WebApiRegistration {
            id: web_api_id,
            name: format!("setTimeout({delay}ms)"),
            kind: WebApiKind::SetTimeout,
            time_remaining: Some(delay),
            line_number: Some(line_number),
        });
        self.call_stack.pop();
        self.emit(
            StepKind::WebApi,
            format!("setTimeout() executed - timer registered with Web APIs for {delay}ms"),
            Some(line_number),
            Vec::new(),
        );

        let entry = CallbackQueueEntry {
            id: self.alloc_id(),
            name: String::from("setTimeout callback"),
            kind: CallbackKind::Timeout,
            delay: Some(delay),
            // The setTimeout line, not the callback body line
            line_number: Some(line_number),
        };
        self.pending.push(PendingCallback {
            entry,
            delay,
            web_api_id,
        });
    }

    /// `Promise.resolve` registers immediately; its `.then` callback becomes
    /// a pending microtask
    fn register_promise(&mut self, index: usize) {
        let line_number = index + 1;

        let frame_id = self.alloc_id();
        self.call_stack.push(CallStackEntry {
            id: frame_id,
            name: String::from("Promise.resolve"),
            line_number: Some(line_number),
        });
        self.emit(
            StepKind::FunctionCall,
            String::from("Promise.resolve() called - added to call stack"),
            Some(line_number),
            Vec::new(),
        );

        let web_api_id = self.alloc_id();
        self.web_apis.register(WebApiRegistration {
            id: web_api_id,
            name: String::from("Promise resolution"),
            kind: WebApiKind::Other,
            time_remaining: Some(0),
            line_number: Some(line_number),
        });
        self.call_stack.pop();
        self.emit(
            StepKind::WebApi,
            String::from("Promise.resolve() executed - promise registered with Web APIs"),
            Some(line_number),
            Vec::new(),
        );

        // Without a paired .then there is no callback to schedule; the
        // registration simply stays in flight
        if let Some(region) = blocks::promise_region_after(&self.lines, index) {
            let entry = CallbackQueueEntry {
                id: self.alloc_id(),
                name: String::from("Promise.then callback"),
                kind: CallbackKind::Promise,
                delay: Some(0),
                line_number: Some(region.start_line),
            };
            self.pending.push(PendingCallback {
                entry,
                delay: 0,
                web_api_id,
            });
        }
    }

    /// Intervals register with the Web APIs but never fire in this model
    fn register_interval(&mut self, line: &str, line_number: usize) {
        let interval = statements::interval_delay(line);

        let frame_id = self.alloc_id();
        self.call_stack.push(CallStackEntry {
            id: frame_id,
            name: String::from("setInterval"),
            line_number: Some(line_number),
        });
        self.emit(
            StepKind::FunctionCall,
            String::from("setInterval() called - added to call stack"),
            Some(line_number),
            Vec::new(),
        );

        let web_api_id = self.alloc_id();
        self.web_apis.register(WebApiRegistration {
            id: web_api_id,
            name: format!("setInterval({interval}ms)"),
            kind: WebApiKind::SetInterval,
            time_remaining: Some(interval),
            line_number: Some(line_number),
        });
        self.call_stack.pop();
        self.emit(
            StepKind::WebApi,
            format!("setInterval() executed - timer registered with Web APIs (repeats every {interval}ms)"),
            Some(line_number),
            Vec::new(),
        );
    }

    /// Emit the call/return step pair for a `console.log`, with the console
    /// output attached to the call step
    fn sim_console_log(&mut self, line: &str, line_number: usize) {
        let message = statements::log_message(line);

        let frame_id = self.alloc_id();
        self.call_stack.push(CallStackEntry {
            id: frame_id,
            name: String::from("console.log"),
            line_number: Some(line_number),
        });
        let log = ConsoleLog {
            id: self.alloc_id(),
            message: message.clone(),
            kind: LogKind::Log,
        };
        self.emit(
            StepKind::FunctionCall,
            format!("Called console.log('{message}') - added to call stack"),
            Some(line_number),
            vec![log],
        );

        self.call_stack.pop();
        self.emit(
            StepKind::FunctionReturn,
            String::from("console.log executed and removed from call stack"),
            Some(line_number),
            Vec::new(),
        );
    }

    /// Emit a call step for a known zero-argument function, replay its body
    /// inline, then emit the matching return step
    fn sim_function_call(&mut self, name: &str, line_number: usize) {
        let frame_id = self.alloc_id();
        self.call_stack.push(CallStackEntry {
            id: frame_id,
            name: name.to_string(),
            line_number: Some(line_number),
        });
        self.emit(
            StepKind::FunctionCall,
            format!("Called {name}() - added to call stack"),
            Some(line_number),
            Vec::new(),
        );

        if let Some(decl) = self.functions.get(name) {
            self.replay_function_body(decl);
        }

        self.call_stack.pop();
        self.emit(
            StepKind::FunctionReturn,
            format!("{name}() completed - removed from call stack"),
            Some(line_number),
            Vec::new(),
        );
    }

    /// Replay a declared function body statement by statement, using each
    /// body line's own line number
    fn replay_function_body(&mut self, decl: FunctionDecl) {
        // Single-line body: the statement sits between the braces
        if decl.start_line == decl.end_line {
            let line = self.line(decl.start_line);
            if let Some(body) = statements::single_line_body(line) {
                self.replay_body_statement(body, decl.start_line);
            }
            return;
        }

        for line_number in decl.start_line..=decl.end_line {
            let mut trimmed = self.line(line_number).trim();
            if trimmed.starts_with("function") {
                continue;
            }
            // Process any code before a trailing close brace
            if let Some(stripped) = trimmed.strip_suffix('}') {
                trimmed = stripped.trim();
            }
            if trimmed.is_empty() {
                continue;
            }
            self.replay_body_statement(trimmed, line_number);
        }
    }

    /// Shared dispatch for replayed body lines.  Async-initiating statements
    /// are recognized at top level only; here they are skipped.
    fn replay_body_statement(&mut self, line: &str, line_number: usize) {
        match Statement::classify(line) {
            Statement::ConsoleLog => self.sim_console_log(line, line_number),
            Statement::Call(name) if self.functions.contains(name) => {
                self.sim_function_call(name, line_number);
            }
            _ => {}
        }
    }

    // === Callback drain pass ===

    fn drain_callbacks(&mut self) {
        let mut pending = std::mem::take(&mut self.pending);
        // Microtasks before timers regardless of delay; within a class,
        // lower delay first; ties keep source-encounter order (stable sort)
        pending.sort_by_key(|p| (!p.entry.kind.is_microtask(), p.delay));

        for callback in pending {
            match callback.entry.kind {
                CallbackKind::Promise => self.drain_promise(callback),
                _ => self.drain_timer(callback),
            }
        }
    }

    fn drain_promise(&mut self, callback: PendingCallback) {
        let line_number = callback.entry.line_number;
        let entry_id = callback.entry.id;
        let name = callback.entry.name.clone();

        // Microtasks jump to the front of the queue
        self.web_apis.remove(callback.web_api_id);
        self.callback_queue.push_front(callback.entry);
        self.emit(
            StepKind::CallbackQueue,
            String::from("Promise resolved in Web APIs - callback moved to microtask queue"),
            line_number,
            Vec::new(),
        );

        self.callback_queue.pop_front();
        self.call_stack.push(CallStackEntry {
            id: entry_id,
            name,
            line_number,
        });
        self.emit(
            StepKind::FunctionCall,
            String::from("Event loop moved Promise.then callback from microtask queue to call stack"),
            line_number,
            Vec::new(),
        );

        if let Some(start_line) = line_number.filter(|&n| n <= self.lines.len()) {
            if let Some(region) = blocks::promise_region_after(&self.lines, start_line - 1) {
                self.replay_callback_body(region, CallbackContext::Promise);
            }
        }

        self.call_stack.pop();
        self.emit(
            StepKind::FunctionReturn,
            String::from("Promise.then callback execution completed - removed from call stack"),
            line_number,
            Vec::new(),
        );
    }

    fn drain_timer(&mut self, callback: PendingCallback) {
        let line_number = callback.entry.line_number;
        let entry_id = callback.entry.id;
        let name = callback.entry.name.clone();
        let delay = callback.delay;

        self.web_apis.remove(callback.web_api_id);
        self.callback_queue.push_back(callback.entry);
        self.emit(
            StepKind::CallbackQueue,
            format!("Timer completed ({delay}ms) - callback moved to callback queue"),
            line_number,
            Vec::new(),
        );

        self.callback_queue.remove(entry_id);
        self.call_stack.push(CallStackEntry {
            id: entry_id,
            name,
            line_number,
        });
        self.emit(
            StepKind::FunctionCall,
            String::from("Event loop moved setTimeout callback from queue to call stack"),
            line_number,
            Vec::new(),
        );

        if let Some(start_line) = line_number {
            let region = self
                .timeout_regions
                .iter()
                .find(|r| r.start_line == start_line)
                .copied();
            if let Some(region) = region {
                self.replay_callback_body(region, CallbackContext::Timer);
            }
        }

        self.call_stack.pop();
        self.emit(
            StepKind::FunctionReturn,
            String::from("setTimeout callback execution completed - removed from call stack"),
            line_number,
            Vec::new(),
        );
    }

    /// Replay the inner lines of a callback body through the shared
    /// statement dispatch
    fn replay_callback_body(&mut self, region: CallbackRegion, context: CallbackContext) {
        for line_number in region.body_start_line..region.end_line {
            let trimmed = self.line(line_number).trim();
            if trimmed.is_empty() || trimmed.starts_with('}') {
                continue;
            }

            match Statement::classify(trimmed) {
                Statement::ConsoleLog => self.sim_callback_console_log(trimmed, line_number, context),
                Statement::Call(name) if self.functions.contains(name) => {
                    self.sim_function_call(name, line_number);
                }
                // Nested async constructs are out of scope for the
                // single-level model
                _ => {}
            }
        }
    }

    /// Like [`Self::sim_console_log`], but with callback-specific message
    /// extraction and descriptions
    fn sim_callback_console_log(
        &mut self,
        line: &str,
        line_number: usize,
        context: CallbackContext,
    ) {
        let (message, description) = match context {
            CallbackContext::Promise => {
                let message = statements::promise_log_message(line);
                let description =
                    format!("console.log({message}) called inside Promise.then - added to call stack");
                (message, description)
            }
            CallbackContext::Timer => {
                let message = statements::log_message(line);
                let description =
                    format!("console.log('{message}') called inside callback - added to call stack");
                (message, description)
            }
        };

        let frame_id = self.alloc_id();
        self.call_stack.push(CallStackEntry {
            id: frame_id,
            name: String::from("console.log"),
            line_number: Some(line_number),
        });
        let log = ConsoleLog {
            id: self.alloc_id(),
            message,
            kind: LogKind::Log,
        };
        self.emit(
            StepKind::FunctionCall,
            description,
            Some(line_number),
            vec![log],
        );

        self.call_stack.pop();
        self.emit(
            StepKind::FunctionReturn,
            String::from("console.log executed and removed from call stack"),
            Some(line_number),
            Vec::new(),
        );
    }

    // === Step emitter ===

    /// Append one step with a deep snapshot of all three containers as of
    /// this instant
    fn emit(
        &mut self,
        kind: StepKind,
        description: String,
        line_number: Option<usize>,
        console_logs: Vec<ConsoleLog>,
    ) {
        let id = self.alloc_id();
        self.steps.push(ExecutionStep {
            id,
            kind,
            description,
            line_number,
            snapshot: self.snapshot(),
            console_logs,
        });
    }

    fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            call_stack: self.call_stack.entries().to_vec(),
            callback_queue: self.callback_queue.snapshot(),
            web_apis: self.web_apis.registrations().to_vec(),
        }
    }
}
