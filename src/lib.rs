//! # Introduction
//!
//! looptty simulates how a small subset of JavaScript interleaves synchronous
//! statements, timer callbacks, and promise microtasks, producing an ordered
//! trace of execution steps.  Each step carries an immutable snapshot of the
//! call stack, the callback queue, and the Web API registrations at that
//! instant.  The trace is then replayed forward and backward through a
//! terminal UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Block Identifier → Sync Pass → Callback Drain → Trace → TUI
//! ```
//!
//! 1. [`simulator`] — identifies function declarations and callback regions,
//!    classifies statements line by line, and emits [`trace::ExecutionStep`]s
//!    across a synchronous pass and a callback drain pass.
//! 2. [`state`] — the three visualized containers: the
//!    [`state::stack::CallStack`], the [`state::queue::CallbackQueue`], and
//!    the [`state::webapi::WebApiList`].
//! 3. [`trace`] — step records with per-step state snapshots and captured
//!    console output.
//! 4. [`samples`] — built-in example programs covering timers, promises, and
//!    nested function calls.
//! 5. [`ui`] — the ratatui playback interface; not part of the stable
//!    library API.
//!
//! ## Supported JavaScript subset
//!
//! Sequential `console.log` with a string literal, zero-argument user
//! function declarations and calls, `setTimeout`, `setInterval`
//! (registration only), and a single-level `Promise.resolve().then()`.
//! Everything else is silently ignored: the simulator never fails for any
//! input string, it only produces fewer steps.

pub mod samples;
pub mod simulator;
pub mod state;
pub mod trace;
pub mod ui;
