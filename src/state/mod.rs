//! The three visualized event loop containers
//!
//! - [`stack`]: the call stack (LIFO)
//! - [`queue`]: the callback queue (FIFO, microtasks jump the line)
//! - [`webapi`]: timers and promises "in flight" outside the call stack
//!
//! # Ownership
//!
//! The containers are exclusively owned and mutated by the simulator during
//! a single run.  Callers only ever read the immutable snapshots attached to
//! emitted steps, never the live containers.

pub mod queue;
pub mod stack;
pub mod webapi;
