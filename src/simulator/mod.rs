//! The code execution simulator
//!
//! This module turns source text into an ordered execution trace:
//! - [`blocks`]: function declaration table and callback region bounds
//! - [`statements`]: line classification and message/delay extraction
//! - [`engine`]: the synchronous pass, the callback drain pass, and the
//!   step emitter
//!
//! # Execution Model
//!
//! The simulator is a line-oriented, heuristic classifier over a tiny
//! JavaScript subset, not an interpreter.  It runs to completion in one
//! synchronous call and precomputes all "concurrency" (timers racing,
//! microtasks preempting macrotasks) into a static, deterministic step
//! ordering.  It never fails: unrecognized constructs simply produce no
//! steps.

pub mod blocks;
pub mod engine;
pub mod statements;

pub use engine::simulate;
