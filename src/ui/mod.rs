//! Terminal UI for trace playback
//!
//! This module provides the ratatui-based interface:
//! - [`app`]: Application state, playback controls, and key handling
//! - [`panes`]: Rendering for the source, stack, queue, Web API, and
//!   console panes
//! - [`theme`]: Color scheme
//!
//! Playback only moves an index into the precomputed trace; it never
//! re-invokes the simulator except on restart.

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
