//! Pane rendering for the playback UI

mod console;
mod queue;
mod source;
mod stack;
mod status;

pub use console::render_console_pane;
pub use queue::{render_queue_pane, render_webapi_pane};
pub use source::{render_source_pane, SourceScrollState};
pub use stack::render_stack_pane;
pub use status::render_status_bar;
