//! Main TUI application state and logic
//!
//! Playback is driven entirely by an index into the precomputed trace:
//! stepping, pausing, and jumping only move the index and read the snapshot
//! attached to the step at that position.  Restart re-runs the simulator on
//! the same source, which by determinism yields the same trace.

use crate::simulator::simulate;
use crate::trace::{ConsoleLog, ExecutionStep, StateSnapshot};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Console,
    Stack,
    Queue,
    WebApis,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Stack,
            FocusedPane::Stack => FocusedPane::Queue,
            FocusedPane::Queue => FocusedPane::WebApis,
            FocusedPane::WebApis => FocusedPane::Console,
            FocusedPane::Console => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    /// The precomputed execution trace being replayed
    pub trace: Vec<ExecutionStep>,

    /// The source code being visualized
    pub source_code: String,

    /// Number of steps applied so far; the visible state is the snapshot of
    /// step `position - 1`, or empty containers at position 0
    pub position: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: super::panes::SourceScrollState,
    pub stack_scroll: usize,
    pub console_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app with the given trace and source code
    pub fn new(trace: Vec<ExecutionStep>, source_code: String) -> Self {
        App {
            trace,
            source_code,
            position: 0,
            focused_pane: FocusedPane::Source,
            source_scroll: super::panes::SourceScrollState {
                offset: 0,
                target_line_row: None,
            },
            stack_scroll: 0,
            console_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or_else(Instant::now),
        }
    }

    /// The step whose snapshot is currently displayed
    fn current_step(&self) -> Option<&ExecutionStep> {
        self.position.checked_sub(1).and_then(|i| self.trace.get(i))
    }

    fn current_snapshot(&self) -> Option<&StateSnapshot> {
        self.current_step().map(|s| &s.snapshot)
    }

    fn current_line(&self) -> Option<usize> {
        self.current_step().and_then(|s| s.line_number)
    }

    /// Console output accumulated over all applied steps
    ///
    /// Cloned per frame; traces are at most a few dozen steps
    fn console_logs(&self) -> Vec<ConsoleLog> {
        self.trace[..self.position]
            .iter()
            .flat_map(|s| s.console_logs.iter().cloned())
            .collect()
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Auto-play: advance one step per second
            if self.is_playing && self.last_play_time.elapsed() >= Duration::from_secs(1) {
                if self.step_forward() {
                    self.status_message = String::from("Playing...");
                } else {
                    self.is_playing = false;
                    self.status_message = String::from("Playback complete");
                }
                self.last_play_time = Instant::now();
            }

            // Poll with timeout so auto-play keeps ticking
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);
        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(pane_area);

        // Left column: Source (top) | Console (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        // Right column: Call Stack | Callback Queue | Web APIs
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(30),
                Constraint::Percentage(30),
            ])
            .split(columns[1]);

        super::panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            self.current_line(),
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        let logs = self.console_logs();
        super::panes::render_console_pane(
            frame,
            left_rows[1],
            &logs,
            self.focused_pane == FocusedPane::Console,
            &mut self.console_scroll,
        );

        let snapshot = self.current_snapshot().cloned().unwrap_or_default();

        super::panes::render_stack_pane(
            frame,
            right_rows[0],
            &snapshot.call_stack,
            self.focused_pane == FocusedPane::Stack,
            &mut self.stack_scroll,
        );

        super::panes::render_queue_pane(
            frame,
            right_rows[1],
            &snapshot.callback_queue,
            self.focused_pane == FocusedPane::Queue,
        );

        super::panes::render_webapi_pane(
            frame,
            right_rows[2],
            &snapshot.web_apis,
            self.focused_pane == FocusedPane::WebApis,
        );

        super::panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            self.position,
            self.trace.len(),
            self.is_playing,
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let mut stepped = 0;
                for _ in 0..n {
                    if self.step_forward() {
                        stepped += 1;
                    } else {
                        break;
                    }
                }
                self.status_message = format!("Stepped forward {} step(s)", stepped);
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                self.is_playing = false;
                if self.step_backward() {
                    self.status_message = String::from("Stepped backward");
                } else {
                    self.status_message = String::from("At start of trace");
                }
            }
            KeyCode::Right => {
                self.is_playing = false;
                if self.step_forward() {
                    self.status_message = self.describe_current();
                } else {
                    self.status_message = String::from("At end of trace");
                }
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Stack => {
                    self.stack_scroll = self.stack_scroll.saturating_sub(1);
                }
                FocusedPane::Console => {
                    self.console_scroll = self.console_scroll.saturating_sub(1);
                }
                _ => {}
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Stack => {
                    self.stack_scroll = self.stack_scroll.saturating_add(1);
                }
                FocusedPane::Console => {
                    self.console_scroll = self.console_scroll.saturating_add(1);
                }
                _ => {}
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play (200ms debounce against key repeat)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(Duration::from_secs(1))
                            .unwrap_or_else(Instant::now);
                        self.status_message = String::from("Playing...");
                    } else {
                        self.status_message = String::from("Paused");
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.position = self.trace.len();
                self.status_message = String::from("Jumped to end");
                self.console_scroll = usize::MAX;
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.position = 0;
                self.status_message = String::from("Jumped to start");
                self.console_scroll = 0;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                // Re-simulate and rewind; identical source gives an
                // identical trace
                self.is_playing = false;
                self.trace = simulate(&self.source_code);
                self.position = 0;
                self.console_scroll = 0;
                self.status_message = String::from("Restarted");
            }
            _ => {}
        }
    }

    /// Advance one step; false when already at the end
    fn step_forward(&mut self) -> bool {
        if self.position >= self.trace.len() {
            return false;
        }
        self.position += 1;
        self.console_scroll = usize::MAX;
        true
    }

    /// Rewind one step; false when already at the start
    fn step_backward(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    fn describe_current(&self) -> String {
        match self.current_step() {
            Some(step) => format!("[{}] {}", step.kind.label(), step.description),
            None => String::from("Ready!"),
        }
    }
}
