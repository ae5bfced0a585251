//! Callback queue and Web API pane rendering
//!
//! The queue pane shows callbacks waiting for the event loop, front first;
//! promise callbacks are tinted differently since they jump the line.  The
//! Web API pane shows timers and promises still in flight.

use crate::state::queue::{CallbackKind, CallbackQueueEntry};
use crate::state::webapi::WebApiRegistration;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

fn kind_tag(kind: CallbackKind) -> &'static str {
    match kind {
        CallbackKind::Timeout => "timeout",
        CallbackKind::Interval => "interval",
        CallbackKind::Event => "event",
        CallbackKind::Promise => "microtask",
        CallbackKind::Other => "other",
    }
}

/// Render the callback queue pane, front of the queue first
pub fn render_queue_pane(
    frame: &mut Frame,
    area: Rect,
    entries: &[CallbackQueueEntry],
    is_focused: bool,
) {
    let block = Block::default()
        .title(format!(" Callback Queue ({}) ", entries.len()))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let mut lines: Vec<Line> = Vec::new();
    if entries.is_empty() {
        lines.push(Line::from(Span::styled(
            " (empty)",
            Style::default().fg(DEFAULT_THEME.comment),
        )));
    } else {
        for entry in entries {
            let name_style = if entry.kind.is_microtask() {
                Style::default().fg(DEFAULT_THEME.microtask)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            let mut spans = vec![
                Span::styled(format!(" {} ", entry.name), name_style),
                Span::styled(
                    format!("[{}]", kind_tag(entry.kind)),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            ];
            if let Some(delay) = entry.delay {
                spans.push(Span::styled(
                    format!(" {delay}ms"),
                    Style::default().fg(DEFAULT_THEME.number),
                ));
            }
            lines.push(Line::from(spans));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render the Web APIs pane, one line per live registration
pub fn render_webapi_pane(
    frame: &mut Frame,
    area: Rect,
    registrations: &[WebApiRegistration],
    is_focused: bool,
) {
    let block = Block::default()
        .title(format!(" Web APIs ({}) ", registrations.len()))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let mut lines: Vec<Line> = Vec::new();
    if registrations.is_empty() {
        lines.push(Line::from(Span::styled(
            " (idle)",
            Style::default().fg(DEFAULT_THEME.comment),
        )));
    } else {
        for registration in registrations {
            let mut spans = vec![Span::styled(
                format!(" {} ", registration.name),
                Style::default().fg(DEFAULT_THEME.primary),
            )];
            if let Some(line_number) = registration.line_number {
                spans.push(Span::styled(
                    format!("line {line_number}"),
                    Style::default().fg(DEFAULT_THEME.comment),
                ));
            }
            lines.push(Line::from(spans));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
