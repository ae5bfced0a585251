//! Call stack pane rendering
//!
//! Shows the call stack of the current step's snapshot, top frame first.
//! The top frame is the one "executing" and is drawn emphasized.

use crate::state::stack::CallStackEntry;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the call stack pane
pub fn render_stack_pane(
    frame: &mut Frame,
    area: Rect,
    entries: &[CallStackEntry],
    is_focused: bool,
    scroll: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" Call Stack ({}) ", entries.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut lines: Vec<Line> = Vec::new();
    if entries.is_empty() {
        lines.push(Line::from(Span::styled(
            " (empty)",
            Style::default().fg(DEFAULT_THEME.comment),
        )));
    } else {
        // Top of the stack first
        for (depth, entry) in entries.iter().rev().enumerate() {
            let is_top = depth == 0;
            let marker = if is_top { "▶ " } else { "  " };
            let name_style = if is_top {
                Style::default()
                    .fg(DEFAULT_THEME.function)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };

            let mut spans = vec![
                Span::styled(marker, Style::default().fg(DEFAULT_THEME.secondary)),
                Span::styled(format!("{}()", entry.name), name_style),
            ];
            if let Some(line_number) = entry.line_number {
                spans.push(Span::styled(
                    format!("  line {line_number}"),
                    Style::default().fg(DEFAULT_THEME.comment),
                ));
            }
            lines.push(Line::from(spans));
        }
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll = (*scroll).min(lines.len().saturating_sub(visible_height));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((*scroll as u16, 0));
    frame.render_widget(paragraph, area);
}
