//! Console pane rendering
//!
//! Accumulated console output of every step up to the current playback
//! position, one line per message.

use crate::trace::{ConsoleLog, LogKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the console pane
pub fn render_console_pane(
    frame: &mut Frame,
    area: Rect,
    logs: &[ConsoleLog],
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
        .title(" Console ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<Line> = logs
        .iter()
        .map(|log| {
            let message_style = match log.kind {
                LogKind::Log | LogKind::Info => Style::default().fg(DEFAULT_THEME.fg),
                LogKind::Warn => Style::default().fg(DEFAULT_THEME.secondary),
                LogKind::Error => Style::default().fg(DEFAULT_THEME.error),
                LogKind::Success => Style::default().fg(DEFAULT_THEME.success),
            };
            Line::from(vec![
                Span::styled("> ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(log.message.clone(), message_style),
            ])
        })
        .collect();

    // usize::MAX marks "pin to bottom" after a step
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let max_scroll = lines.len().saturating_sub(visible_height);
    *scroll = (*scroll).min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((*scroll as u16, 0));
    frame.render_widget(paragraph, area);
}
