//! Status bar rendering

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the one-row status bar at the bottom of the screen
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    position: usize,
    total: usize,
    is_playing: bool,
) {
    let play_indicator = if is_playing { "▶ playing" } else { "⏸ paused" };

    let spans = vec![
        Span::styled(
            format!(" Step {position}/{total} "),
            Style::default()
                .fg(DEFAULT_THEME.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{play_indicator} "),
            Style::default().fg(if is_playing {
                DEFAULT_THEME.success
            } else {
                DEFAULT_THEME.secondary
            }),
        ),
        Span::styled(
            format!("| {message} "),
            Style::default().fg(DEFAULT_THEME.fg),
        ),
        Span::styled(
            "| ←/→ step  space play  1-9 step N  ⏎ end  ⌫ start  r restart  tab focus  q quit",
            Style::default().fg(DEFAULT_THEME.comment),
        ),
    ];

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
