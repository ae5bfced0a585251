//! Source code pane rendering with syntax highlighting
//!
//! Displays the JavaScript program being simulated with basic syntax
//! highlighting, line numbers, and a highlight on the line the current
//! execution step belongs to.  The highlighted line is kept at a fixed
//! visual row while stepping, like a debugger keeps its arrow in place.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Simple syntax highlighting for the supported JavaScript subset
fn highlight_source_line(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // Line comments
        if c == '/' && i + 1 < chars.len() && chars[i + 1] == '/' {
            if !current_word.is_empty() {
                spans.push(Span::raw(current_word.clone()));
                current_word.clear();
            }
            let rest: String = chars[i..].iter().collect();
            spans.push(Span::styled(
                rest,
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            break;
        }

        // String literals, all three JS quote styles
        if c == '\'' || c == '"' || c == '`' {
            if !current_word.is_empty() {
                spans.push(Span::raw(current_word.clone()));
                current_word.clear();
            }
            let quote = c;
            let mut end = i + 1;
            while end < chars.len() && chars[end] != quote {
                if chars[end] == '\\' {
                    end += 2;
                } else {
                    end += 1;
                }
            }
            if end < chars.len() {
                end += 1;
            }
            let text: String = chars[i..end.min(chars.len())].iter().collect();
            spans.push(Span::styled(
                text,
                Style::default().fg(DEFAULT_THEME.string),
            ));
            i = end;
            continue;
        }

        // Delimiters end the current word
        if !c.is_alphanumeric() && c != '_' && c != '.' {
            if !current_word.is_empty() {
                let is_func = c == '(';
                let style = word_style(&current_word, is_func);
                spans.push(Span::styled(current_word.clone(), style));
                current_word.clear();
            }

            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
                '=' | '>' | '<' | '+' | '-' | '*' | '/' | '!' | ';' | ',' => {
                    Style::default().fg(DEFAULT_THEME.fg)
                }
                _ => Style::default(),
            };

            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    if !current_word.is_empty() {
        let style = word_style(&current_word, false);
        spans.push(Span::styled(current_word, style));
    }

    Line::from(spans)
}

fn word_style(word: &str, is_function: bool) -> Style {
    match word {
        "function" | "return" | "const" | "let" | "var" | "if" | "else" | "new" | "async"
        | "await" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "console.log" | "setTimeout" | "setInterval" | "Promise.resolve" => {
            Style::default().fg(DEFAULT_THEME.function)
        }
        _ if word.chars().all(|c| c.is_ascii_digit()) && !word.is_empty() => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        _ => {
            if is_function {
                Style::default().fg(DEFAULT_THEME.function)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            }
        }
    }
}

/// Scroll state for the source pane
pub struct SourceScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    current_line: Option<usize>,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();

    // Account for borders, minimum one visible row
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if scroll_state.target_line_row.is_none() {
        scroll_state.target_line_row = Some(visible_height / 2);
    }
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(0)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Keep the current line at the target visual row
    if let Some(current) = current_line.filter(|&l| l > 0 && l <= total_lines) {
        scroll_state.offset = current.saturating_sub(1).saturating_sub(target_row);
        if total_lines > visible_height {
            scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
        } else {
            scroll_state.offset = 0;
        }
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = Some(line_num) == current_line;
            let line_num_str = format!("{:4} ", line_num);

            let (num_style, content_style) = if is_current {
                (
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                    Style::default().bg(DEFAULT_THEME.current_line_bg),
                )
            } else {
                (Style::default().fg(DEFAULT_THEME.comment), Style::default())
            };

            let mut content_line = highlight_source_line(line);
            if is_current {
                for span in &mut content_line.spans {
                    span.style = span.style.patch(content_style);
                }
            }

            let mut final_spans = vec![Span::styled(line_num_str, num_style)];
            final_spans.extend(content_line.spans);
            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
