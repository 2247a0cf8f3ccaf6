use crate::app::TextInput;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};
use time::{OffsetDateTime, UtcOffset};

/// `HH:MM` at the given offset.
pub fn clock_time(dt: OffsetDateTime, offset: UtcOffset) -> String {
    let local = dt.to_offset(offset);
    format!("{:02}:{:02}", local.hour(), local.minute())
}

/// Input text with a block cursor drawn at the caret.
pub fn with_cursor(input: &TextInput) -> String {
    let (before, after) = input.split_at_cursor();
    format!("{}█{}", before, after)
}

/// Bordered one-line key hint bar, `(key, description)` pairs.
pub fn controls(hints: &[(&str, &str)]) -> Paragraph<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (i, (key, description)) in hints.iter().enumerate() {
        spans.push(Span::styled(
            key.to_string(),
            Style::default().fg(Color::Yellow),
        ));
        let separator = if i + 1 < hints.len() { "  " } else { "" };
        spans.push(Span::raw(format!(": {}{}", description, separator)));
    }

    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(
                    " Controls ",
                    Style::default().fg(Color::DarkGray),
                ))
                .padding(Padding::horizontal(1)),
        )
}

/// Helper function to create a centered rectangle
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height.saturating_sub(height)) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((r.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((r.width.saturating_sub(width)) / 2),
        ])
        .split(popup_layout[1])[1]
}
