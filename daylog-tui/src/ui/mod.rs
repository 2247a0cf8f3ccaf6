use crate::app::{App, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
    Frame,
};

mod capture;
mod project_picker;
mod summary;
pub(super) mod utils;
mod work_log;

pub fn render(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, root[0], app);

    let body = root[1];
    match app.current_view {
        View::SelectProjects => project_picker::render_project_picker(frame, app, body),
        View::WorkLog => work_log::render_work_log(frame, app, body),
        View::Summary => summary::render_summary(frame, app, body),
    }

    render_status(frame, root[2], app);

    if app.capture.is_some() {
        capture::render_capture_overlay(frame, app);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = match app.current_view {
        View::SelectProjects => "Plan the day",
        View::WorkLog => "Work log",
        View::Summary => "Summary",
    };

    let mut spans = vec![
        Span::styled(
            " daylog ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(app.today.to_string(), Style::default().fg(Color::White)),
        Span::raw("  "),
        Span::styled(title, Style::default().fg(Color::Yellow)),
    ];
    if !app.focused_projects.is_empty() {
        spans.push(Span::styled(
            format!("  {} focused", app.focused_projects.len()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(message) = &app.status_message {
        let status = Paragraph::new(Span::styled(
            format!(" {}", message),
            Style::default().fg(Color::Yellow),
        ));
        frame.render_widget(status, area);
    }
}
