use super::utils::{clock_time, controls};
use super::*;
use crate::app::duration::format_duration;
use crate::app::mention::{render_segments, Segment};
use crate::types::WorkLogItem;

pub fn render_work_log(frame: &mut Frame, app: &App, body: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(body);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[0]);

    render_entries(frame, app, columns[0]);
    render_today_panel(frame, app, columns[1]);

    frame.render_widget(
        controls(&[
            ("n", "Log work"),
            ("↑↓/j/k", "Navigate"),
            ("d", "Delete"),
            ("p", "Projects"),
            ("i", "Refresh issues"),
            ("s", "Summary"),
            ("q", "Quit"),
        ]),
        rows[1],
    );
}

fn render_entries(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Today ({}) ", app.work_log.len()))
        .padding(Padding::horizontal(1));

    if app.work_log.is_empty() {
        let empty = Paragraph::new("Nothing logged yet. Press n to log a unit of work.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .work_log
        .iter()
        .map(|item| ListItem::new(entry_line(app, item)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(app.work_log_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn entry_line<'a>(app: &'a App, item: &'a WorkLogItem) -> Line<'a> {
    let mut spans = vec![Span::styled(
        format!("{} ", clock_time(item.timestamp, app.utc_offset)),
        Style::default().fg(Color::DarkGray),
    )];

    let tag = match (&item.project_id, &item.unplanned_reason) {
        (Some(project_id), _) => Span::styled(
            format!("[{}] ", app.project_name(project_id).unwrap_or("Unknown Project")),
            Style::default().fg(Color::Cyan),
        ),
        (None, reason) => Span::styled(
            format!("[Unplanned: {}] ", reason.as_deref().unwrap_or("Other")),
            Style::default().fg(Color::Magenta),
        ),
    };
    spans.push(tag);

    for segment in render_segments(&item.description, item.mentioned_issues.as_ref()) {
        spans.push(match segment {
            Segment::Text(text) => Span::raw(text),
            Segment::Link { label, .. } => Span::styled(
                format!("@{}", label),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        });
    }

    if let Some(minutes) = item.duration_minutes {
        spans.push(Span::styled(
            format!("  ({})", format_duration(minutes)),
            Style::default().fg(Color::DarkGray),
        ));
    }

    Line::from(spans)
}

fn render_today_panel(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![Line::from(Span::styled(
        "Focused projects",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for project in &app.focused_projects {
        let progress = project
            .progress
            .map(|p| format!(" {:.0}%", p * 100.0))
            .unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled("• ", Style::default().fg(Color::Cyan)),
            Span::raw(project.name.clone()),
            Span::styled(progress, Style::default().fg(Color::DarkGray)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Issues ({})", app.issues.len()),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for issue in &app.issues {
        let style = if issue.is_in_progress() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", issue.identifier), style),
            Span::styled(issue.title.clone(), Style::default().fg(Color::DarkGray)),
        ]));
    }

    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Plan ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(panel, area);
}
