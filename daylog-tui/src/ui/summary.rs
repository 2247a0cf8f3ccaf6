use super::utils::{controls, with_cursor};
use super::*;
use crate::app::duration::format_duration;

pub fn render_summary(frame: &mut Frame, app: &App, body: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(7), // Totals
            Constraint::Min(0),    // Share text
            Constraint::Length(4), // Reflection
            Constraint::Length(3), // Controls
        ])
        .split(body);

    let Some(summary) = &app.summary else {
        frame.render_widget(Paragraph::new("Loading summary…"), rows[0]);
        return;
    };

    let mut totals = vec![Line::from(vec![
        Span::styled(
            format!("{} tasks", summary.total_tasks),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "  ·  {} total  ·  {} planned  ·  {} unplanned ({})",
            format_duration(summary.total_minutes),
            format_duration(summary.planned_minutes),
            format_duration(summary.unplanned_minutes),
            summary.unplanned_count,
        )),
    ])];
    for project in &summary.project_breakdown {
        totals.push(Line::from(vec![
            Span::styled("• ", Style::default().fg(Color::Cyan)),
            Span::raw(format!(
                "{}: {} tasks, {}",
                project.project_name,
                project.count,
                format_duration(project.minutes)
            )),
        ]));
    }
    frame.render_widget(
        Paragraph::new(totals).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Totals ")
                .padding(Padding::horizontal(1)),
        ),
        rows[0],
    );

    frame.render_widget(
        Paragraph::new(summary.share_text.clone())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Share ")
                    .padding(Padding::horizontal(1)),
            ),
        rows[1],
    );

    let (reflection, border) = if app.editing_reflection {
        (with_cursor(&app.reflection_input), Style::default().fg(Color::Yellow))
    } else if app.reflection_input.value.is_empty() {
        (
            "How did the day go? Press r to write.".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (app.reflection_input.value.clone(), Style::default().fg(Color::White))
    };
    let saving = if app.reflection_debounce.is_pending() {
        " Reflection · saving… "
    } else {
        " Reflection "
    };
    frame.render_widget(
        Paragraph::new(reflection).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(saving)
                .padding(Padding::horizontal(1)),
        ),
        rows[2],
    );

    frame.render_widget(
        controls(&[
            ("r", "Reflect"),
            ("s", "Refresh"),
            ("e", "End the day"),
            ("Esc", "Back"),
            ("q", "Quit"),
        ]),
        rows[3],
    );
}
