use super::utils::{centered_rect, with_cursor};
use super::*;
use crate::app::capture::{Capture, CaptureContext, CaptureStep, ACCEPT_OPTIONS, UNPLANNED_REASONS};

const HIGHLIGHT: Style = Style::new().fg(Color::Yellow);

pub fn render_capture_overlay(frame: &mut Frame, app: &App) {
    let Some(capture) = &app.capture else {
        return;
    };

    let area = centered_rect(72, 18, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(HIGHLIGHT)
        .title(Span::styled(" Log work ", HIGHLIGHT))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Description
            Constraint::Min(0),    // Step body
            Constraint::Length(1), // Error
            Constraint::Length(1), // Hints
        ])
        .split(inner);

    let description = match capture.step {
        CaptureStep::ProvideDescription => with_cursor(&capture.description),
        _ => capture.description.value.clone(),
    };
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled("What did you do?", Style::default().fg(Color::DarkGray))),
            Line::from(description),
        ]),
        rows[0],
    );

    let ctx = CaptureContext {
        issues: &app.issues,
        projects: &app.focused_projects,
    };
    let hints = match &capture.step {
        CaptureStep::ProvideDescription => {
            render_mentions(frame, rows[1], capture, ctx);
            "Enter: Next  @: Mention  Esc: Cancel"
        }
        CaptureStep::ProvideProject { selected, reason } => {
            match reason {
                Some(picker) => {
                    let mut lines = vec![Line::from("Why was this unplanned?")];
                    for (i, label) in UNPLANNED_REASONS.iter().enumerate() {
                        lines.push(option_line(label, i == picker.selected));
                    }
                    if picker.selected == UNPLANNED_REASONS.len() - 1 {
                        lines.push(Line::from(format!("  {}", with_cursor(&picker.other))));
                    }
                    frame.render_widget(Paragraph::new(lines), rows[1]);
                }
                None => {
                    let mut lines = vec![Line::from("Which project?")];
                    for (i, project) in app.focused_projects.iter().enumerate() {
                        lines.push(option_line(&project.name, i == *selected));
                    }
                    lines.push(option_line(
                        "Unplanned work",
                        *selected == app.focused_projects.len(),
                    ));
                    frame.render_widget(Paragraph::new(lines), rows[1]);
                }
            }
            "↑↓: Choose  Enter: Next  Esc: Cancel"
        }
        CaptureStep::Accept { selected } => {
            let target = match (&capture.project_id, &capture.unplanned_reason) {
                (Some(id), _) => app.project_name(id).unwrap_or("Unknown Project").to_string(),
                (None, Some(reason)) => format!("Unplanned ({})", reason),
                (None, None) => "Unplanned".to_string(),
            };
            let options: Vec<Span> = ACCEPT_OPTIONS
                .iter()
                .enumerate()
                .map(|(i, label)| {
                    if i == *selected {
                        Span::styled(format!("[{}]  ", label), HIGHLIGHT)
                    } else {
                        Span::raw(format!(" {}   ", label))
                    }
                })
                .collect();
            let lines = vec![
                Line::from(vec![
                    Span::styled("Project: ", Style::default().fg(Color::DarkGray)),
                    Span::raw(target),
                ]),
                Line::from(vec![
                    Span::styled("Duration: ", Style::default().fg(Color::DarkGray)),
                    Span::raw(with_cursor(&capture.duration)),
                    Span::styled("  e.g. 1h 30m", Style::default().fg(Color::DarkGray)),
                ]),
                Line::from(""),
                Line::from(options),
            ];
            frame.render_widget(Paragraph::new(lines), rows[1]);
            "←→: Choose  Enter: Log it  Esc: Cancel"
        }
    };

    if let Some(error) = &capture.error {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
            rows[2],
        );
    }
    frame.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Center),
        rows[3],
    );
}

fn render_mentions(frame: &mut Frame, area: Rect, capture: &Capture, ctx: CaptureContext<'_>) {
    let Some(dropdown) = &capture.dropdown else {
        return;
    };

    let options = capture.options(ctx);
    if options.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No matching issues or projects",
                Style::default().fg(Color::DarkGray),
            )),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = options
        .iter()
        .map(|option| {
            let label_style = if option.in_progress {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("@{} ", option.label), label_style),
                Span::styled(option.detail.clone(), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::TOP).title(" Mentions "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(dropdown.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn option_line(label: &str, selected: bool) -> Line<'static> {
    if selected {
        Line::from(Span::styled(format!("> {}", label), HIGHLIGHT))
    } else {
        Line::from(format!("  {}", label))
    }
}
