use super::utils::{controls, with_cursor};
use super::*;

pub fn render_project_picker(frame: &mut Frame, app: &App, body: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Search input
            Constraint::Min(0),    // Project list
            Constraint::Length(3), // Controls
        ])
        .split(body);

    let search_box = Paragraph::new(with_cursor(&app.project_search_input))
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(search_box, chunks[0]);

    let items: Vec<ListItem> = app
        .filtered_projects
        .iter()
        .filter_map(|&index| app.available_projects.get(index))
        .map(|project| {
            let marker = if app.is_chosen(&project.id) {
                Span::styled("[x] ", Style::default().fg(Color::Green))
            } else {
                Span::styled("[ ] ", Style::default().fg(Color::DarkGray))
            };
            ListItem::new(Line::from(vec![
                marker,
                Span::raw(project.name.clone()),
                Span::styled(
                    format!("  {} · {:.0}%", project.state, project.progress * 100.0),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let title = format!(
        " Projects ({}/{}) · {} chosen ",
        app.filtered_projects.len(),
        app.available_projects.len(),
        app.chosen_project_ids.len()
    );
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .padding(Padding::horizontal(1)),
        )
        .highlight_style(Style::default().fg(Color::Yellow));

    let mut state = ListState::default().with_selected(
        (!app.filtered_projects.is_empty()).then_some(app.filtered_project_index),
    );
    frame.render_stateful_widget(list, chunks[1], &mut state);

    let enter = if app.day_plan_id.is_some() {
        "Update projects"
    } else {
        "Start the day"
    };
    frame.render_widget(
        controls(&[
            ("Type", "Filter"),
            ("↑↓", "Navigate"),
            ("Tab", "Toggle"),
            ("Enter", enter),
            ("Ctrl+R", "Reload"),
            ("Esc", "Back"),
        ]),
        chunks[2],
    );
}
