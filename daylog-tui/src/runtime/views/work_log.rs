use crate::app::{App, View};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_work_log_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('n') | KeyCode::Char('a') => app.open_capture(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_item(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_item(),
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(item) = app.remove_selected_item() {
                app.set_status(format!("Deleted \"{}\"", item.description));
                enqueue_action(action_tx, Action::DeleteItem(item.id));
            }
        }
        KeyCode::Char('p') => {
            app.navigate_to(View::SelectProjects);
            if app.available_projects.is_empty() {
                enqueue_action(action_tx, Action::LoadLinearProjects);
            }
        }
        KeyCode::Char('i') => {
            app.set_status("Refreshing issues…".to_string());
            enqueue_action(action_tx, Action::FetchIssues);
        }
        KeyCode::Char('s') => enqueue_action(action_tx, Action::LoadSummary),
        _ => {}
    }
}
