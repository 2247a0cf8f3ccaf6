use crate::app::{App, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_select_projects_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Up => app.select_previous_project(),
        KeyCode::Down => app.select_next_project(),
        KeyCode::Tab => app.toggle_highlighted_project(),
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            enqueue_action(action_tx, Action::LoadLinearProjects)
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_input_char(c)
        }
        KeyCode::Backspace => app.search_input_backspace(),
        KeyCode::Enter => {
            let action = if app.day_plan_id.is_some() {
                Action::SyncProjects
            } else {
                Action::StartDay
            };
            enqueue_action(action_tx, action);
        }
        KeyCode::Esc => {
            if app.day_plan_id.is_some() {
                app.navigate_to(View::WorkLog);
            } else {
                app.quit();
            }
        }
        _ => {}
    }
}
