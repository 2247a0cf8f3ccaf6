use crate::app::{App, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action_queue::{Action, ActionTx};

mod capture;
mod select_projects;
mod summary;
mod work_log;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

pub(super) fn handle_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    // The capture form sits on top of whatever view is showing.
    if app.capture.is_some() {
        capture::handle_capture_key(key, app, action_tx);
        return;
    }

    match app.current_view {
        View::SelectProjects => select_projects::handle_select_projects_key(key, app, action_tx),
        View::WorkLog => work_log::handle_work_log_key(key, app, action_tx),
        View::Summary => summary::handle_summary_key(key, app, action_tx),
    }
}
