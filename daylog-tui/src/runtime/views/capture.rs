use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_capture_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.capture_input_char(c)
        }
        KeyCode::Backspace => app.capture_backspace(),
        KeyCode::Left => app.capture_move_left(),
        KeyCode::Right => app.capture_move_right(),
        KeyCode::Up => app.capture_move_up(),
        KeyCode::Down => app.capture_move_down(),
        KeyCode::Enter => {
            let now = app.now();
            if let Some(item) = app.capture_confirm(now) {
                enqueue_action(action_tx, Action::UpsertItem(item));
            }
        }
        KeyCode::Esc => app.capture_cancel(),
        _ => {}
    }
}
