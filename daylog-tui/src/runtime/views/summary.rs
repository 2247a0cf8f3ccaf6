use crate::app::{App, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_summary_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if app.editing_reflection {
        handle_reflection_key(key, app);
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('r') => app.editing_reflection = true,
        KeyCode::Char('s') => enqueue_action(action_tx, Action::LoadSummary),
        KeyCode::Char('e') => enqueue_action(action_tx, Action::CloseDay),
        KeyCode::Esc | KeyCode::Char('b') => app.navigate_to(View::WorkLog),
        _ => {}
    }
}

fn handle_reflection_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.reflection_input_char(c, Instant::now())
        }
        KeyCode::Backspace => app.reflection_backspace(Instant::now()),
        KeyCode::Left => app.reflection_input.move_left(),
        KeyCode::Right => app.reflection_input.move_right(),
        KeyCode::Home => app.reflection_input.home(),
        KeyCode::End => app.reflection_input.end(),
        KeyCode::Esc | KeyCode::Enter => app.editing_reflection = false,
        _ => {}
    }
}
