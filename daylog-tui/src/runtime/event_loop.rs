use crate::api::ApiClient;
use crate::app::App;
use crate::session_store::{Clock, SessionStore, Storage};
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

use super::action_queue::{background_channel, channel, Action};
use super::actions::{apply_background_event, run_action, ActionContext};
use super::views::handle_key;

pub async fn run_app<S: Storage, C: Clock>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: ApiClient,
    store: SessionStore<S, C>,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();
    let (background_tx, mut background_rx) = background_channel();
    let mut ctx = ActionContext::new(client, store, action_tx.clone(), background_tx);

    let _ = action_tx.send(Action::LoadDay);

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                handle_key(key, app, &action_tx);
            }
        }

        if let Some(reflection) = app.due_reflection(Instant::now()) {
            let _ = action_tx.send(Action::SaveReflection(reflection));
        }

        while let Ok(event) = background_rx.try_recv() {
            apply_background_event(event, app);
        }

        while let Ok(action) = action_rx.try_recv() {
            run_action(action, app, &mut ctx).await?;
        }

        if !app.running {
            break;
        }
    }

    // Quitting mid-debounce still saves the last edit.
    if app.reflection_debounce.is_pending() {
        app.reflection_debounce.cancel();
        let reflection = app.reflection_input.value.clone();
        run_action(Action::SaveReflection(reflection), app, &mut ctx).await?;
    }
    ctx.abort_issue_fetch();

    Ok(())
}
