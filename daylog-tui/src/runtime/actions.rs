use crate::api::{ApiClient, ApiError};
use crate::app::{App, TextInput, View};
use crate::session_store::{Clock, SessionStore, Storage};
use crate::types::DayPlan;
use anyhow::Result;
use time::macros::format_description;
use time::{Date, UtcOffset};
use tokio::task::JoinHandle;

use super::action_queue::{Action, ActionTx, BackgroundEvent, BackgroundTx};

pub(super) struct ActionContext<S: Storage, C: Clock> {
    client: ApiClient,
    store: SessionStore<S, C>,
    action_tx: ActionTx,
    background_tx: BackgroundTx,
    issue_fetch: Option<JoinHandle<()>>,
}

impl<S: Storage, C: Clock> ActionContext<S, C> {
    pub(super) fn new(
        client: ApiClient,
        store: SessionStore<S, C>,
        action_tx: ActionTx,
        background_tx: BackgroundTx,
    ) -> Self {
        Self {
            client,
            store,
            action_tx,
            background_tx,
            issue_fetch: None,
        }
    }

    fn enqueue(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }

    pub(super) fn abort_issue_fetch(&mut self) {
        if let Some(handle) = self.issue_fetch.take() {
            handle.abort();
        }
    }

    /// Keeps the local copy of the work log in step with the app.
    fn cache_work_log(&self, app: &App) {
        if let Err(e) = self.store.save_work_log(&app.work_log) {
            tracing::warn!("failed to cache work log: {:#}", e);
        }
    }
}

pub(super) async fn run_action<S: Storage, C: Clock>(
    action: Action,
    app: &mut App,
    ctx: &mut ActionContext<S, C>,
) -> Result<()> {
    tracing::debug!("running action {:?}", action);

    match action {
        Action::LoadDay => load_day(app, ctx).await,
        Action::LoadLinearProjects => match ctx.client.get_linear_projects().await {
            Ok(projects) => app.set_available_projects(projects),
            Err(e) => report(app, "Could not load Linear projects", e),
        },
        Action::StartDay => start_day(app, ctx).await,
        Action::SyncProjects => sync_projects(app, ctx).await,
        Action::LoadPlanProjects => {
            let Some(id) = app.day_plan_id.clone() else {
                return Ok(());
            };
            match ctx.client.get_plan_projects(&id).await {
                Ok(projects) => {
                    app.set_focused_projects(projects);
                    ctx.enqueue(Action::FetchIssues);
                }
                Err(e) => report(app, "Could not load today's projects", e),
            }
        }
        Action::FetchIssues => fetch_issues(ctx),
        Action::UpsertItem(item) => {
            ctx.cache_work_log(app);
            if let Some(id) = app.day_plan_id.clone() {
                if let Err(e) = ctx.client.upsert_work_log_item(&id, &item).await {
                    report(app, "Could not save entry", e);
                }
            }
        }
        Action::DeleteItem(item_id) => {
            ctx.cache_work_log(app);
            if let Some(id) = app.day_plan_id.clone() {
                if let Err(e) = ctx.client.delete_work_log_item(&id, &item_id).await {
                    report(app, "Could not delete entry", e);
                }
            }
        }
        Action::LoadSummary => {
            let Some(id) = app.day_plan_id.clone() else {
                return Ok(());
            };
            match ctx.client.get_summary(&id).await {
                Ok(summary) => {
                    app.summary = Some(summary);
                    app.navigate_to(View::Summary);
                }
                Err(e) => report(app, "Could not load summary", e),
            }
        }
        Action::SaveReflection(reflection) => {
            if let Some(id) = app.day_plan_id.clone() {
                if let Err(e) = ctx.client.update_reflection(&id, &reflection).await {
                    report(app, "Could not save reflection", e);
                }
            }
        }
        Action::CloseDay => close_day(app, ctx).await?,
    }
    Ok(())
}

pub(super) fn apply_background_event(event: BackgroundEvent, app: &mut App) {
    match event {
        BackgroundEvent::IssuesLoaded(Ok(issues)) => app.set_issues(issues),
        BackgroundEvent::IssuesLoaded(Err(e)) => report(app, "Could not load issues", e),
    }
}

fn report(app: &mut App, what: &str, error: ApiError) {
    tracing::warn!("{}: {}", what, error);
    match error {
        ApiError::LinearNotConnected => app.set_status(error.to_string()),
        _ => app.set_status(format!("{}: {}", what, error)),
    }
}

/// Today's session pointer first, then the server's open plan.
async fn load_day<S: Storage, C: Clock>(app: &mut App, ctx: &mut ActionContext<S, C>) {
    let today = ctx.store.today();
    app.today = today;

    let from_session = match ctx.store.load_day_plan() {
        Ok(session) => session
            .filter(|s| s.plan_date == today)
            .map(|s| s.day_plan_id),
        Err(e) => {
            tracing::warn!("failed to read session: {:#}", e);
            None
        }
    };

    let plan = match from_session {
        Some(id) => match ctx.client.get_day_plan(&id).await {
            Ok(plan) => Some(plan),
            Err(ApiError::Server(message)) => {
                tracing::warn!("stored day plan {} is unavailable: {}", id, message);
                None
            }
            Err(e) => {
                // Session stays on disk for the next start.
                report(app, "Could not reach the server", e);
                return;
            }
        },
        None => match ctx.client.get_open_day_plan().await {
            Ok(plan) => plan,
            Err(e) => {
                report(app, "Could not reach the server", e);
                return;
            }
        },
    };

    match plan.filter(|plan| is_open_for(plan, today)) {
        Some(plan) => resume_day(app, ctx, plan).await,
        None => {
            if let Err(e) = ctx.store.clear() {
                tracing::warn!("failed to clear session: {:#}", e);
            }
            app.navigate_to(View::SelectProjects);
            ctx.enqueue(Action::LoadLinearProjects);
        }
    }
}

async fn resume_day<S: Storage, C: Clock>(
    app: &mut App,
    ctx: &mut ActionContext<S, C>,
    plan: DayPlan,
) {
    if let Err(e) = ctx.store.save_day_plan(&plan.id, app.today) {
        tracing::warn!("failed to write session: {:#}", e);
    }
    app.reflection_input = TextInput::with_value(plan.reflection.unwrap_or_default());

    let (items, fetch_error) = match ctx.client.get_work_log(&plan.id).await {
        Ok(items) => (items, None),
        Err(e) => {
            let cached = ctx.store.load_work_log().unwrap_or_else(|e| {
                tracing::warn!("failed to read cached work log: {:#}", e);
                Vec::new()
            });
            (cached, Some(e))
        }
    };

    app.day_plan_id = Some(plan.id);
    app.set_work_log(items);
    ctx.cache_work_log(app);
    app.navigate_to(View::WorkLog);
    if let Some(e) = fetch_error {
        report(app, "Showing cached work log", e);
    }
    ctx.enqueue(Action::LoadPlanProjects);
}

async fn start_day<S: Storage, C: Clock>(app: &mut App, ctx: &mut ActionContext<S, C>) {
    let chosen = app.chosen_projects();
    if chosen.is_empty() {
        app.set_status("Pick at least one project (Tab)".to_string());
        return;
    }

    let timezone = utc_offset_label(ctx.store.now().offset());
    let id = match ctx
        .client
        .start_day_plan(app.today, timezone, &chosen)
        .await
    {
        Ok(id) => id,
        Err(e) => {
            report(app, "Could not start the day", e);
            return;
        }
    };

    tracing::info!("started day plan {} with {} projects", id, chosen.len());
    if let Err(e) = ctx.store.save_day_plan(&id, app.today) {
        tracing::warn!("failed to write session: {:#}", e);
    }

    app.day_plan_id = Some(id);
    app.reflection_input = TextInput::new();
    app.set_work_log(Vec::new());
    ctx.cache_work_log(app);
    app.navigate_to(View::WorkLog);
    ctx.enqueue(Action::LoadPlanProjects);
}

async fn sync_projects<S: Storage, C: Clock>(app: &mut App, ctx: &mut ActionContext<S, C>) {
    let Some(id) = app.day_plan_id.clone() else {
        ctx.enqueue(Action::StartDay);
        return;
    };

    let chosen = app.chosen_projects();
    match ctx.client.sync_projects(&id, &chosen).await {
        Ok(()) => {
            app.navigate_to(View::WorkLog);
            ctx.enqueue(Action::LoadPlanProjects);
        }
        Err(e) => report(app, "Could not update projects", e),
    }
}

/// Replaces any in-flight fetch; only the newest result reaches the app.
fn fetch_issues<S: Storage, C: Clock>(ctx: &mut ActionContext<S, C>) {
    ctx.abort_issue_fetch();

    let client = ctx.client.clone();
    let background_tx = ctx.background_tx.clone();
    ctx.issue_fetch = Some(tokio::spawn(async move {
        let result = client.get_linear_issues().await;
        let _ = background_tx.send(BackgroundEvent::IssuesLoaded(result));
    }));
}

async fn close_day<S: Storage, C: Clock>(
    app: &mut App,
    ctx: &mut ActionContext<S, C>,
) -> Result<()> {
    let Some(id) = app.day_plan_id.clone() else {
        return Ok(());
    };

    app.reflection_debounce.cancel();
    let reflection = app.closing_reflection();
    if let Err(e) = ctx.client.close_day_plan(&id, reflection.as_deref()).await {
        report(app, "Could not close the day", e);
        return Ok(());
    }
    tracing::info!("closed day plan {}", id);

    ctx.store.clear()?;
    ctx.abort_issue_fetch();

    match ctx.client.get_summary(&id).await {
        Ok(summary) => app.share_text_on_exit = Some(summary.share_text),
        Err(e) => tracing::warn!("summary unavailable after close: {}", e),
    }
    app.day_plan_id = None;
    app.quit();
    Ok(())
}

fn is_open_for(plan: &DayPlan, today: Date) -> bool {
    plan.is_open
        && Date::parse(&plan.plan_date, format_description!("[year]-[month]-[day]"))
            .map(|date| date == today)
            .unwrap_or(false)
}

/// `+02:00` style label sent as the plan's timezone.
fn utc_offset_label(offset: UtcOffset) -> Option<String> {
    offset
        .format(format_description!(
            "[offset_hour sign:mandatory]:[offset_minute]"
        ))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, offset};

    fn plan(plan_date: &str, is_open: bool) -> DayPlan {
        DayPlan {
            id: "plan-1".to_string(),
            plan_date: plan_date.to_string(),
            is_open,
            reflection: None,
        }
    }

    #[test]
    fn only_todays_open_plan_is_resumed() {
        let today = date!(2025 - 03 - 01);

        assert!(is_open_for(&plan("2025-03-01", true), today));
        assert!(!is_open_for(&plan("2025-02-28", true), today));
        assert!(!is_open_for(&plan("2025-03-01", false), today));
        assert!(!is_open_for(&plan("yesterday", true), today));
    }

    #[test]
    fn offset_labels() {
        assert_eq!(utc_offset_label(offset!(+2)).as_deref(), Some("+02:00"));
        assert_eq!(utc_offset_label(offset!(-5:30)).as_deref(), Some("-05:30"));
        assert_eq!(utc_offset_label(UtcOffset::UTC).as_deref(), Some("+00:00"));
    }
}
