use crate::api::ApiError;
use crate::types::{Issue, WorkLogItem};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone)]
pub(super) enum Action {
    /// Resume today's plan or fall back to project selection.
    LoadDay,
    LoadLinearProjects,
    StartDay,
    SyncProjects,
    LoadPlanProjects,
    FetchIssues,
    UpsertItem(WorkLogItem),
    DeleteItem(String),
    LoadSummary,
    SaveReflection(String),
    CloseDay,
}

/// Results from work spawned off the event loop.
#[derive(Debug)]
pub(super) enum BackgroundEvent {
    IssuesLoaded(Result<Vec<Issue>, ApiError>),
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;
pub(super) type BackgroundTx = UnboundedSender<BackgroundEvent>;
pub(super) type BackgroundRx = UnboundedReceiver<BackgroundEvent>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}

pub(super) fn background_channel() -> (BackgroundTx, BackgroundRx) {
    mpsc::unbounded_channel()
}
