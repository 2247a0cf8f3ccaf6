use async_trait::async_trait;

use crate::domain::{
    models::{IssueListing, IssueQuery, TrackerProject, TrackerUser},
    IssueTrackerError,
};

/// Outbound port for an issue tracker (Linear).
#[async_trait]
pub trait IssueTrackerClient: Send + Sync + 'static {
    /// Whether the credential is a user OAuth token rather than a static key.
    fn is_user_connection(&self) -> bool;

    async fn get_viewer(&self) -> Result<TrackerUser, IssueTrackerError>;

    async fn get_projects(&self) -> Result<Vec<TrackerProject>, IssueTrackerError>;

    async fn get_assigned_issues(&self, query: &IssueQuery)
        -> Result<IssueListing, IssueTrackerError>;
}
