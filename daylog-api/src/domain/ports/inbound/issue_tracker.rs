use async_trait::async_trait;

use crate::domain::{
    models::{FocusedProject, IssueListing, IssueQuery, ProjectListing, UnifiedProject},
    IssueTrackerError,
};

/// Inbound port for the issue tracker integration.
///
/// Created per request from the caller's credentials.
#[async_trait]
pub trait IssueTrackerService: Send + Sync + 'static {
    async fn list_projects(&self) -> Result<ProjectListing, IssueTrackerError>;

    async fn list_assigned_issues(&self, query: &IssueQuery)
        -> Result<IssueListing, IssueTrackerError>;

    /// Merge focused projects with live project metadata.
    async fn unify_projects(
        &self,
        focused: &[FocusedProject],
    ) -> Result<Vec<UnifiedProject>, IssueTrackerError>;
}
