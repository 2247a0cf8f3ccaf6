mod conversions;

use async_trait::async_trait;

use crate::domain::{
    models::{IssueListing, IssueQuery, TrackerProject, TrackerUser},
    ports::outbound::IssueTrackerClient,
    IssueTrackerError,
};

use self::conversions::{to_domain_issue, to_domain_project, to_domain_user, to_issue_filter};

/// Adapter that wraps the Linear client to implement the IssueTrackerClient port.
pub struct LinearAdapter {
    client: linear::LinearClient,
}

impl LinearAdapter {
    pub fn new(credentials: linear::Credentials, api_url: &str) -> Self {
        Self {
            client: linear::LinearClient::new(credentials).with_api_url(api_url),
        }
    }
}

fn map_error(err: linear::LinearError) -> IssueTrackerError {
    match err {
        linear::LinearError::NotConnected => IssueTrackerError::NotConnected,
        other => {
            tracing::error!("linear request failed: {}", other);
            IssueTrackerError::Provider(other.to_string())
        }
    }
}

#[async_trait]
impl IssueTrackerClient for LinearAdapter {
    fn is_user_connection(&self) -> bool {
        self.client.credentials().is_oauth()
    }

    async fn get_viewer(&self) -> Result<TrackerUser, IssueTrackerError> {
        let viewer = self.client.viewer().await.map_err(map_error)?;
        Ok(to_domain_user(viewer))
    }

    async fn get_projects(&self) -> Result<Vec<TrackerProject>, IssueTrackerError> {
        let projects = self.client.projects().await.map_err(map_error)?;
        Ok(projects.into_iter().map(to_domain_project).collect())
    }

    async fn get_assigned_issues(
        &self,
        query: &IssueQuery,
    ) -> Result<IssueListing, IssueTrackerError> {
        let assigned = self
            .client
            .assigned_issues(&to_issue_filter(query))
            .await
            .map_err(map_error)?;

        Ok(IssueListing {
            user: assigned.user.map(to_domain_user),
            issues: assigned.issues.into_iter().map(to_domain_issue).collect(),
        })
    }
}
