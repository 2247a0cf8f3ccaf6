use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    models::{
        FocusedProject, IssueListing, IssueQuery, ProjectListing, TaskSource, UnifiedProject,
    },
    ports::{inbound::IssueTrackerService, outbound::IssueTrackerClient},
    IssueTrackerError,
};

/// Implementation of the IssueTrackerService inbound port.
pub struct IssueTrackerServiceImpl<C> {
    client: Arc<C>,
}

impl<C: IssueTrackerClient> IssueTrackerServiceImpl<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C: IssueTrackerClient> IssueTrackerService for IssueTrackerServiceImpl<C> {
    async fn list_projects(&self) -> Result<ProjectListing, IssueTrackerError> {
        let connected = self.client.is_user_connection();

        // A static API key is not a user, so there is no one to report.
        let user = if connected {
            Some(self.client.get_viewer().await?)
        } else {
            None
        };
        let projects = self.client.get_projects().await?;

        Ok(ProjectListing {
            user,
            projects,
            connected,
        })
    }

    async fn list_assigned_issues(
        &self,
        query: &IssueQuery,
    ) -> Result<IssueListing, IssueTrackerError> {
        self.client.get_assigned_issues(query).await
    }

    async fn unify_projects(
        &self,
        focused: &[FocusedProject],
    ) -> Result<Vec<UnifiedProject>, IssueTrackerError> {
        if !focused.iter().any(|p| p.source == TaskSource::Linear) {
            return Ok(UnifiedProject::merge(focused, &[]));
        }

        let live = self.client.get_projects().await?;
        Ok(UnifiedProject::merge(focused, &live))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::domain::models::{TrackerIssue, TrackerProject, TrackerUser};

    struct FakeTracker {
        oauth: bool,
        project_calls: AtomicUsize,
    }

    impl FakeTracker {
        fn new(oauth: bool) -> Self {
            Self {
                oauth,
                project_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl IssueTrackerClient for FakeTracker {
        fn is_user_connection(&self) -> bool {
            self.oauth
        }

        async fn get_viewer(&self) -> Result<TrackerUser, IssueTrackerError> {
            Ok(TrackerUser {
                id: "u1".to_string(),
                name: Some("Ada".to_string()),
                email: None,
            })
        }

        async fn get_projects(&self) -> Result<Vec<TrackerProject>, IssueTrackerError> {
            self.project_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![TrackerProject {
                id: "alpha".to_string(),
                name: "Alpha (live)".to_string(),
                description: None,
                url: "https://linear.app/acme/project/alpha".to_string(),
                state: "started".to_string(),
                progress: 0.25,
                icon: None,
                color: None,
                target_date: None,
                start_date: None,
            }])
        }

        async fn get_assigned_issues(
            &self,
            _query: &IssueQuery,
        ) -> Result<IssueListing, IssueTrackerError> {
            Ok(IssueListing {
                user: None,
                issues: vec![TrackerIssue {
                    id: "i1".to_string(),
                    identifier: "ENG-1".to_string(),
                    title: "Fix".to_string(),
                    url: "https://linear.app/acme/issue/ENG-1".to_string(),
                    priority: None,
                    estimate: None,
                    state_name: None,
                    project_name: None,
                }],
            })
        }
    }

    #[tokio::test]
    async fn api_key_connections_report_no_user() {
        let service = IssueTrackerServiceImpl::new(Arc::new(FakeTracker::new(false)));
        let listing = service.list_projects().await.unwrap();

        assert!(!listing.connected);
        assert!(listing.user.is_none());
        assert_eq!(listing.projects.len(), 1);
    }

    #[tokio::test]
    async fn oauth_connections_report_the_viewer() {
        let service = IssueTrackerServiceImpl::new(Arc::new(FakeTracker::new(true)));
        let listing = service.list_projects().await.unwrap();

        assert!(listing.connected);
        assert_eq!(listing.user.map(|u| u.id).as_deref(), Some("u1"));
    }

    #[tokio::test]
    async fn unify_skips_the_tracker_without_linear_projects() {
        let tracker = Arc::new(FakeTracker::new(false));
        let service = IssueTrackerServiceImpl::new(tracker.clone());

        let app_only = [FocusedProject::new("local", TaskSource::App).with_name("Local")];
        let unified = service.unify_projects(&app_only).await.unwrap();
        assert_eq!(unified[0].name, "Local");
        assert_eq!(tracker.project_calls.load(Ordering::SeqCst), 0);

        let linear = [FocusedProject::new("alpha", TaskSource::Linear).with_name("Alpha")];
        let unified = service.unify_projects(&linear).await.unwrap();
        assert_eq!(unified[0].name, "Alpha (live)");
        assert_eq!(tracker.project_calls.load(Ordering::SeqCst), 1);
    }
}
