//! Router state backed by in-memory storage and a scripted tracker.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_extra::extract::CookieJar;
use url::Url;

use crate::{
    adapters::{
        inbound::http::{
            cookies::{http_only_cookie, ACCESS_TOKEN_COOKIE, TOKEN_MAX_AGE},
            IssueTrackerServiceError, IssueTrackerServiceFactory,
        },
        outbound::memory::InMemoryDayPlanRepository,
    },
    app_state::AppState,
    domain::{
        models::{
            FocusedProject, IssueListing, IssueQuery, ProjectListing, TrackerIssue,
            TrackerProject, TrackerUser, UnifiedProject,
        },
        ports::inbound::IssueTrackerService,
        services::DayPlanServiceImpl,
        IssueTrackerError, StateSealer,
    },
};

pub const TEST_STATE_KEY: &str = "ZGF5bG9nLWxvY2FsLWRldmVsb3BtZW50LXN0YXRlLWs=";
pub const STUB_AUTHORIZE_URL: &str = "https://linear.test/oauth/authorize";

pub fn test_state(factory: StubTrackerFactory) -> AppState {
    let service = DayPlanServiceImpl::new(Arc::new(InMemoryDayPlanRepository::default()));

    AppState::new(
        Url::parse("http://localhost:5173").unwrap(),
        "localhost".to_string(),
        Arc::new(service),
        Arc::new(factory),
        StateSealer::from_base64_key(TEST_STATE_KEY).unwrap(),
    )
}

/// Hands out a canned tracker when a token cookie is present.
#[derive(Clone, Default)]
pub struct StubTrackerFactory {
    connected: bool,
    projects: Vec<TrackerProject>,
    issues: Vec<TrackerIssue>,
    last_query: Arc<Mutex<Option<IssueQuery>>>,
}

impl StubTrackerFactory {
    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn connected(projects: Vec<TrackerProject>, issues: Vec<TrackerIssue>) -> Self {
        Self {
            connected: true,
            projects,
            issues,
            last_query: Arc::default(),
        }
    }

    pub fn last_query(&self) -> Option<IssueQuery> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl IssueTrackerServiceFactory for StubTrackerFactory {
    fn create_service(
        &self,
        jar: &CookieJar,
    ) -> Result<Box<dyn IssueTrackerService>, IssueTrackerServiceError> {
        if !self.connected || jar.get(ACCESS_TOKEN_COOKIE).is_none() {
            return Err(IssueTrackerServiceError::not_connected());
        }

        Ok(Box::new(StubTracker {
            projects: self.projects.clone(),
            issues: self.issues.clone(),
            last_query: self.last_query.clone(),
        }))
    }

    fn authorize_url(&self, sealed_state: &str) -> String {
        format!("{STUB_AUTHORIZE_URL}?state={sealed_state}")
    }

    async fn authenticate(
        &self,
        jar: CookieJar,
        code: &str,
        cookie_domain: &str,
    ) -> Result<CookieJar, IssueTrackerServiceError> {
        if code == "rejected" {
            return Err(IssueTrackerServiceError::internal("Failed to exchange code"));
        }
        let token = format!("token-for-{code}");
        Ok(jar.add(http_only_cookie(ACCESS_TOKEN_COOKIE, token, TOKEN_MAX_AGE, cookie_domain)))
    }
}

struct StubTracker {
    projects: Vec<TrackerProject>,
    issues: Vec<TrackerIssue>,
    last_query: Arc<Mutex<Option<IssueQuery>>>,
}

#[async_trait]
impl IssueTrackerService for StubTracker {
    async fn list_projects(&self) -> Result<ProjectListing, IssueTrackerError> {
        Ok(ProjectListing {
            user: Some(TrackerUser {
                id: "user-1".to_string(),
                name: Some("Ada".to_string()),
                email: Some("ada@example.com".to_string()),
            }),
            projects: self.projects.clone(),
            connected: true,
        })
    }

    async fn list_assigned_issues(
        &self,
        query: &IssueQuery,
    ) -> Result<IssueListing, IssueTrackerError> {
        *self.last_query.lock().unwrap() = Some(query.clone());
        Ok(IssueListing {
            user: None,
            issues: self.issues.clone(),
        })
    }

    async fn unify_projects(
        &self,
        focused: &[FocusedProject],
    ) -> Result<Vec<UnifiedProject>, IssueTrackerError> {
        Ok(UnifiedProject::merge(focused, &self.projects))
    }
}
