use std::sync::Arc;

use url::Url;

use crate::{
    adapters::inbound::http::IssueTrackerServiceFactory,
    domain::{ports::inbound::DayPlanService, StateSealer},
};

#[derive(Clone)]
pub struct AppState {
    /// Where the frontend lives; OAuth and settings redirects land here.
    pub app_url: Url,
    pub cookie_domain: String,
    pub day_plan_service: Arc<dyn DayPlanService>,
    pub issue_tracker_factory: Arc<dyn IssueTrackerServiceFactory>,
    pub state_sealer: Arc<StateSealer>,
}

impl AppState {
    pub fn new(
        app_url: Url,
        cookie_domain: String,
        day_plan_service: Arc<dyn DayPlanService>,
        issue_tracker_factory: Arc<dyn IssueTrackerServiceFactory>,
        state_sealer: StateSealer,
    ) -> Self {
        Self {
            app_url,
            cookie_domain,
            day_plan_service,
            issue_tracker_factory,
            state_sealer: Arc::new(state_sealer),
        }
    }

    /// `path` resolved against the frontend URL.
    pub fn app_link(&self, path: &str) -> String {
        self.app_url
            .join(path)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| format!("{}{}", self.app_url.as_str().trim_end_matches('/'), path))
    }
}
