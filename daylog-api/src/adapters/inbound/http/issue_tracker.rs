//! HTTP adapter for the issue tracker integration.
//!
//! Defines the factory trait for creating IssueTrackerService instances from
//! request cookies. The concrete implementation lives in `crate::factory`.

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;

use crate::domain::ports::inbound::IssueTrackerService;

/// Error returned when creating an IssueTrackerService or completing OAuth fails.
#[derive(Debug)]
pub struct IssueTrackerServiceError {
    pub status: StatusCode,
    pub message: String,
}

impl IssueTrackerServiceError {
    pub fn not_connected() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "Linear is not connected. Connect your account in Settings.".to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

/// Factory trait for creating IssueTrackerService instances from HTTP cookies.
#[async_trait]
pub trait IssueTrackerServiceFactory: Send + Sync + 'static {
    /// Create a service from the token cookie, falling back to a configured key.
    fn create_service(
        &self,
        jar: &CookieJar,
    ) -> Result<Box<dyn IssueTrackerService>, IssueTrackerServiceError>;

    /// Provider URL that starts the OAuth flow with the given sealed state.
    fn authorize_url(&self, sealed_state: &str) -> String;

    /// Exchange an authorization code and return `jar` with the token cookie set.
    async fn authenticate(
        &self,
        jar: CookieJar,
        code: &str,
        cookie_domain: &str,
    ) -> Result<CookieJar, IssueTrackerServiceError>;
}
