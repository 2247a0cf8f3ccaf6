//! Composition root: concrete factories for creating service instances.
//!
//! This is the only place that imports concrete outbound adapters and provider types.

use std::sync::Arc;

use async_trait::async_trait;
use axum_extra::extract::CookieJar;
use sqlx::PgPool;
use time::Duration;

use crate::{
    adapters::{
        inbound::http::{
            cookies::{http_only_cookie, ACCESS_TOKEN_COOKIE, TOKEN_MAX_AGE},
            IssueTrackerServiceError, IssueTrackerServiceFactory,
        },
        outbound::{linear::LinearAdapter, postgres::PostgresDayPlanRepository},
    },
    config::LinearSettings,
    domain::{
        ports::inbound::{DayPlanService, IssueTrackerService},
        services::{DayPlanServiceImpl, IssueTrackerServiceImpl},
    },
    repositories::DayPlanRepoImpl,
};

/// Postgres-backed day-plan service.
pub fn day_plan_service(pool: PgPool) -> Arc<dyn DayPlanService> {
    let repo = Arc::new(DayPlanRepoImpl::new(pool));
    let adapter = PostgresDayPlanRepository::new(repo);
    Arc::new(DayPlanServiceImpl::new(Arc::new(adapter)))
}

/// Concrete factory that creates Linear-backed IssueTrackerService instances.
pub struct LinearServiceFactory {
    oauth: linear::LinearOAuth,
    api_url: String,
    fallback_api_key: Option<String>,
}

impl LinearServiceFactory {
    pub fn new(settings: &LinearSettings) -> Result<Self, linear::LinearError> {
        Ok(Self {
            oauth: linear::LinearOAuth::new(settings.oauth_settings())?,
            api_url: settings.api_url.clone(),
            fallback_api_key: settings.fallback_api_key(),
        })
    }

    /// Cookie token first, then the configured key.
    fn resolve_token(&self, jar: &CookieJar) -> Option<String> {
        jar.get(ACCESS_TOKEN_COOKIE)
            .map(|cookie| cookie.value().trim().to_string())
            .filter(|token| !token.is_empty())
            .or_else(|| self.fallback_api_key.clone())
    }
}

#[async_trait]
impl IssueTrackerServiceFactory for LinearServiceFactory {
    fn create_service(
        &self,
        jar: &CookieJar,
    ) -> Result<Box<dyn IssueTrackerService>, IssueTrackerServiceError> {
        let token = self
            .resolve_token(jar)
            .ok_or_else(IssueTrackerServiceError::not_connected)?;

        let adapter = LinearAdapter::new(linear::Credentials::from_token(token), &self.api_url);
        Ok(Box::new(IssueTrackerServiceImpl::new(Arc::new(adapter))))
    }

    fn authorize_url(&self, sealed_state: &str) -> String {
        self.oauth.authorize_url(sealed_state)
    }

    async fn authenticate(
        &self,
        jar: CookieJar,
        code: &str,
        cookie_domain: &str,
    ) -> Result<CookieJar, IssueTrackerServiceError> {
        let grant = self
            .oauth
            .exchange_code(code, &self.api_url)
            .await
            .map_err(|e| {
                tracing::error!("linear code exchange failed: {}", e);
                IssueTrackerServiceError::internal(format!("Failed to exchange code: {}", e))
            })?;

        let max_age = token_max_age(grant.expires_in);
        let cookie = http_only_cookie(ACCESS_TOKEN_COOKIE, grant.access_token, max_age, cookie_domain);

        Ok(jar.add(cookie))
    }
}

/// The provider's lifetime when it is shorter than the default.
fn token_max_age(expires_in: Option<std::time::Duration>) -> Duration {
    expires_in
        .and_then(|d| Duration::try_from(d).ok())
        .filter(|d| *d < TOKEN_MAX_AGE)
        .unwrap_or(TOKEN_MAX_AGE)
}

#[cfg(test)]
mod tests {
    use axum_extra::extract::cookie::Cookie;

    use super::*;

    fn settings(api_key: Option<&str>) -> LinearSettings {
        LinearSettings {
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            redirect_url: "http://localhost:8080/api/linear/oauth/callback".to_string(),
            auth_url: linear::DEFAULT_AUTH_URL.to_string(),
            token_url: linear::DEFAULT_TOKEN_URL.to_string(),
            api_url: "http://127.0.0.1:9/graphql".to_string(),
            api_key: api_key.map(str::to_string),
            state_key: String::new(),
        }
    }

    #[test]
    fn cookie_token_takes_precedence_over_configured_key() {
        let factory = LinearServiceFactory::new(&settings(Some("lin_api_server"))).unwrap();

        let jar = CookieJar::new().add(Cookie::new(ACCESS_TOKEN_COOKIE, "oauth-token"));
        assert_eq!(factory.resolve_token(&jar).as_deref(), Some("oauth-token"));

        let empty = CookieJar::new();
        assert_eq!(
            factory.resolve_token(&empty).as_deref(),
            Some("lin_api_server")
        );
    }

    #[test]
    fn no_token_and_no_key_is_not_connected() {
        let factory = LinearServiceFactory::new(&settings(None)).unwrap();
        let err = factory.create_service(&CookieJar::new()).err().unwrap();

        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn token_lifetime_is_capped_at_thirty_days() {
        use std::time::Duration as StdDuration;

        assert_eq!(token_max_age(None), TOKEN_MAX_AGE);
        assert_eq!(
            token_max_age(Some(StdDuration::from_secs(315_705_599))),
            TOKEN_MAX_AGE
        );
        assert_eq!(
            token_max_age(Some(StdDuration::from_secs(3600))),
            Duration::hours(1)
        );
    }
}
