//! Cookie names and builders shared by the Linear routes and the factory.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

pub const ACCESS_TOKEN_COOKIE: &str = "linear_access_token";
pub const OAUTH_STATE_COOKIE: &str = "linear_oauth_state";
pub const ISSUE_STATE_COOKIE: &str = "linear_issue_state";
pub const ISSUE_QUERY_COOKIE: &str = "linear_issue_query";
pub const ISSUE_ASSIGNEE_COOKIE: &str = "linear_issue_assignee";

pub const FILTER_COOKIES: [&str; 3] = [ISSUE_STATE_COOKIE, ISSUE_QUERY_COOKIE, ISSUE_ASSIGNEE_COOKIE];

pub const TOKEN_MAX_AGE: Duration = Duration::days(30);
pub const FILTER_MAX_AGE: Duration = Duration::days(30);
pub const OAUTH_STATE_MAX_AGE: Duration = Duration::minutes(10);

/// HTTP-only cookie scoped to the whole site. `Secure` unless serving localhost.
pub fn http_only_cookie(
    name: &'static str,
    value: impl Into<String>,
    max_age: Duration,
    cookie_domain: &str,
) -> Cookie<'static> {
    Cookie::build((name, value.into()))
        .domain(cookie_domain.to_string())
        .path("/")
        .secure(cookie_domain != "localhost")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build()
}

/// A cookie matching `http_only_cookie`'s domain and path, for removal.
pub fn removal_cookie(name: &'static str, cookie_domain: &str) -> Cookie<'static> {
    Cookie::build(name)
        .domain(cookie_domain.to_string())
        .path("/")
        .build()
}
