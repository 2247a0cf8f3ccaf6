use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tracing::instrument;

use crate::{
    adapters::inbound::http::{
        cookies::{ISSUE_ASSIGNEE_COOKIE, ISSUE_QUERY_COOKIE, ISSUE_STATE_COOKIE},
        LinearIssuesResponse, LinearProjectsResponse, TrackerIssueResponse,
        TrackerProjectResponse, TrackerUserResponse,
    },
    app_state::AppState,
    domain::models::IssueQuery,
    routes::ApiError,
};

#[instrument(name = "list_linear_projects", skip(app_state, jar))]
pub async fn list_projects(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<LinearProjectsResponse>, ApiError> {
    let service = app_state.issue_tracker_factory.create_service(&jar)?;
    let listing = service.list_projects().await?;

    Ok(Json(LinearProjectsResponse {
        user: listing.user.map(TrackerUserResponse::from),
        projects: listing
            .projects
            .into_iter()
            .map(TrackerProjectResponse::from)
            .collect(),
        connected: listing.connected,
    }))
}

#[derive(Debug, Deserialize)]
pub struct IssuesParams {
    state: Option<String>,
    query: Option<String>,
    email: Option<String>,
}

/// A present query parameter wins over the stored cookie, even when blank.
fn param_or_cookie(param: Option<String>, jar: &CookieJar, cookie: &str) -> Option<String> {
    param
        .or_else(|| jar.get(cookie).map(|c| c.value().to_string()))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(super) fn resolve_issue_query(params: IssuesParams, jar: &CookieJar) -> IssueQuery {
    IssueQuery {
        state: param_or_cookie(params.state, jar, ISSUE_STATE_COOKIE),
        query: param_or_cookie(params.query, jar, ISSUE_QUERY_COOKIE),
        assignee_email: param_or_cookie(params.email, jar, ISSUE_ASSIGNEE_COOKIE),
    }
}

#[instrument(name = "list_linear_issues", skip(app_state, jar))]
pub async fn list_issues(
    State(app_state): State<AppState>,
    Query(params): Query<IssuesParams>,
    jar: CookieJar,
) -> Result<Json<LinearIssuesResponse>, ApiError> {
    let query = resolve_issue_query(params, &jar);
    let service = app_state.issue_tracker_factory.create_service(&jar)?;
    let listing = service.list_assigned_issues(&query).await?;

    Ok(Json(LinearIssuesResponse {
        user: listing.user.map(TrackerUserResponse::from),
        issues: listing
            .issues
            .into_iter()
            .map(TrackerIssueResponse::from)
            .collect(),
    }))
}
