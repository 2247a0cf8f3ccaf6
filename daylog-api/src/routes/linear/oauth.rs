use axum::{
    extract::{Query, State},
    http::{header::ORIGIN, HeaderMap},
    response::Redirect,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tracing::instrument;

use super::CookieJarResult;
use crate::{
    adapters::inbound::http::cookies::{
        http_only_cookie, removal_cookie, ACCESS_TOKEN_COOKIE, OAUTH_STATE_COOKIE,
        OAUTH_STATE_MAX_AGE,
    },
    app_state::AppState,
    domain::OAuthState,
    routes::ApiError,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartParams {
    return_to: Option<String>,
}

/// Explicit `returnTo`, then the request origin, then the configured frontend.
fn resolve_return_to(params: StartParams, headers: &HeaderMap, app_state: &AppState) -> String {
    params
        .return_to
        .filter(|r| !r.trim().is_empty())
        .or_else(|| {
            headers
                .get(ORIGIN)
                .and_then(|origin| origin.to_str().ok())
                .map(str::to_string)
        })
        .unwrap_or_else(|| app_state.app_url.as_str().to_string())
        .trim_end_matches('/')
        .to_string()
}

#[instrument(name = "linear_oauth_start", skip(app_state, headers, jar))]
pub async fn start(
    State(app_state): State<AppState>,
    Query(params): Query<StartParams>,
    headers: HeaderMap,
    jar: CookieJar,
) -> CookieJarResult<Redirect> {
    let state = OAuthState::new(resolve_return_to(params, &headers, &app_state));
    let sealed = app_state.state_sealer.seal(&state)?;

    let jar = jar.add(http_only_cookie(
        OAUTH_STATE_COOKIE,
        state.id,
        OAUTH_STATE_MAX_AGE,
        &app_state.cookie_domain,
    ));
    let authorize_url = app_state.issue_tracker_factory.authorize_url(&sealed);

    Ok((jar, Redirect::to(&authorize_url)))
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
}

#[instrument(name = "linear_oauth_callback", skip(app_state, params, jar))]
pub async fn callback(
    State(app_state): State<AppState>,
    Query(params): Query<CallbackParams>,
    jar: CookieJar,
) -> CookieJarResult<Redirect> {
    let (Some(code), Some(sealed)) = (
        params.code.filter(|c| !c.is_empty()),
        params.state.filter(|s| !s.is_empty()),
    ) else {
        return Err(ApiError::bad_request("Missing code or state."));
    };

    let state = app_state.state_sealer.open(&sealed)?;

    let expected_id = jar.get(OAUTH_STATE_COOKIE).map(|c| c.value().to_string());
    if expected_id.as_deref() != Some(state.id.as_str()) {
        tracing::warn!("oauth state id does not match the state cookie");
        return Err(ApiError::bad_request("Invalid state."));
    }

    let jar = jar.remove(removal_cookie(OAUTH_STATE_COOKIE, &app_state.cookie_domain));
    let jar = app_state
        .issue_tracker_factory
        .authenticate(jar, &code, &app_state.cookie_domain)
        .await?;

    tracing::info!("linear connected, returning to {}", state.return_to);
    let destination = format!("{}/settings?integration=linear", state.return_to);
    Ok((jar, Redirect::to(&destination)))
}

#[instrument(name = "linear_oauth_disconnect", skip(app_state, jar))]
pub async fn disconnect(State(app_state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.remove(removal_cookie(ACCESS_TOKEN_COOKIE, &app_state.cookie_domain));
    (jar, Redirect::to(&app_state.app_link("/settings")))
}
