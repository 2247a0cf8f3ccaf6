use axum::{extract::State, response::Redirect};
use axum_extra::extract::{CookieJar, Form};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    adapters::inbound::http::cookies::{
        http_only_cookie, removal_cookie, FILTER_COOKIES, FILTER_MAX_AGE, ISSUE_ASSIGNEE_COOKIE,
        ISSUE_QUERY_COOKIE, ISSUE_STATE_COOKIE,
    },
    app_state::AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct SettingsForm {
    action: Option<String>,
    state: Option<String>,
    query: Option<String>,
    assignee: Option<String>,
}

/// Stores issue filter preferences as cookies, or clears them all on `action=clear`.
#[instrument(name = "update_linear_settings", skip(app_state, jar))]
pub async fn update_settings(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SettingsForm>,
) -> (CookieJar, Redirect) {
    let domain = app_state.cookie_domain.as_str();
    let redirect = Redirect::to(&app_state.app_link("/settings"));

    if form.action.as_deref() == Some("clear") {
        let jar = FILTER_COOKIES
            .into_iter()
            .fold(jar, |jar, name| jar.remove(removal_cookie(name, domain)));
        return (jar, redirect);
    }

    let fields = [
        (ISSUE_STATE_COOKIE, form.state),
        (ISSUE_QUERY_COOKIE, form.query),
        (ISSUE_ASSIGNEE_COOKIE, form.assignee),
    ];

    let jar = fields.into_iter().fold(jar, |jar, (name, value)| {
        let value = value.unwrap_or_default().trim().to_string();
        if value.is_empty() {
            jar.remove(removal_cookie(name, domain))
        } else {
            jar.add(http_only_cookie(name, value, FILTER_MAX_AGE, domain))
        }
    });

    (jar, redirect)
}
