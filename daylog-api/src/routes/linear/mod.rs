mod oauth;
mod projects;
mod settings;

use axum::{
    routing::{get, post},
    Router,
};
use axum_extra::extract::CookieJar;

use super::ApiError;
use crate::app_state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(projects::list_projects))
        .route("/issues", get(projects::list_issues))
        .route("/oauth/start", get(oauth::start))
        .route("/oauth/callback", get(oauth::callback))
        .route("/oauth/disconnect", get(oauth::disconnect))
        .route("/settings", post(settings::update_settings))
}

type CookieJarResult<T> = Result<(CookieJar, T), ApiError>;

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::router;
    use crate::{
        domain::models::{TrackerIssue, TrackerProject},
        routes::test_support::{test_state, StubTrackerFactory, STUB_AUTHORIZE_URL},
    };

    fn project(id: &str, name: &str) -> TrackerProject {
        TrackerProject {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            url: format!("https://linear.app/acme/project/{id}"),
            state: "started".to_string(),
            progress: 0.5,
            icon: None,
            color: Some("#5e6ad2".to_string()),
            target_date: None,
            start_date: None,
        }
    }

    fn issue(identifier: &str) -> TrackerIssue {
        TrackerIssue {
            id: format!("id-{identifier}"),
            identifier: identifier.to_string(),
            title: "Fix login".to_string(),
            url: format!("https://linear.app/acme/issue/{identifier}"),
            priority: Some(2.0),
            estimate: None,
            state_name: Some("In Progress".to_string()),
            project_name: Some("Alpha".to_string()),
        }
    }

    async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
        let mut request = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        app.clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn location(response: &Response) -> String {
        response.headers()[header::LOCATION].to_str().unwrap().to_string()
    }

    fn set_cookies(response: &Response) -> Vec<String> {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    fn cookie_value(set_cookies: &[String], name: &str) -> Option<String> {
        let prefix = format!("{name}=");
        set_cookies.iter().find_map(|c| {
            c.strip_prefix(&prefix)
                .map(|rest| rest.split(';').next().unwrap_or_default().to_string())
        })
    }

    #[tokio::test]
    async fn projects_without_connection_is_unauthorized_with_code() {
        let app = router().with_state(test_state(StubTrackerFactory::disconnected()));

        let response = get(&app, "/projects", None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = json_body(response).await;
        assert_eq!(
            body["error"],
            json!("Linear is not connected. Connect your account in Settings.")
        );
        assert_eq!(body["code"], json!("LINEAR_NOT_CONNECTED"));
    }

    #[tokio::test]
    async fn projects_and_issues_when_connected() {
        let factory = StubTrackerFactory::connected(vec![project("p1", "Alpha")], vec![issue("ENG-1")]);
        let app = router().with_state(test_state(factory.clone()));
        let cookies = "linear_access_token=tok; linear_issue_state=Todo; linear_issue_query=login";

        let body = json_body(get(&app, "/projects", Some(cookies)).await).await;
        assert_eq!(body["connected"], json!(true));
        assert_eq!(body["user"]["email"], json!("ada@example.com"));
        assert_eq!(body["projects"][0]["name"], json!("Alpha"));

        let body = json_body(get(&app, "/issues?state=Done", Some(cookies)).await).await;
        assert_eq!(body["issues"][0]["identifier"], json!("ENG-1"));
        assert_eq!(body["issues"][0]["state"]["name"], json!("In Progress"));
        assert!(body.get("user").is_none());

        let query = factory.last_query().unwrap();
        assert_eq!(query.state.as_deref(), Some("Done"));
        assert_eq!(query.query.as_deref(), Some("login"));
        assert_eq!(query.assignee_email, None);
    }

    #[tokio::test]
    async fn oauth_round_trip_sets_token_cookie() {
        let app = router().with_state(test_state(StubTrackerFactory::connected(vec![], vec![])));

        let response = get(&app, "/oauth/start", None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let authorize = location(&response);
        assert!(authorize.starts_with(STUB_AUTHORIZE_URL));
        let sealed = authorize.split("state=").nth(1).unwrap().to_string();
        let state_id = cookie_value(&set_cookies(&response), "linear_oauth_state").unwrap();

        let response = get(
            &app,
            &format!("/oauth/callback?code=abc&state={sealed}"),
            Some(&format!("linear_oauth_state={state_id}")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            location(&response),
            "http://localhost:5173/settings?integration=linear"
        );
        assert_eq!(
            cookie_value(&set_cookies(&response), "linear_access_token").as_deref(),
            Some("token-for-abc")
        );
    }

    #[tokio::test]
    async fn oauth_start_prefers_return_to_then_origin() {
        let app = router().with_state(test_state(StubTrackerFactory::disconnected()));

        let request = Request::builder()
            .uri("/oauth/start")
            .header(header::ORIGIN, "https://daylog.example")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let sealed = location(&response).split("state=").nth(1).unwrap().to_string();

        let sealer = test_state(StubTrackerFactory::disconnected()).state_sealer;
        assert_eq!(sealer.open(&sealed).unwrap().return_to, "https://daylog.example");

        let response = get(&app, "/oauth/start?returnTo=http://127.0.0.1:3000/", None).await;
        let sealed = location(&response).split("state=").nth(1).unwrap().to_string();
        assert_eq!(sealer.open(&sealed).unwrap().return_to, "http://127.0.0.1:3000");
    }

    #[tokio::test]
    async fn oauth_callback_rejects_missing_or_forged_state() {
        let app = router().with_state(test_state(StubTrackerFactory::connected(vec![], vec![])));

        let response = get(&app, "/oauth/callback?code=abc", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = get(&app, "/oauth/callback?code=abc&state=not-sealed", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], json!("Invalid state."));

        let start = get(&app, "/oauth/start", None).await;
        let sealed = location(&start).split("state=").nth(1).unwrap().to_string();
        let response = get(
            &app,
            &format!("/oauth/callback?code=abc&state={sealed}"),
            Some("linear_oauth_state=someone-else"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn disconnect_clears_token_and_returns_to_settings() {
        let app = router().with_state(test_state(StubTrackerFactory::disconnected()));

        let response = get(&app, "/oauth/disconnect", Some("linear_access_token=tok")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "http://localhost:5173/settings");
        assert_eq!(
            cookie_value(&set_cookies(&response), "linear_access_token").as_deref(),
            Some("")
        );
    }

    #[tokio::test]
    async fn settings_form_stores_and_clears_filters() {
        let app = router().with_state(test_state(StubTrackerFactory::disconnected()));

        let request = Request::builder()
            .method("POST")
            .uri("/settings")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(header::COOKIE, "linear_issue_query=old")
            .body(Body::from("state=+Todo+&query=&assignee=ada%40example.com"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let cookies = set_cookies(&response);
        assert_eq!(cookie_value(&cookies, "linear_issue_state").as_deref(), Some("Todo"));
        assert_eq!(cookie_value(&cookies, "linear_issue_query").as_deref(), Some(""));
        assert!(cookie_value(&cookies, "linear_issue_assignee")
            .unwrap()
            .starts_with("ada"));

        let request = Request::builder()
            .method("POST")
            .uri("/settings")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(
                header::COOKIE,
                "linear_issue_state=Todo; linear_issue_query=login; linear_issue_assignee=ada",
            )
            .body(Body::from("action=clear"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let cookies = set_cookies(&response);
        assert_eq!(cookies.len(), 3);
        assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
    }
}
