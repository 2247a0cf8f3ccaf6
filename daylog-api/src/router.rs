use std::sync::Arc;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use sqlx::PgPool;
use thiserror::Error;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};
use url::Url;

use crate::{
    app_state::AppState,
    config::Settings,
    domain::{OAuthStateError, StateSealer},
    factory::{self, LinearServiceFactory},
    routes,
};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid app url: {0}")]
    AppUrl(#[from] url::ParseError),
    #[error("invalid linear settings: {0}")]
    Linear(#[from] linear::LinearError),
    #[error("invalid linear state key: {0}")]
    StateKey(#[from] OAuthStateError),
}

pub fn create(connection_pool: PgPool, config: Settings) -> Result<Router<()>, StartupError> {
    let app_url = Url::parse(&config.application.app_url)?;
    let tracker_factory = LinearServiceFactory::new(&config.linear)?;
    let state_sealer = StateSealer::from_base64_key(&config.linear.state_key)?;

    let app_state = AppState::new(
        app_url,
        config.application.cookie_domain.clone(),
        factory::day_plan_service(connection_pool),
        Arc::new(tracker_factory),
        state_sealer,
    );

    let app = Router::new()
        .route("/", get(|| async { "daylog" }))
        .nest("/api/day-plans", routes::day_plans::router())
        .nest("/api/linear", routes::linear::router());

    Ok(app
        .with_state(app_state)
        .layer(cors_layer(&config))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default())))
}

/// The frontend origin, plus any `https://` origin ending in the configured suffix.
fn cors_layer(config: &Settings) -> CorsLayer {
    let app_origin = config.application.app_url.trim_end_matches('/').to_string();
    let allowed_suffix = config.application.cors_allowed_origin_suffix.clone();

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            let origin_str = origin.to_str().unwrap_or_default();
            if origin_str == app_origin {
                return true;
            }
            match allowed_suffix {
                Some(ref suffix) => {
                    origin_str.starts_with("https://") && origin_str.ends_with(suffix.as_str())
                }
                None => false,
            }
        }))
}
