use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use super::{parse_plan_date, parse_projects, ProjectPayload};
use crate::{
    adapters::inbound::http::{
        DayPlanResponse, DaySummaryResponse, StartDayPlanResponse, UnifiedProjectResponse,
    },
    app_state::AppState,
    domain::models::{DayPlanId, NewDayPlan, UnifiedProject},
    routes::ApiError,
};

// ============================================================================
// Start / fetch
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartDayPlanPayload {
    plan_date: String,
    timezone: Option<String>,
    #[serde(default)]
    projects: Vec<ProjectPayload>,
}

#[instrument(name = "start_day_plan", skip(app_state))]
pub async fn start_day_plan(
    State(app_state): State<AppState>,
    Json(body): Json<StartDayPlanPayload>,
) -> Result<(StatusCode, Json<StartDayPlanResponse>), ApiError> {
    let plan = NewDayPlan {
        plan_date: parse_plan_date(&body.plan_date)?,
        timezone: body.timezone.filter(|tz| !tz.trim().is_empty()),
        projects: parse_projects(body.projects)?,
    };

    let day_plan_id = app_state.day_plan_service.start_day_plan(plan).await?;

    Ok((
        StatusCode::CREATED,
        Json(StartDayPlanResponse { day_plan_id }),
    ))
}

#[instrument(name = "get_open_day_plan", skip(app_state))]
pub async fn get_open_day_plan(
    State(app_state): State<AppState>,
) -> Result<Json<Option<DayPlanResponse>>, ApiError> {
    let plan = app_state.day_plan_service.get_open_day_plan().await?;
    Ok(Json(plan.map(DayPlanResponse::from)))
}

#[instrument(name = "get_day_plan", skip(app_state))]
pub async fn get_day_plan(
    Path(id): Path<Uuid>,
    State(app_state): State<AppState>,
) -> Result<Json<DayPlanResponse>, ApiError> {
    let plan = app_state
        .day_plan_service
        .get_day_plan(&DayPlanId::from(id))
        .await?;
    Ok(Json(DayPlanResponse::from(plan)))
}

// ============================================================================
// Projects
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SyncProjectsPayload {
    projects: Vec<ProjectPayload>,
}

#[instrument(name = "sync_projects", skip(app_state))]
pub async fn sync_projects(
    Path(id): Path<Uuid>,
    State(app_state): State<AppState>,
    Json(body): Json<SyncProjectsPayload>,
) -> Result<StatusCode, ApiError> {
    let projects = parse_projects(body.projects)?;
    app_state
        .day_plan_service
        .sync_day_plan_projects(&DayPlanId::from(id), &projects)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Focused projects enriched with live Linear metadata when Linear is reachable.
#[instrument(name = "list_projects", skip(app_state, jar))]
pub async fn list_projects(
    Path(id): Path<Uuid>,
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<Vec<UnifiedProjectResponse>>, ApiError> {
    let focused = app_state
        .day_plan_service
        .get_day_plan_projects(&DayPlanId::from(id))
        .await?;

    let unified = match app_state.issue_tracker_factory.create_service(&jar) {
        Ok(service) => match service.unify_projects(&focused).await {
            Ok(unified) => unified,
            Err(e) => {
                tracing::warn!("falling back to stored project names: {}", e);
                UnifiedProject::merge(&focused, &[])
            }
        },
        Err(_) => UnifiedProject::merge(&focused, &[]),
    };

    Ok(Json(
        unified.into_iter().map(UnifiedProjectResponse::from).collect(),
    ))
}

// ============================================================================
// Reflection / close / summary
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ReflectionPayload {
    reflection: String,
}

#[instrument(name = "update_reflection", skip(app_state, body))]
pub async fn update_reflection(
    Path(id): Path<Uuid>,
    State(app_state): State<AppState>,
    Json(body): Json<ReflectionPayload>,
) -> Result<StatusCode, ApiError> {
    app_state
        .day_plan_service
        .update_reflection(&DayPlanId::from(id), &body.reflection)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct CloseDayPlanPayload {
    reflection: Option<String>,
}

#[instrument(name = "close_day_plan", skip(app_state, body))]
pub async fn close_day_plan(
    Path(id): Path<Uuid>,
    State(app_state): State<AppState>,
    body: Option<Json<CloseDayPlanPayload>>,
) -> Result<Json<DayPlanResponse>, ApiError> {
    let reflection = body.and_then(|Json(body)| body.reflection);

    let plan = app_state
        .day_plan_service
        .close_day_plan(&DayPlanId::from(id), reflection.as_deref())
        .await?;

    Ok(Json(DayPlanResponse::from(plan)))
}

#[instrument(name = "get_summary", skip(app_state))]
pub async fn get_summary(
    Path(id): Path<Uuid>,
    State(app_state): State<AppState>,
) -> Result<Json<DaySummaryResponse>, ApiError> {
    let report = app_state
        .day_plan_service
        .get_day_summary(&DayPlanId::from(id))
        .await?;

    Ok(Json(DaySummaryResponse::from(report)))
}
