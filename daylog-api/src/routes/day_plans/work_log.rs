use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::instrument;
use uuid::Uuid;

use super::parse_source;
use crate::{
    adapters::inbound::http::WorkLogItemResponse,
    app_state::AppState,
    domain::models::{DayPlanId, ProjectId, WorkLogItem, WorkLogItemId},
    routes::ApiError,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLogItemPayload {
    description: String,
    #[serde(with = "time::serde::rfc3339")]
    timestamp: OffsetDateTime,
    project_id: Option<String>,
    project_source: Option<String>,
    unplanned_reason: Option<String>,
    mentioned_issues: Option<BTreeMap<String, String>>,
    duration_minutes: Option<u32>,
}

impl WorkLogItemPayload {
    fn into_item(self, item_id: String) -> Result<WorkLogItem, ApiError> {
        let project_source = match self.project_source.as_deref() {
            Some(source) if !source.is_empty() => Some(parse_source(source)?),
            _ => None,
        };

        Ok(WorkLogItem {
            id: WorkLogItemId::from(item_id),
            description: self.description,
            timestamp: self.timestamp,
            project_id: self.project_id.map(ProjectId::from),
            project_source,
            unplanned_reason: self.unplanned_reason.filter(|r| !r.trim().is_empty()),
            mentions: self.mentioned_issues,
            duration_minutes: self.duration_minutes,
        })
    }
}

#[instrument(name = "list_work_log", skip(app_state))]
pub async fn list_work_log(
    Path(id): Path<Uuid>,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<WorkLogItemResponse>>, ApiError> {
    let items = app_state
        .day_plan_service
        .get_day_plan_work_log(&DayPlanId::from(id))
        .await?;

    Ok(Json(
        items.into_iter().map(WorkLogItemResponse::from).collect(),
    ))
}

#[instrument(name = "upsert_work_log_item", skip(app_state, body))]
pub async fn upsert_work_log_item(
    Path((id, item_id)): Path<(Uuid, String)>,
    State(app_state): State<AppState>,
    Json(body): Json<WorkLogItemPayload>,
) -> Result<StatusCode, ApiError> {
    let item = body.into_item(item_id)?;

    app_state
        .day_plan_service
        .upsert_work_log_item(&DayPlanId::from(id), &item)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[instrument(name = "delete_work_log_item", skip(app_state))]
pub async fn delete_work_log_item(
    Path((id, item_id)): Path<(Uuid, String)>,
    State(app_state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    app_state
        .day_plan_service
        .delete_work_log_item(&DayPlanId::from(id), &WorkLogItemId::from(item_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
