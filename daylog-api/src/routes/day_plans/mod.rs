mod plans;
mod work_log;

use std::str::FromStr;

use axum::{
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use time::{macros::format_description, Date};

use super::ApiError;
use crate::{
    app_state::AppState,
    domain::models::{FocusedProject, ProjectId, TaskSource},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(plans::start_day_plan))
        .route("/open", get(plans::get_open_day_plan))
        .route("/:id", get(plans::get_day_plan))
        .route(
            "/:id/projects",
            get(plans::list_projects).put(plans::sync_projects),
        )
        .route("/:id/reflection", put(plans::update_reflection))
        .route("/:id/close", post(plans::close_day_plan))
        .route("/:id/summary", get(plans::get_summary))
        .route("/:id/work-log", get(work_log::list_work_log))
        .route(
            "/:id/work-log/:item_id",
            put(work_log::upsert_work_log_item).delete(work_log::delete_work_log_item),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    project_id: String,
    project_source: String,
    project_name: Option<String>,
}

impl TryFrom<ProjectPayload> for FocusedProject {
    type Error = ApiError;

    fn try_from(payload: ProjectPayload) -> Result<Self, Self::Error> {
        Ok(FocusedProject {
            project_id: ProjectId::from(payload.project_id),
            source: parse_source(&payload.project_source)?,
            name: payload.project_name.filter(|n| !n.trim().is_empty()),
        })
    }
}

fn parse_projects(payloads: Vec<ProjectPayload>) -> Result<Vec<FocusedProject>, ApiError> {
    payloads.into_iter().map(FocusedProject::try_from).collect()
}

fn parse_source(source: &str) -> Result<TaskSource, ApiError> {
    TaskSource::from_str(source)
        .map_err(|_| ApiError::bad_request(format!("unknown project source '{source}'")))
}

fn parse_plan_date(value: &str) -> Result<Date, ApiError> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map_err(|_| ApiError::bad_request(format!("invalid plan date '{value}', expected YYYY-MM-DD")))
}
