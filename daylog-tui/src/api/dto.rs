use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::{Issue, LinearProject};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest<'a> {
    pub project_id: &'a str,
    pub project_source: &'a str,
    pub project_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartDayPlanRequest<'a> {
    pub plan_date: String,
    pub timezone: Option<String>,
    pub projects: Vec<ProjectRequest<'a>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartDayPlanResponse {
    pub day_plan_id: String,
}

#[derive(Serialize)]
pub struct SyncProjectsRequest<'a> {
    pub projects: Vec<ProjectRequest<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLogItemRequest<'a> {
    pub description: &'a str,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub project_id: Option<&'a str>,
    pub project_source: Option<&'a str>,
    pub unplanned_reason: Option<&'a str>,
    pub mentioned_issues: Option<&'a BTreeMap<String, String>>,
    pub duration_minutes: Option<u32>,
}

#[derive(Serialize)]
pub struct ReflectionRequest<'a> {
    pub reflection: &'a str,
}

#[derive(Serialize)]
pub struct CloseDayPlanRequest<'a> {
    pub reflection: Option<&'a str>,
}

#[derive(Deserialize)]
pub struct LinearProjectsResponse {
    pub projects: Vec<LinearProject>,
}

#[derive(Deserialize)]
pub struct LinearIssuesResponse {
    pub issues: Vec<Issue>,
}

#[derive(Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: Option<String>,
}
