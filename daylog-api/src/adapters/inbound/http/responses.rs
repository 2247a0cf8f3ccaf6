//! HTTP response types for the day-plan and Linear endpoints.
//!
//! These types serialize to the camelCase JSON the clients expect.

use std::collections::BTreeMap;

use serde::Serialize;
use time::{Date, OffsetDateTime};

use crate::domain::{
    models::{
        DayPlan, DayPlanId, FocusedProject, ProjectBreakdown, TrackerIssue, TrackerProject,
        TrackerUser, UnifiedProject, WorkLogItem,
    },
    ports::inbound::DaySummaryReport,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartDayPlanResponse {
    pub day_plan_id: DayPlanId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlanResponse {
    pub id: DayPlanId,
    /// `YYYY-MM-DD`.
    pub plan_date: String,
    pub timezone: Option<String>,
    pub is_open: bool,
    pub reflection: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<DayPlan> for DayPlanResponse {
    fn from(plan: DayPlan) -> Self {
        Self {
            id: plan.id,
            plan_date: plan.plan_date.to_string(),
            timezone: plan.timezone,
            is_open: plan.is_open,
            reflection: plan.reflection,
            created_at: plan.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusedProjectResponse {
    pub project_id: String,
    pub project_source: String,
    pub project_name: Option<String>,
}

impl From<FocusedProject> for FocusedProjectResponse {
    fn from(project: FocusedProject) -> Self {
        Self {
            project_id: project.project_id.to_string(),
            project_source: project.source.to_string(),
            project_name: project.name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedProjectResponse {
    pub id: String,
    pub source: String,
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub state: Option<String>,
    pub progress: Option<f64>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub target_date: Option<String>,
}

impl From<UnifiedProject> for UnifiedProjectResponse {
    fn from(project: UnifiedProject) -> Self {
        Self {
            id: project.id.to_string(),
            source: project.source.to_string(),
            name: project.name,
            description: project.description,
            url: project.url,
            state: project.state,
            progress: project.progress,
            icon: project.icon,
            color: project.color,
            target_date: project.target_date.map(|d| d.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLogItemResponse {
    pub id: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub project_id: Option<String>,
    pub project_source: Option<String>,
    pub unplanned_reason: Option<String>,
    pub mentioned_issues: Option<BTreeMap<String, String>>,
    pub duration_minutes: Option<u32>,
}

impl From<WorkLogItem> for WorkLogItemResponse {
    fn from(item: WorkLogItem) -> Self {
        Self {
            id: item.id.to_string(),
            description: item.description,
            timestamp: item.timestamp,
            project_id: item.project_id.map(|id| id.to_string()),
            project_source: item.project_source.map(|s| s.to_string()),
            unplanned_reason: item.unplanned_reason,
            mentioned_issues: item.mentions,
            duration_minutes: item.duration_minutes,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBreakdownResponse {
    pub project_id: String,
    pub project_name: String,
    pub count: usize,
    pub minutes: u32,
}

impl From<ProjectBreakdown> for ProjectBreakdownResponse {
    fn from(entry: ProjectBreakdown) -> Self {
        Self {
            project_id: entry.project_id.to_string(),
            project_name: entry.project_name,
            count: entry.count,
            minutes: entry.minutes,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummaryResponse {
    pub total_tasks: usize,
    pub total_minutes: u32,
    pub planned_minutes: u32,
    pub unplanned_minutes: u32,
    pub project_breakdown: Vec<ProjectBreakdownResponse>,
    pub unplanned_count: usize,
    pub share_text: String,
}

impl From<DaySummaryReport> for DaySummaryResponse {
    fn from(report: DaySummaryReport) -> Self {
        let summary = report.summary;
        Self {
            total_tasks: summary.total_tasks,
            total_minutes: summary.total_minutes,
            planned_minutes: summary.planned_minutes,
            unplanned_minutes: summary.unplanned_minutes,
            project_breakdown: summary
                .project_breakdown
                .into_iter()
                .map(ProjectBreakdownResponse::from)
                .collect(),
            unplanned_count: summary.unplanned_count,
            share_text: report.share_text,
        }
    }
}

// ============================================================================
// Linear
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerUserResponse {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl From<TrackerUser> for TrackerUserResponse {
    fn from(user: TrackerUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerProjectResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub state: String,
    pub progress: f64,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub target_date: Option<String>,
    pub start_date: Option<String>,
}

fn format_date(date: Option<Date>) -> Option<String> {
    date.map(|d| d.to_string())
}

impl From<TrackerProject> for TrackerProjectResponse {
    fn from(project: TrackerProject) -> Self {
        Self {
            id: project.id,
            name: project.name,
            description: project.description,
            url: project.url,
            state: project.state,
            progress: project.progress,
            icon: project.icon,
            color: project.color,
            target_date: format_date(project.target_date),
            start_date: format_date(project.start_date),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NamedResponse {
    pub name: String,
}

/// Issue in the same shape Linear reports it, with nested `state` and `project`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerIssueResponse {
    pub id: String,
    pub identifier: String,
    pub title: String,
    pub url: String,
    pub priority: Option<f64>,
    pub estimate: Option<f64>,
    pub state: Option<NamedResponse>,
    pub project: Option<NamedResponse>,
}

impl From<TrackerIssue> for TrackerIssueResponse {
    fn from(issue: TrackerIssue) -> Self {
        Self {
            id: issue.id,
            identifier: issue.identifier,
            title: issue.title,
            url: issue.url,
            priority: issue.priority,
            estimate: issue.estimate,
            state: issue.state_name.map(|name| NamedResponse { name }),
            project: issue.project_name.map(|name| NamedResponse { name }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearProjectsResponse {
    pub user: Option<TrackerUserResponse>,
    pub projects: Vec<TrackerProjectResponse>,
    pub connected: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearIssuesResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<TrackerUserResponse>,
    pub issues: Vec<TrackerIssueResponse>,
}
