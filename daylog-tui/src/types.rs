use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A focused project as the server reports it, merged with live Linear data.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub source: String,
    pub name: String,
    pub url: Option<String>,
    pub state: Option<String>,
    pub progress: Option<f64>,
}

/// A project offered for focus during the morning selection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearProject {
    pub id: String,
    pub name: String,
    pub url: String,
    pub state: String,
    pub progress: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Named {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Issue {
    pub id: String,
    pub identifier: String,
    pub title: String,
    pub url: String,
    pub state: Option<Named>,
    pub project: Option<Named>,
}

impl Issue {
    pub fn state_name(&self) -> Option<&str> {
        self.state.as_ref().map(|s| s.name.as_str())
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project.as_ref().map(|p| p.name.as_str())
    }

    pub fn is_in_progress(&self) -> bool {
        self.state_name()
            .map(|s| s.to_lowercase().contains("progress"))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLogItem {
    pub id: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub project_id: Option<String>,
    pub project_source: Option<String>,
    pub unplanned_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentioned_issues: Option<BTreeMap<String, String>>,
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub id: String,
    pub plan_date: String,
    pub is_open: bool,
    pub reflection: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBreakdown {
    pub project_id: String,
    pub project_name: String,
    pub count: usize,
    pub minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub total_tasks: usize,
    pub total_minutes: u32,
    pub planned_minutes: u32,
    pub unplanned_minutes: u32,
    pub project_breakdown: Vec<ProjectBreakdown>,
    pub unplanned_count: usize,
    pub share_text: String,
}
