use std::collections::BTreeMap;

use strum::{Display, EnumString};
use time::{Date, OffsetDateTime};

use super::{DayPlanId, ProjectId, WorkLogItemId};

/// Where a focused project comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TaskSource {
    Linear,
    Github,
    App,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPlan {
    pub id: DayPlanId,
    pub plan_date: Date,
    pub timezone: Option<String>,
    pub is_open: bool,
    pub reflection: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Request to start a new day.
#[derive(Debug, Clone)]
pub struct NewDayPlan {
    pub plan_date: Date,
    pub timezone: Option<String>,
    pub projects: Vec<FocusedProject>,
}

/// A project the user chose to focus on for a given day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusedProject {
    pub project_id: ProjectId,
    pub source: TaskSource,
    pub name: Option<String>,
}

impl FocusedProject {
    pub fn new(project_id: impl Into<ProjectId>, source: TaskSource) -> Self {
        Self {
            project_id: project_id.into(),
            source,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Longest duration a single work-log entry may carry.
pub const MAX_ITEM_MINUTES: u32 = 24 * 60;

/// One logged unit of work. `project_id == None` marks unplanned work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkLogItem {
    pub id: WorkLogItemId,
    pub description: String,
    pub timestamp: OffsetDateTime,
    pub project_id: Option<ProjectId>,
    pub project_source: Option<TaskSource>,
    pub unplanned_reason: Option<String>,
    /// Mention label to URL.
    pub mentions: Option<BTreeMap<String, String>>,
    pub duration_minutes: Option<u32>,
}

impl WorkLogItem {
    pub fn is_unplanned(&self) -> bool {
        self.project_id.is_none()
    }

    pub fn minutes(&self) -> u32 {
        self.duration_minutes.unwrap_or(0)
    }
}
