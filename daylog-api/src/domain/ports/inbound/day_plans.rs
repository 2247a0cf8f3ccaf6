use async_trait::async_trait;

use crate::domain::{
    models::{
        DayPlan, DayPlanId, DaySummary, FocusedProject, NewDayPlan, WorkLogItem, WorkLogItemId,
    },
    DayPlanError,
};

/// Aggregated statistics plus the text the user can share.
#[derive(Debug, Clone)]
pub struct DaySummaryReport {
    pub summary: DaySummary,
    pub share_text: String,
}

/// Inbound port for day-plan operations.
///
/// HTTP handlers call these use cases; the service delegates storage to a
/// `DayPlanRepository`.
#[async_trait]
pub trait DayPlanService: Send + Sync + 'static {
    /// Start a new day. Any plan still open is closed first.
    async fn start_day_plan(&self, plan: NewDayPlan) -> Result<DayPlanId, DayPlanError>;

    /// Replace the plan's focused projects with `projects`.
    async fn sync_day_plan_projects(
        &self,
        id: &DayPlanId,
        projects: &[FocusedProject],
    ) -> Result<(), DayPlanError>;

    async fn upsert_work_log_item(
        &self,
        id: &DayPlanId,
        item: &WorkLogItem,
    ) -> Result<(), DayPlanError>;

    async fn delete_work_log_item(
        &self,
        id: &DayPlanId,
        item_id: &WorkLogItemId,
    ) -> Result<(), DayPlanError>;

    async fn update_reflection(&self, id: &DayPlanId, reflection: &str)
        -> Result<(), DayPlanError>;

    /// Mark the plan closed, storing the reflection when one is given.
    async fn close_day_plan(
        &self,
        id: &DayPlanId,
        reflection: Option<&str>,
    ) -> Result<DayPlan, DayPlanError>;

    async fn get_open_day_plan(&self) -> Result<Option<DayPlan>, DayPlanError>;

    async fn get_day_plan(&self, id: &DayPlanId) -> Result<DayPlan, DayPlanError>;

    async fn get_day_plan_projects(
        &self,
        id: &DayPlanId,
    ) -> Result<Vec<FocusedProject>, DayPlanError>;

    /// Work-log entries, oldest first.
    async fn get_day_plan_work_log(&self, id: &DayPlanId)
        -> Result<Vec<WorkLogItem>, DayPlanError>;

    async fn get_day_summary(&self, id: &DayPlanId) -> Result<DaySummaryReport, DayPlanError>;
}
