use async_trait::async_trait;

use crate::domain::{
    models::{DayPlan, DayPlanId, FocusedProject, NewDayPlan, WorkLogItem, WorkLogItemId},
    DayPlanError,
};

/// Outbound port for day-plan storage.
///
/// Every method is a single statement against the store; orchestration lives
/// in the service.
#[async_trait]
pub trait DayPlanRepository: Send + Sync + 'static {
    async fn close_open_plans(&self) -> Result<(), DayPlanError>;

    async fn insert_plan(&self, plan: &NewDayPlan) -> Result<DayPlan, DayPlanError>;

    async fn get_plan(&self, id: &DayPlanId) -> Result<Option<DayPlan>, DayPlanError>;

    async fn get_open_plan(&self) -> Result<Option<DayPlan>, DayPlanError>;

    async fn set_reflection(&self, id: &DayPlanId, reflection: &str) -> Result<(), DayPlanError>;

    async fn close_plan(&self, id: &DayPlanId) -> Result<(), DayPlanError>;

    async fn delete_projects(&self, id: &DayPlanId) -> Result<(), DayPlanError>;

    async fn insert_projects(
        &self,
        id: &DayPlanId,
        projects: &[FocusedProject],
    ) -> Result<(), DayPlanError>;

    async fn list_projects(&self, id: &DayPlanId) -> Result<Vec<FocusedProject>, DayPlanError>;

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

    /// Ordered by timestamp, oldest first.
    async fn list_work_log(&self, id: &DayPlanId) -> Result<Vec<WorkLogItem>, DayPlanError>;
}
