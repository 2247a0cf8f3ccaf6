//! In-memory DayPlanRepository for tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{
    models::{DayPlan, DayPlanId, FocusedProject, NewDayPlan, WorkLogItem, WorkLogItemId},
    ports::outbound::DayPlanRepository,
    DayPlanError,
};

#[derive(Default)]
struct Tables {
    plans: HashMap<DayPlanId, DayPlan>,
    projects: HashMap<DayPlanId, Vec<FocusedProject>>,
    /// Keyed by item id, mirroring the primary key of `work_log_items`.
    items: HashMap<WorkLogItemId, (DayPlanId, WorkLogItem)>,
}

#[derive(Clone, Default)]
pub struct InMemoryDayPlanRepository {
    tables: Arc<RwLock<Tables>>,
}

#[async_trait]
impl DayPlanRepository for InMemoryDayPlanRepository {
    async fn close_open_plans(&self) -> Result<(), DayPlanError> {
        let mut tables = self.tables.write().unwrap();
        for plan in tables.plans.values_mut() {
            plan.is_open = false;
        }
        Ok(())
    }

    async fn insert_plan(&self, plan: &NewDayPlan) -> Result<DayPlan, DayPlanError> {
        let mut tables = self.tables.write().unwrap();
        if tables.plans.values().any(|p| p.is_open) {
            return Err(DayPlanError::storage(
                "duplicate key value violates unique constraint \"day_plans_single_open_idx\"",
            ));
        }

        let created = DayPlan {
            id: DayPlanId::new(),
            plan_date: plan.plan_date,
            timezone: plan.timezone.clone(),
            is_open: true,
            reflection: None,
            created_at: OffsetDateTime::now_utc(),
        };
        tables.plans.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_plan(&self, id: &DayPlanId) -> Result<Option<DayPlan>, DayPlanError> {
        Ok(self.tables.read().unwrap().plans.get(id).cloned())
    }

    async fn get_open_plan(&self) -> Result<Option<DayPlan>, DayPlanError> {
        let tables = self.tables.read().unwrap();
        Ok(tables.plans.values().find(|p| p.is_open).cloned())
    }

    async fn set_reflection(&self, id: &DayPlanId, reflection: &str) -> Result<(), DayPlanError> {
        if let Some(plan) = self.tables.write().unwrap().plans.get_mut(id) {
            plan.reflection = Some(reflection.to_string());
        }
        Ok(())
    }

    async fn close_plan(&self, id: &DayPlanId) -> Result<(), DayPlanError> {
        if let Some(plan) = self.tables.write().unwrap().plans.get_mut(id) {
            plan.is_open = false;
        }
        Ok(())
    }

    async fn delete_projects(&self, id: &DayPlanId) -> Result<(), DayPlanError> {
        self.tables.write().unwrap().projects.remove(id);
        Ok(())
    }

    async fn insert_projects(
        &self,
        id: &DayPlanId,
        projects: &[FocusedProject],
    ) -> Result<(), DayPlanError> {
        let mut tables = self.tables.write().unwrap();
        tables
            .projects
            .entry(*id)
            .or_default()
            .extend(projects.iter().cloned());
        Ok(())
    }

    async fn list_projects(&self, id: &DayPlanId) -> Result<Vec<FocusedProject>, DayPlanError> {
        let tables = self.tables.read().unwrap();
        Ok(tables.projects.get(id).cloned().unwrap_or_default())
    }

    async fn upsert_work_log_item(
        &self,
        id: &DayPlanId,
        item: &WorkLogItem,
    ) -> Result<(), DayPlanError> {
        self.tables
            .write()
            .unwrap()
            .items
            .insert(item.id.clone(), (*id, item.clone()));
        Ok(())
    }

    async fn delete_work_log_item(
        &self,
        id: &DayPlanId,
        item_id: &WorkLogItemId,
    ) -> Result<(), DayPlanError> {
        let mut tables = self.tables.write().unwrap();
        if tables.items.get(item_id).is_some_and(|(plan, _)| plan == id) {
            tables.items.remove(item_id);
        }
        Ok(())
    }

    async fn list_work_log(&self, id: &DayPlanId) -> Result<Vec<WorkLogItem>, DayPlanError> {
        let tables = self.tables.read().unwrap();
        let mut items: Vec<WorkLogItem> = tables
            .items
            .values()
            .filter(|(plan, _)| plan == id)
            .map(|(_, item)| item.clone())
            .collect();
        items.sort_by_key(|item| item.timestamp);
        Ok(items)
    }
}
