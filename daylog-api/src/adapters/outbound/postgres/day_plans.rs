//! PostgreSQL implementation of the DayPlanRepository port.

use std::{str::FromStr, sync::Arc};

use async_trait::async_trait;
use sqlx::types::Json;

use crate::domain::{
    models::{
        DayPlan, DayPlanId, FocusedProject, NewDayPlan, ProjectId, TaskSource, WorkLogItem,
        WorkLogItemId,
    },
    ports::outbound::DayPlanRepository,
    DayPlanError,
};
use crate::repositories::{
    DatabaseDayPlan, DatabaseDayPlanProject, DatabaseWorkLogItem, DayPlanRepo, DayPlanRepoImpl,
    NewDatabaseDayPlan, RepositoryError,
};

/// Adapter that implements DayPlanRepository using PostgreSQL.
pub struct PostgresDayPlanRepository<R = DayPlanRepoImpl> {
    repo: Arc<R>,
}

impl<R> PostgresDayPlanRepository<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn storage_error(err: RepositoryError) -> DayPlanError {
    match err {
        RepositoryError::NotFound(what) => DayPlanError::NotFound(what),
        RepositoryError::DatabaseError(_) => {
            tracing::error!("day plan storage error: {:?}", err);
            DayPlanError::storage(err.to_string())
        }
    }
}

#[async_trait]
impl<R: DayPlanRepo + Send + Sync + 'static> DayPlanRepository for PostgresDayPlanRepository<R> {
    async fn close_open_plans(&self) -> Result<(), DayPlanError> {
        let closed = self.repo.close_open_plans().await.map_err(storage_error)?;
        if closed > 0 {
            tracing::debug!("closed {} previously open day plans", closed);
        }
        Ok(())
    }

    async fn insert_plan(&self, plan: &NewDayPlan) -> Result<DayPlan, DayPlanError> {
        let new_plan = NewDatabaseDayPlan {
            id: DayPlanId::new().as_uuid(),
            plan_date: plan.plan_date,
            timezone: plan.timezone.clone(),
        };

        self.repo
            .create_plan(&new_plan)
            .await
            .map(db_plan_to_domain)
            .map_err(storage_error)
    }

    async fn get_plan(&self, id: &DayPlanId) -> Result<Option<DayPlan>, DayPlanError> {
        let plan = self
            .repo
            .get_plan(&id.as_uuid())
            .await
            .map_err(storage_error)?;

        Ok(plan.map(db_plan_to_domain))
    }

    async fn get_open_plan(&self) -> Result<Option<DayPlan>, DayPlanError> {
        let plan = self.repo.get_open_plan().await.map_err(storage_error)?;
        Ok(plan.map(db_plan_to_domain))
    }

    async fn set_reflection(&self, id: &DayPlanId, reflection: &str) -> Result<(), DayPlanError> {
        self.repo
            .update_reflection(&id.as_uuid(), reflection)
            .await
            .map_err(storage_error)
    }

    async fn close_plan(&self, id: &DayPlanId) -> Result<(), DayPlanError> {
        self.repo
            .close_plan(&id.as_uuid())
            .await
            .map_err(storage_error)
    }

    async fn delete_projects(&self, id: &DayPlanId) -> Result<(), DayPlanError> {
        self.repo
            .delete_projects(&id.as_uuid())
            .await
            .map_err(storage_error)
    }

    async fn insert_projects(
        &self,
        id: &DayPlanId,
        projects: &[FocusedProject],
    ) -> Result<(), DayPlanError> {
        let rows: Vec<DatabaseDayPlanProject> = projects
            .iter()
            .map(|p| DatabaseDayPlanProject {
                project_id: p.project_id.to_string(),
                project_source: p.source.to_string(),
                project_name: p.name.clone(),
            })
            .collect();

        self.repo
            .insert_projects(&id.as_uuid(), &rows)
            .await
            .map_err(storage_error)
    }

    async fn list_projects(&self, id: &DayPlanId) -> Result<Vec<FocusedProject>, DayPlanError> {
        let rows = self
            .repo
            .get_projects(&id.as_uuid())
            .await
            .map_err(storage_error)?;

        rows.into_iter().map(db_project_to_domain).collect()
    }

    async fn upsert_work_log_item(
        &self,
        id: &DayPlanId,
        item: &WorkLogItem,
    ) -> Result<(), DayPlanError> {
        let duration_minutes = item
            .duration_minutes
            .map(i32::try_from)
            .transpose()
            .map_err(|_| DayPlanError::invalid("duration is out of range"))?;

        let row = DatabaseWorkLogItem {
            id: item.id.to_string(),
            description: item.description.clone(),
            timestamp: item.timestamp,
            project_id: item.project_id.as_ref().map(|p| p.to_string()),
            project_source: item.project_source.map(|s| s.to_string()),
            unplanned_reason: item.unplanned_reason.clone(),
            mentioned_issues: item.mentions.clone().map(Json),
            duration_minutes,
        };

        self.repo
            .upsert_work_log_item(&id.as_uuid(), &row)
            .await
            .map_err(storage_error)
    }

    async fn delete_work_log_item(
        &self,
        id: &DayPlanId,
        item_id: &WorkLogItemId,
    ) -> Result<(), DayPlanError> {
        self.repo
            .delete_work_log_item(&id.as_uuid(), item_id.as_str())
            .await
            .map_err(storage_error)
    }

    async fn list_work_log(&self, id: &DayPlanId) -> Result<Vec<WorkLogItem>, DayPlanError> {
        let rows = self
            .repo
            .get_work_log(&id.as_uuid())
            .await
            .map_err(storage_error)?;

        rows.into_iter().map(db_item_to_domain).collect()
    }
}

fn parse_source(source: &str) -> Result<TaskSource, DayPlanError> {
    TaskSource::from_str(source)
        .map_err(|_| DayPlanError::storage(format!("unknown project source '{source}'")))
}

fn db_plan_to_domain(plan: DatabaseDayPlan) -> DayPlan {
    DayPlan {
        id: DayPlanId::from(plan.id),
        plan_date: plan.plan_date,
        timezone: plan.timezone,
        is_open: plan.is_open,
        reflection: plan.reflection,
        created_at: plan.created_at,
    }
}

fn db_project_to_domain(row: DatabaseDayPlanProject) -> Result<FocusedProject, DayPlanError> {
    Ok(FocusedProject {
        project_id: ProjectId::from(row.project_id),
        source: parse_source(&row.project_source)?,
        name: row.project_name,
    })
}

fn db_item_to_domain(row: DatabaseWorkLogItem) -> Result<WorkLogItem, DayPlanError> {
    Ok(WorkLogItem {
        id: WorkLogItemId::from(row.id),
        description: row.description,
        timestamp: row.timestamp,
        project_id: row.project_id.map(ProjectId::from),
        project_source: row.project_source.as_deref().map(parse_source).transpose()?,
        unplanned_reason: row.unplanned_reason,
        mentions: row.mentioned_issues.map(|Json(m)| m),
        duration_minutes: row
            .duration_minutes
            .map(u32::try_from)
            .transpose()
            .map_err(|_| DayPlanError::storage("stored duration is negative"))?,
    })
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn row(duration_minutes: Option<i32>) -> DatabaseWorkLogItem {
        DatabaseWorkLogItem {
            id: "item-1".to_string(),
            description: "Review".to_string(),
            timestamp: datetime!(2025-03-01 09:00 UTC),
            project_id: Some("alpha".to_string()),
            project_source: Some("linear".to_string()),
            unplanned_reason: None,
            mentioned_issues: None,
            duration_minutes,
        }
    }

    #[test]
    fn stored_durations_map_to_minutes() {
        assert_eq!(db_item_to_domain(row(Some(45))).unwrap().duration_minutes, Some(45));
        assert_eq!(db_item_to_domain(row(None)).unwrap().duration_minutes, None);
    }

    #[test]
    fn negative_stored_duration_is_an_error() {
        assert!(matches!(
            db_item_to_domain(row(Some(-5))),
            Err(DayPlanError::Storage(_))
        ));
    }
}
