use std::collections::BTreeMap;

use async_trait::async_trait;
use sqlx::{types::Json, FromRow, PgPool, Postgres, QueryBuilder};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::repo_error::RepositoryError;

const DAY_PLAN_COLUMNS: &str = "id, plan_date, timezone, is_open, reflection, created_at";

#[async_trait]
pub trait DayPlanRepo {
    async fn close_open_plans(&self) -> Result<u64, RepositoryError>;
    async fn create_plan(&self, plan: &NewDatabaseDayPlan) -> Result<DatabaseDayPlan, RepositoryError>;
    async fn get_plan(&self, id: &Uuid) -> Result<Option<DatabaseDayPlan>, RepositoryError>;
    async fn get_open_plan(&self) -> Result<Option<DatabaseDayPlan>, RepositoryError>;
    async fn update_reflection(&self, id: &Uuid, reflection: &str) -> Result<(), RepositoryError>;
    async fn close_plan(&self, id: &Uuid) -> Result<(), RepositoryError>;
    async fn delete_projects(&self, day_plan_id: &Uuid) -> Result<(), RepositoryError>;
    async fn insert_projects(
        &self,
        day_plan_id: &Uuid,
        projects: &[DatabaseDayPlanProject],
    ) -> Result<(), RepositoryError>;
    async fn get_projects(
        &self,
        day_plan_id: &Uuid,
    ) -> Result<Vec<DatabaseDayPlanProject>, RepositoryError>;
    async fn upsert_work_log_item(
        &self,
        day_plan_id: &Uuid,
        item: &DatabaseWorkLogItem,
    ) -> Result<(), RepositoryError>;
    async fn delete_work_log_item(
        &self,
        day_plan_id: &Uuid,
        item_id: &str,
    ) -> Result<(), RepositoryError>;
    async fn get_work_log(
        &self,
        day_plan_id: &Uuid,
    ) -> Result<Vec<DatabaseWorkLogItem>, RepositoryError>;
}

pub struct DayPlanRepoImpl {
    pool: PgPool,
}

impl DayPlanRepoImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DatabaseDayPlan {
    pub id: Uuid,
    pub plan_date: Date,
    pub timezone: Option<String>,
    pub is_open: bool,
    pub reflection: Option<String>,
    pub created_at: OffsetDateTime,
}

pub struct NewDatabaseDayPlan {
    pub id: Uuid,
    pub plan_date: Date,
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct DatabaseDayPlanProject {
    pub project_id: String,
    pub project_source: String,
    pub project_name: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct DatabaseWorkLogItem {
    pub id: String,
    pub description: String,
    pub timestamp: OffsetDateTime,
    pub project_id: Option<String>,
    pub project_source: Option<String>,
    pub unplanned_reason: Option<String>,
    pub mentioned_issues: Option<Json<BTreeMap<String, String>>>,
    pub duration_minutes: Option<i32>,
}

#[async_trait]
impl DayPlanRepo for DayPlanRepoImpl {
    async fn close_open_plans(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("UPDATE day_plans SET is_open = FALSE WHERE is_open")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn create_plan(&self, plan: &NewDatabaseDayPlan) -> Result<DatabaseDayPlan, RepositoryError> {
        let created = sqlx::query_as::<_, DatabaseDayPlan>(&format!(
            r#"
            INSERT INTO day_plans (id, plan_date, timezone, is_open)
            VALUES ($1, $2, $3, TRUE)
            RETURNING {DAY_PLAN_COLUMNS}
            "#
        ))
        .bind(plan.id)
        .bind(plan.plan_date)
        .bind(&plan.timezone)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_plan(&self, id: &Uuid) -> Result<Option<DatabaseDayPlan>, RepositoryError> {
        let plan = sqlx::query_as::<_, DatabaseDayPlan>(&format!(
            "SELECT {DAY_PLAN_COLUMNS} FROM day_plans WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(plan)
    }

    async fn get_open_plan(&self) -> Result<Option<DatabaseDayPlan>, RepositoryError> {
        let plan = sqlx::query_as::<_, DatabaseDayPlan>(&format!(
            "SELECT {DAY_PLAN_COLUMNS} FROM day_plans WHERE is_open ORDER BY created_at DESC LIMIT 1"
        ))
        .fetch_optional(&self.pool)
        .await?;

        Ok(plan)
    }

    async fn update_reflection(&self, id: &Uuid, reflection: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE day_plans SET reflection = $1 WHERE id = $2")
            .bind(reflection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("day plan {id}")));
        }

        Ok(())
    }

    async fn close_plan(&self, id: &Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE day_plans SET is_open = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("day plan {id}")));
        }

        Ok(())
    }

    async fn delete_projects(&self, day_plan_id: &Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM day_plan_projects WHERE day_plan_id = $1")
            .bind(day_plan_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn insert_projects(
        &self,
        day_plan_id: &Uuid,
        projects: &[DatabaseDayPlanProject],
    ) -> Result<(), RepositoryError> {
        if projects.is_empty() {
            return Ok(());
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO day_plan_projects (day_plan_id, project_id, project_source, project_name) ",
        );
        builder.push_values(projects, |mut row, project| {
            row.push_bind(*day_plan_id)
                .push_bind(&project.project_id)
                .push_bind(&project.project_source)
                .push_bind(&project.project_name);
        });
        builder.build().execute(&self.pool).await?;

        Ok(())
    }

    async fn get_projects(
        &self,
        day_plan_id: &Uuid,
    ) -> Result<Vec<DatabaseDayPlanProject>, RepositoryError> {
        let projects = sqlx::query_as::<_, DatabaseDayPlanProject>(
            r#"
            SELECT project_id, project_source, project_name
            FROM day_plan_projects
            WHERE day_plan_id = $1
            "#,
        )
        .bind(day_plan_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn upsert_work_log_item(
        &self,
        day_plan_id: &Uuid,
        item: &DatabaseWorkLogItem,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO work_log_items (
                id, day_plan_id, description, timestamp, project_id, project_source,
                unplanned_reason, mentioned_issues, duration_minutes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                day_plan_id = EXCLUDED.day_plan_id,
                description = EXCLUDED.description,
                timestamp = EXCLUDED.timestamp,
                project_id = EXCLUDED.project_id,
                project_source = EXCLUDED.project_source,
                unplanned_reason = EXCLUDED.unplanned_reason,
                mentioned_issues = EXCLUDED.mentioned_issues,
                duration_minutes = EXCLUDED.duration_minutes
            "#,
        )
        .bind(&item.id)
        .bind(day_plan_id)
        .bind(&item.description)
        .bind(item.timestamp)
        .bind(&item.project_id)
        .bind(&item.project_source)
        .bind(&item.unplanned_reason)
        .bind(&item.mentioned_issues)
        .bind(item.duration_minutes)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_work_log_item(
        &self,
        day_plan_id: &Uuid,
        item_id: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM work_log_items WHERE id = $1 AND day_plan_id = $2")
            .bind(item_id)
            .bind(day_plan_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get_work_log(
        &self,
        day_plan_id: &Uuid,
    ) -> Result<Vec<DatabaseWorkLogItem>, RepositoryError> {
        let items = sqlx::query_as::<_, DatabaseWorkLogItem>(
            r#"
            SELECT id, description, timestamp, project_id, project_source,
                   unplanned_reason, mentioned_issues, duration_minutes
            FROM work_log_items
            WHERE day_plan_id = $1
            ORDER BY timestamp ASC
            "#,
        )
        .bind(day_plan_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}
