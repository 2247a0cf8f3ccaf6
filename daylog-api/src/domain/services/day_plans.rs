use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    models::{
        DayPlan, DayPlanId, DaySummary, FocusedProject, NewDayPlan, WorkLogItem, WorkLogItemId,
        MAX_ITEM_MINUTES,
    },
    ports::{
        inbound::{DayPlanService, DaySummaryReport},
        outbound::DayPlanRepository,
    },
    DayPlanError,
};

/// Implementation of the DayPlanService inbound port.
pub struct DayPlanServiceImpl<R> {
    repo: Arc<R>,
}

impl<R: DayPlanRepository> DayPlanServiceImpl<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    async fn require_plan(&self, id: &DayPlanId) -> Result<DayPlan, DayPlanError> {
        self.repo
            .get_plan(id)
            .await?
            .ok_or_else(|| DayPlanError::NotFound(id.to_string()))
    }
}

/// Rejects blank ids and drops repeated projects, keeping the first.
fn normalize_projects(projects: &[FocusedProject]) -> Result<Vec<FocusedProject>, DayPlanError> {
    let mut normalized: Vec<FocusedProject> = Vec::with_capacity(projects.len());

    for project in projects {
        if project.project_id.as_str().trim().is_empty() {
            return Err(DayPlanError::invalid("project id must not be empty"));
        }
        if normalized
            .iter()
            .any(|p| p.project_id == project.project_id)
        {
            continue;
        }
        normalized.push(project.clone());
    }

    Ok(normalized)
}

fn validate_item(item: &WorkLogItem) -> Result<WorkLogItem, DayPlanError> {
    if item.id.as_str().trim().is_empty() {
        return Err(DayPlanError::invalid("work log item id must not be empty"));
    }

    let description = item.description.trim();
    if description.is_empty() {
        return Err(DayPlanError::invalid("description must not be empty"));
    }

    if item
        .project_id
        .as_ref()
        .is_some_and(|p| p.as_str().trim().is_empty())
    {
        return Err(DayPlanError::invalid("project id must not be empty"));
    }

    if item.minutes() > MAX_ITEM_MINUTES {
        return Err(DayPlanError::invalid(format!(
            "duration must be at most {MAX_ITEM_MINUTES} minutes"
        )));
    }

    let mut item = item.clone();
    item.description = description.to_string();
    item.mentions = item.mentions.filter(|m| !m.is_empty());
    Ok(item)
}

#[async_trait]
impl<R: DayPlanRepository> DayPlanService for DayPlanServiceImpl<R> {
    async fn start_day_plan(&self, plan: NewDayPlan) -> Result<DayPlanId, DayPlanError> {
        let projects = normalize_projects(&plan.projects)?;

        self.repo.close_open_plans().await?;
        let created = self.repo.insert_plan(&plan).await?;

        if !projects.is_empty() {
            self.repo.insert_projects(&created.id, &projects).await?;
        }

        tracing::info!(
            "started day plan {} for {} with {} projects",
            created.id,
            created.plan_date,
            projects.len()
        );
        Ok(created.id)
    }

    async fn sync_day_plan_projects(
        &self,
        id: &DayPlanId,
        projects: &[FocusedProject],
    ) -> Result<(), DayPlanError> {
        let projects = normalize_projects(projects)?;
        self.require_plan(id).await?;

        self.repo.delete_projects(id).await?;
        if projects.is_empty() {
            return Ok(());
        }
        self.repo.insert_projects(id, &projects).await
    }

    async fn upsert_work_log_item(
        &self,
        id: &DayPlanId,
        item: &WorkLogItem,
    ) -> Result<(), DayPlanError> {
        let item = validate_item(item)?;
        self.require_plan(id).await?;

        self.repo.upsert_work_log_item(id, &item).await
    }

    async fn delete_work_log_item(
        &self,
        id: &DayPlanId,
        item_id: &WorkLogItemId,
    ) -> Result<(), DayPlanError> {
        self.require_plan(id).await?;
        self.repo.delete_work_log_item(id, item_id).await
    }

    async fn update_reflection(
        &self,
        id: &DayPlanId,
        reflection: &str,
    ) -> Result<(), DayPlanError> {
        self.require_plan(id).await?;
        self.repo.set_reflection(id, reflection).await
    }

    async fn close_day_plan(
        &self,
        id: &DayPlanId,
        reflection: Option<&str>,
    ) -> Result<DayPlan, DayPlanError> {
        self.require_plan(id).await?;

        if let Some(reflection) = reflection {
            self.repo.set_reflection(id, reflection).await?;
        }
        self.repo.close_plan(id).await?;

        tracing::info!("closed day plan {}", id);
        self.require_plan(id).await
    }

    async fn get_open_day_plan(&self) -> Result<Option<DayPlan>, DayPlanError> {
        self.repo.get_open_plan().await
    }

    async fn get_day_plan(&self, id: &DayPlanId) -> Result<DayPlan, DayPlanError> {
        self.require_plan(id).await
    }

    async fn get_day_plan_projects(
        &self,
        id: &DayPlanId,
    ) -> Result<Vec<FocusedProject>, DayPlanError> {
        self.require_plan(id).await?;
        self.repo.list_projects(id).await
    }

    async fn get_day_plan_work_log(
        &self,
        id: &DayPlanId,
    ) -> Result<Vec<WorkLogItem>, DayPlanError> {
        self.require_plan(id).await?;
        self.repo.list_work_log(id).await
    }

    async fn get_day_summary(&self, id: &DayPlanId) -> Result<DaySummaryReport, DayPlanError> {
        let plan = self.require_plan(id).await?;
        let projects = self.repo.list_projects(id).await?;
        let items = self.repo.list_work_log(id).await?;

        let summary = DaySummary::calculate(&items, &projects);
        let share_text = summary.share_text(&items, plan.reflection.as_deref());

        Ok(DaySummaryReport {
            summary,
            share_text,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use time::{macros::date, Duration, OffsetDateTime};

    use super::*;
    use crate::{
        adapters::outbound::memory::InMemoryDayPlanRepository,
        domain::models::{ProjectId, TaskSource},
    };

    fn service() -> DayPlanServiceImpl<InMemoryDayPlanRepository> {
        DayPlanServiceImpl::new(Arc::new(InMemoryDayPlanRepository::default()))
    }

    fn new_plan(projects: Vec<FocusedProject>) -> NewDayPlan {
        NewDayPlan {
            plan_date: date!(2025-03-01),
            timezone: Some("Europe/Stockholm".to_string()),
            projects,
        }
    }

    fn alpha() -> FocusedProject {
        FocusedProject::new("alpha", TaskSource::Linear).with_name("Alpha")
    }

    fn item(id: &str, project: Option<&str>, offset_minutes: i64) -> WorkLogItem {
        WorkLogItem {
            id: WorkLogItemId::new(id),
            description: format!("  task {id} "),
            timestamp: OffsetDateTime::UNIX_EPOCH + Duration::minutes(offset_minutes),
            project_id: project.map(ProjectId::from),
            project_source: project.map(|_| TaskSource::Linear),
            unplanned_reason: None,
            mentions: Some(BTreeMap::new()),
            duration_minutes: Some(30),
        }
    }

    #[tokio::test]
    async fn starting_a_day_closes_the_previous_one() {
        let service = service();

        let first = service.start_day_plan(new_plan(vec![alpha()])).await.unwrap();
        let second = service.start_day_plan(new_plan(vec![])).await.unwrap();

        let open = service.get_open_day_plan().await.unwrap().unwrap();
        assert_eq!(open.id, second);
        assert!(!service.get_day_plan(&first).await.unwrap().is_open);
        assert_eq!(service.get_day_plan_projects(&first).await.unwrap().len(), 1);
        assert!(service.get_day_plan_projects(&second).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn syncing_an_empty_list_removes_all_projects() {
        let service = service();
        let id = service
            .start_day_plan(new_plan(vec![
                alpha(),
                FocusedProject::new("beta", TaskSource::Linear),
            ]))
            .await
            .unwrap();

        service.sync_day_plan_projects(&id, &[]).await.unwrap();

        assert!(service.get_day_plan_projects(&id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sync_replaces_and_dedupes_projects() {
        let service = service();
        let id = service.start_day_plan(new_plan(vec![alpha()])).await.unwrap();

        let beta = FocusedProject::new("beta", TaskSource::Linear).with_name("Beta");
        service
            .sync_day_plan_projects(&id, &[beta.clone(), beta.clone()])
            .await
            .unwrap();

        assert_eq!(service.get_day_plan_projects(&id).await.unwrap(), vec![beta]);
    }

    #[tokio::test]
    async fn blank_project_ids_are_rejected() {
        let service = service();
        let result = service
            .start_day_plan(new_plan(vec![FocusedProject::new(" ", TaskSource::App)]))
            .await;

        assert!(matches!(result, Err(DayPlanError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn upsert_overwrites_by_id_and_log_is_ordered_by_timestamp() {
        let service = service();
        let id = service.start_day_plan(new_plan(vec![alpha()])).await.unwrap();

        service
            .upsert_work_log_item(&id, &item("late", Some("alpha"), 60))
            .await
            .unwrap();
        service
            .upsert_work_log_item(&id, &item("early", None, 5))
            .await
            .unwrap();

        let mut edited = item("late", Some("alpha"), 60);
        edited.description = "rewritten".to_string();
        service.upsert_work_log_item(&id, &edited).await.unwrap();

        let log = service.get_day_plan_work_log(&id).await.unwrap();
        let ids: Vec<&str> = log.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);
        assert_eq!(log[0].description, "task early");
        assert_eq!(log[0].mentions, None);
        assert_eq!(log[1].description, "rewritten");
    }

    #[tokio::test]
    async fn empty_descriptions_are_rejected() {
        let service = service();
        let id = service.start_day_plan(new_plan(vec![])).await.unwrap();

        let mut blank = item("x", None, 0);
        blank.description = "   ".to_string();

        assert!(matches!(
            service.upsert_work_log_item(&id, &blank).await,
            Err(DayPlanError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn durations_longer_than_a_day_are_rejected() {
        let service = service();
        let id = service.start_day_plan(new_plan(vec![])).await.unwrap();

        let mut full_day = item("day", None, 0);
        full_day.duration_minutes = Some(MAX_ITEM_MINUTES);
        service.upsert_work_log_item(&id, &full_day).await.unwrap();

        let mut huge = item("huge", None, 1);
        huge.duration_minutes = Some(i32::MAX as u32);
        assert!(matches!(
            service.upsert_work_log_item(&id, &huge).await,
            Err(DayPlanError::InvalidInput(_))
        ));

        let report = service.get_day_summary(&id).await.unwrap();
        assert_eq!(report.summary.total_minutes, MAX_ITEM_MINUTES);
    }

    #[tokio::test]
    async fn delete_only_touches_the_given_plan() {
        let service = service();
        let first = service.start_day_plan(new_plan(vec![])).await.unwrap();
        service
            .upsert_work_log_item(&first, &item("a", None, 0))
            .await
            .unwrap();
        let second = service.start_day_plan(new_plan(vec![])).await.unwrap();

        service
            .delete_work_log_item(&second, &WorkLogItemId::new("a"))
            .await
            .unwrap();
        assert_eq!(service.get_day_plan_work_log(&first).await.unwrap().len(), 1);

        service
            .delete_work_log_item(&first, &WorkLogItemId::new("a"))
            .await
            .unwrap();
        assert!(service.get_day_plan_work_log(&first).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_plan_is_not_found() {
        let service = service();
        let missing = DayPlanId::new();

        assert!(matches!(
            service.get_day_plan(&missing).await,
            Err(DayPlanError::NotFound(_))
        ));
        assert!(matches!(
            service.update_reflection(&missing, "hi").await,
            Err(DayPlanError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn closing_stores_reflection_and_clears_open_plan() {
        let service = service();
        let id = service.start_day_plan(new_plan(vec![])).await.unwrap();

        let closed = service
            .close_day_plan(&id, Some("Shipped the thing"))
            .await
            .unwrap();

        assert!(!closed.is_open);
        assert_eq!(closed.reflection.as_deref(), Some("Shipped the thing"));
        assert!(service.get_open_day_plan().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn summary_counts_unplanned_meeting() {
        let service = service();
        let id = service.start_day_plan(new_plan(vec![alpha()])).await.unwrap();

        service
            .upsert_work_log_item(&id, &item("1", Some("alpha"), 0))
            .await
            .unwrap();
        let mut meeting = item("2", None, 10);
        meeting.unplanned_reason = Some("Meeting".to_string());
        service.upsert_work_log_item(&id, &meeting).await.unwrap();
        service.update_reflection(&id, "Solid day").await.unwrap();

        let report = service.get_day_summary(&id).await.unwrap();

        assert_eq!(report.summary.total_tasks, 2);
        assert_eq!(report.summary.unplanned_count, 1);
        assert_eq!(report.summary.total_minutes, 60);
        assert_eq!(report.summary.project_breakdown[0].project_name, "Alpha");
        assert!(report.share_text.contains("• task 2 (Meeting) - 30m"));
        assert!(report.share_text.ends_with("Reflection:\nSolid day"));
    }
}
