use anyhow::Context;
use reqwest::{cookie::Jar, Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;
use time::{macros::format_description, Date};

use crate::api::dto::{
    CloseDayPlanRequest, ErrorResponse, LinearIssuesResponse, LinearProjectsResponse,
    ProjectRequest, ReflectionRequest, StartDayPlanRequest, StartDayPlanResponse,
    SyncProjectsRequest, WorkLogItemRequest,
};
use crate::types::{DayPlan, DaySummary, Issue, LinearProject, Project, WorkLogItem};

const ACCESS_TOKEN_COOKIE: &str = "linear_access_token";
const LINEAR_NOT_CONNECTED: &str = "LINEAR_NOT_CONNECTED";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Linear is not connected. Run `daylog-tui connect` with a Linear API key.")]
    LinearNotConnected,
    #[error("{0}")]
    Server(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, linear_api_key: Option<&str>) -> anyhow::Result<Self> {
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))
            .with_context(|| format!("Invalid API URL: {}", base_url))?;
        let jar = Arc::new(Jar::default());

        if let Some(key) = linear_api_key {
            jar.add_cookie_str(
                &format!("{}={}; Path=/", ACCESS_TOKEN_COOKIE, key),
                &base_url,
            );
        }

        let client = Client::builder()
            .cookie_provider(jar)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> anyhow::Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .with_context(|| format!("Failed to build URL for path {}", path))
    }

    async fn send(&self, request: RequestBuilder, call_name: &str) -> ApiResult<Response> {
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to call {}", call_name))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.json::<ErrorResponse>().await.ok();
        if status == StatusCode::UNAUTHORIZED
            && body.as_ref().and_then(|b| b.code.as_deref()) == Some(LINEAR_NOT_CONNECTED)
        {
            return Err(ApiError::LinearNotConnected);
        }

        let message = body
            .map(|b| b.error)
            .unwrap_or_else(|| format!("{} returned {}", call_name, status));
        tracing::warn!("{} failed with {}: {}", call_name, status, message);
        Err(ApiError::Server(message))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, call_name: &str) -> ApiResult<T> {
        let request = self.client.get(self.endpoint(path)?);
        let response = self.send(request, call_name).await?;
        let value = response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse {} response", call_name))?;
        Ok(value)
    }

    // ------------------------------------------------------------------------
    // Day plans
    // ------------------------------------------------------------------------

    pub async fn get_open_day_plan(&self) -> ApiResult<Option<DayPlan>> {
        self.get_json("/api/day-plans/open", "get_open_day_plan").await
    }

    pub async fn get_day_plan(&self, id: &str) -> ApiResult<DayPlan> {
        self.get_json(&format!("/api/day-plans/{id}"), "get_day_plan")
            .await
    }

    pub async fn start_day_plan(
        &self,
        plan_date: Date,
        timezone: Option<String>,
        projects: &[LinearProject],
    ) -> ApiResult<String> {
        let plan_date = plan_date
            .format(format_description!("[year]-[month]-[day]"))
            .context("Failed to format plan date")?;
        let body = StartDayPlanRequest {
            plan_date,
            timezone,
            projects: project_requests(projects),
        };

        let request = self
            .client
            .post(self.endpoint("/api/day-plans")?)
            .json(&body);
        let response = self.send(request, "start_day_plan").await?;
        let created = response
            .json::<StartDayPlanResponse>()
            .await
            .context("Failed to parse start_day_plan response")?;
        Ok(created.day_plan_id)
    }

    pub async fn sync_projects(&self, id: &str, projects: &[LinearProject]) -> ApiResult<()> {
        let body = SyncProjectsRequest {
            projects: project_requests(projects),
        };
        let request = self
            .client
            .put(self.endpoint(&format!("/api/day-plans/{id}/projects"))?)
            .json(&body);
        self.send(request, "sync_projects").await?;
        Ok(())
    }

    pub async fn get_plan_projects(&self, id: &str) -> ApiResult<Vec<Project>> {
        self.get_json(&format!("/api/day-plans/{id}/projects"), "get_plan_projects")
            .await
    }

    pub async fn get_work_log(&self, id: &str) -> ApiResult<Vec<WorkLogItem>> {
        self.get_json(&format!("/api/day-plans/{id}/work-log"), "get_work_log")
            .await
    }

    pub async fn upsert_work_log_item(&self, id: &str, item: &WorkLogItem) -> ApiResult<()> {
        let body = WorkLogItemRequest {
            description: &item.description,
            timestamp: item.timestamp,
            project_id: item.project_id.as_deref(),
            project_source: item.project_source.as_deref(),
            unplanned_reason: item.unplanned_reason.as_deref(),
            mentioned_issues: item.mentioned_issues.as_ref(),
            duration_minutes: item.duration_minutes,
        };
        let request = self
            .client
            .put(self.endpoint(&format!("/api/day-plans/{id}/work-log/{}", item.id))?)
            .json(&body);
        self.send(request, "upsert_work_log_item").await?;
        Ok(())
    }

    pub async fn delete_work_log_item(&self, id: &str, item_id: &str) -> ApiResult<()> {
        let request = self
            .client
            .delete(self.endpoint(&format!("/api/day-plans/{id}/work-log/{item_id}"))?);
        self.send(request, "delete_work_log_item").await?;
        Ok(())
    }

    pub async fn update_reflection(&self, id: &str, reflection: &str) -> ApiResult<()> {
        let request = self
            .client
            .put(self.endpoint(&format!("/api/day-plans/{id}/reflection"))?)
            .json(&ReflectionRequest { reflection });
        self.send(request, "update_reflection").await?;
        Ok(())
    }

    pub async fn close_day_plan(&self, id: &str, reflection: Option<&str>) -> ApiResult<DayPlan> {
        let request = self
            .client
            .post(self.endpoint(&format!("/api/day-plans/{id}/close"))?)
            .json(&CloseDayPlanRequest { reflection });
        let response = self.send(request, "close_day_plan").await?;
        let plan = response
            .json::<DayPlan>()
            .await
            .context("Failed to parse close_day_plan response")?;
        Ok(plan)
    }

    pub async fn get_summary(&self, id: &str) -> ApiResult<DaySummary> {
        self.get_json(&format!("/api/day-plans/{id}/summary"), "get_summary")
            .await
    }

    // ------------------------------------------------------------------------
    // Linear
    // ------------------------------------------------------------------------

    pub async fn get_linear_projects(&self) -> ApiResult<Vec<LinearProject>> {
        let response: LinearProjectsResponse =
            self.get_json("/api/linear/projects", "get_linear_projects").await?;
        Ok(response.projects)
    }

    pub async fn get_linear_issues(&self) -> ApiResult<Vec<Issue>> {
        let response: LinearIssuesResponse =
            self.get_json("/api/linear/issues", "get_linear_issues").await?;
        Ok(response.issues)
    }
}

fn project_requests(projects: &[LinearProject]) -> Vec<ProjectRequest<'_>> {
    projects
        .iter()
        .map(|p| ProjectRequest {
            project_id: &p.id,
            project_source: "linear",
            project_name: &p.name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_keep_the_base_path() {
        let client = ApiClient::new("http://localhost:8080/daylog/", None).unwrap();
        assert_eq!(
            client.endpoint("/api/day-plans/open").unwrap().as_str(),
            "http://localhost:8080/daylog/api/day-plans/open"
        );
    }
}
