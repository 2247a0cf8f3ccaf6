use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{
    domain::{Issue, IssueFilter, Project, Viewer},
    Credentials, LinearURL,
};

/// Linear caps list pages; the app never asks for more than one page.
pub const PAGE_SIZE: usize = 50;

const VIEWER_QUERY: &str = r#"
    query Viewer {
      viewer {
        id
        name
        email
      }
    }
"#;

const PROJECTS_QUERY: &str = r#"
    query Projects($first: Int!) {
      projects(first: $first) {
        nodes {
          id
          name
          description
          url
          state
          progress
          icon
          color
          targetDate
          startDate
        }
      }
    }
"#;

const VIEWER_ISSUES_QUERY: &str = r#"
    query ViewerIssues($first: Int!) {
      viewer {
        id
        name
        email
        assignedIssues(first: $first) {
          nodes {
            id
            identifier
            title
            url
            priority
            estimate
            state { name }
            project { name }
          }
        }
      }
    }
"#;

const ISSUES_BY_EMAIL_QUERY: &str = r#"
    query IssuesByEmail($email: String!, $first: Int!) {
      users(filter: { email: { eq: $email } }) {
        nodes {
          id
          name
          email
          assignedIssues(first: $first) {
            nodes {
              id
              identifier
              title
              url
              priority
              estimate
              state { name }
              project { name }
            }
          }
        }
      }
    }
"#;

#[derive(Debug, Clone)]
pub struct LinearClient {
    http: reqwest::Client,
    credentials: Credentials,
    url: LinearURL,
}

impl LinearClient {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
            url: LinearURL::default(),
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.url = LinearURL::new(url);
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, LinearError> {
        let resp = self
            .http
            .post(self.url.as_ref())
            .header("Authorization", self.credentials.as_authorization_header())
            .json(&GraphQLRequest { query, variables })
            .send()
            .await
            .map_err(|e| LinearError::Request(e.to_string()))?;

        let status = resp.status();
        if status == 401 || status == 403 {
            return Err(LinearError::NotConnected);
        }

        let body = resp.text().await.map_err(|e| {
            LinearError::Request(format!("Failed to read response body: {}", e))
        })?;

        let envelope: GraphQLResponse<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return Err(LinearError::Parse(e.to_string()))
            }
            Err(_) => {
                return Err(LinearError::Request(format!(
                    "Linear API request failed with status {}",
                    status
                )))
            }
        };

        envelope.into_data()
    }

    pub async fn viewer(&self) -> Result<Viewer, LinearError> {
        let data: ViewerData<Viewer> = self.query(VIEWER_QUERY, json!({})).await?;
        Ok(data.viewer)
    }

    pub async fn projects(&self) -> Result<Vec<Project>, LinearError> {
        let data: ProjectsData = self
            .query(PROJECTS_QUERY, json!({ "first": PAGE_SIZE }))
            .await?;
        tracing::debug!("fetched {} linear projects", data.projects.nodes.len());
        Ok(data.projects.nodes)
    }

    /// Issues assigned to the viewer, or to the user with the filter's
    /// assignee email, narrowed by the filter's state and query.
    pub async fn assigned_issues(
        &self,
        filter: &IssueFilter,
    ) -> Result<AssignedIssues, LinearError> {
        let user = match &filter.assignee_email {
            Some(email) => {
                let data: UsersData = self
                    .query(
                        ISSUES_BY_EMAIL_QUERY,
                        json!({ "email": email, "first": PAGE_SIZE }),
                    )
                    .await?;
                data.users.nodes.into_iter().next()
            }
            None => {
                let data: ViewerData<UserWithIssues> = self
                    .query(VIEWER_ISSUES_QUERY, json!({ "first": PAGE_SIZE }))
                    .await?;
                Some(data.viewer)
            }
        };

        let Some(user) = user else {
            return Ok(AssignedIssues {
                user: None,
                issues: Vec::new(),
            });
        };

        let issues = filter.apply(user.assigned_issues.nodes);
        tracing::debug!("{} assigned issues after filtering", issues.len());

        Ok(AssignedIssues {
            user: Some(Viewer {
                id: user.id,
                name: user.name,
                email: user.email,
            }),
            issues,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignedIssues {
    pub user: Option<Viewer>,
    pub issues: Vec<Issue>,
}

#[derive(Error, Debug)]
pub enum LinearError {
    #[error("Linear is not connected")]
    NotConnected,
    #[error("Request failed: {0}")]
    Request(String),
    #[error("{0}")]
    Api(String),
    #[error("Failed to parse Linear response: {0}")]
    Parse(String),
    #[error("OAuth error: {0}")]
    OAuth(String),
}

#[derive(Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    variables: Value,
}

/// The standard GraphQL envelope. Linear reports most failures as a 200 or
/// 400 with a populated `errors` array.
#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQLError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

impl<T> GraphQLResponse<T> {
    pub fn into_data(self) -> Result<T, LinearError> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(LinearError::Api(error.message));
        }

        self.data.ok_or_else(|| {
            LinearError::Parse("response contained no data".to_string())
        })
    }
}

#[derive(Debug, Deserialize)]
struct Connection<T> {
    nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ViewerData<T> {
    viewer: T,
}

#[derive(Debug, Deserialize)]
struct ProjectsData {
    projects: Connection<Project>,
}

#[derive(Debug, Deserialize)]
struct UsersData {
    users: Connection<UserWithIssues>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserWithIssues {
    id: String,
    name: Option<String>,
    email: Option<String>,
    assigned_issues: Connection<Issue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphql_errors_take_precedence_over_data() {
        let body = r#"{"data":null,"errors":[{"message":"Authentication required"}]}"#;
        let response: GraphQLResponse<ViewerData<Viewer>> = serde_json::from_str(body).unwrap();

        match response.into_data() {
            Err(LinearError::Api(message)) => assert_eq!(message, "Authentication required"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_data_is_a_parsing_error() {
        let response: GraphQLResponse<ViewerData<Viewer>> =
            serde_json::from_str(r#"{"data":null}"#).unwrap();
        assert!(matches!(
            response.into_data(),
            Err(LinearError::Parse(_))
        ));
    }

    #[test]
    fn assigned_issues_payload_parses() {
        let body = r#"{
            "data": {
                "viewer": {
                    "id": "u1",
                    "name": "Ada",
                    "email": "ada@example.com",
                    "assignedIssues": {
                        "nodes": [{
                            "id": "i1",
                            "identifier": "ENG-42",
                            "title": "Ship it",
                            "url": "https://linear.app/acme/issue/ENG-42",
                            "priority": 2,
                            "estimate": null,
                            "state": { "name": "In Progress" },
                            "project": { "name": "Alpha" }
                        }]
                    }
                }
            }
        }"#;

        let response: GraphQLResponse<ViewerData<UserWithIssues>> =
            serde_json::from_str(body).unwrap();
        let viewer = response.into_data().unwrap().viewer;
        let issue = &viewer.assigned_issues.nodes[0];

        assert_eq!(viewer.email.as_deref(), Some("ada@example.com"));
        assert_eq!(issue.identifier, "ENG-42");
        assert_eq!(issue.project_name(), Some("Alpha"));
        assert!(issue.is_in_progress());
    }

    #[tokio::test]
    async fn unreachable_api_is_a_request_error() {
        let client = LinearClient::new(Credentials::from_token("lin_api_test"))
            .with_api_url("http://127.0.0.1:9/graphql");

        let result = client.viewer().await;
        assert!(matches!(result, Err(LinearError::Request(_))));
    }
}
