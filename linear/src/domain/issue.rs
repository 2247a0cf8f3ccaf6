use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    /// Team-scoped key such as `ENG-123`.
    pub identifier: String,
    pub title: String,
    pub url: String,
    pub priority: Option<f64>,
    pub estimate: Option<f64>,
    pub state: Option<IssueState>,
    pub project: Option<IssueProject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueState {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueProject {
    pub name: String,
}

impl Issue {
    pub fn state_name(&self) -> Option<&str> {
        self.state.as_ref().map(|s| s.name.as_str())
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project.as_ref().map(|p| p.name.as_str())
    }

    /// Text used for free-text matching: identifier and title.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.identifier, self.title)
    }

    pub fn is_in_progress(&self) -> bool {
        self.state_name()
            .map(|name| name.to_lowercase().contains("progress"))
            .unwrap_or(false)
    }
}
