use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub state: String,
    /// Completion ratio between 0.0 and 1.0.
    pub progress: f64,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub target_date: Option<String>,
    pub start_date: Option<String>,
}
