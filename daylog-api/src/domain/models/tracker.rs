use time::Date;

/// The account a tracker credential belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerUser {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// A project as reported live by the issue tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerProject {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub state: String,
    pub progress: f64,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub target_date: Option<Date>,
    pub start_date: Option<Date>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackerIssue {
    pub id: String,
    pub identifier: String,
    pub title: String,
    pub url: String,
    pub priority: Option<f64>,
    pub estimate: Option<f64>,
    pub state_name: Option<String>,
    pub project_name: Option<String>,
}

/// Narrowing applied to an assigned-issue listing. Blank values are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueQuery {
    pub state: Option<String>,
    pub query: Option<String>,
    pub assignee_email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProjectListing {
    /// Only known for OAuth connections.
    pub user: Option<TrackerUser>,
    pub projects: Vec<TrackerProject>,
    pub connected: bool,
}

#[derive(Debug, Clone)]
pub struct IssueListing {
    pub user: Option<TrackerUser>,
    pub issues: Vec<TrackerIssue>,
}
