use crate::domain::Issue;

/// Narrows the assigned issue list.
///
/// `assignee_email` selects whose issues are fetched; `state` and `query` are
/// applied to the fetched list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    pub state: Option<String>,
    pub query: Option<String>,
    pub assignee_email: Option<String>,
}

impl IssueFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = non_blank(state.into());
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = non_blank(query.into());
        self
    }

    pub fn with_assignee_email(mut self, email: impl Into<String>) -> Self {
        self.assignee_email = non_blank(email.into());
        self
    }

    /// State names match case-insensitively and exactly, the query is a
    /// case-insensitive substring of `identifier + " " + title`.
    pub fn matches(&self, issue: &Issue) -> bool {
        if let Some(state) = &self.state {
            let Some(issue_state) = issue.state_name() else {
                return false;
            };
            if issue_state.to_lowercase() != state.to_lowercase() {
                return false;
            }
        }

        if let Some(query) = &self.query {
            let haystack = issue.search_text().to_lowercase();
            if !haystack.contains(&query.to_lowercase()) {
                return false;
            }
        }

        true
    }

    pub fn apply(&self, issues: Vec<Issue>) -> Vec<Issue> {
        issues.into_iter().filter(|issue| self.matches(issue)).collect()
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IssueState;

    fn issue(identifier: &str, title: &str, state: Option<&str>) -> Issue {
        Issue {
            id: format!("id-{identifier}"),
            identifier: identifier.to_string(),
            title: title.to_string(),
            url: format!("https://linear.app/acme/issue/{identifier}"),
            priority: None,
            estimate: None,
            state: state.map(|name| IssueState {
                name: name.to_string(),
            }),
            project: None,
        }
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let filter = IssueFilter::new();
        assert!(filter.matches(&issue("ENG-1", "Fix login", None)));
    }

    #[test]
    fn state_matches_case_insensitively_but_exactly() {
        let filter = IssueFilter::new().with_state("in progress");
        assert!(filter.matches(&issue("ENG-1", "Fix login", Some("In Progress"))));
        assert!(!filter.matches(&issue("ENG-2", "Fix login", Some("In Progress Review"))));
        assert!(!filter.matches(&issue("ENG-3", "Fix login", None)));
    }

    #[test]
    fn state_comparison_folds_non_ascii_case() {
        let filter = IssueFilter::new().with_state("ÉTUDE");
        assert!(filter.matches(&issue("ENG-1", "Fix login", Some("Étude"))));
        assert!(!filter.matches(&issue("ENG-2", "Fix login", Some("Étude 2"))));
    }

    #[test]
    fn query_searches_identifier_and_title() {
        let filter = IssueFilter::new().with_query("eng-1 fix");
        assert!(filter.matches(&issue("ENG-1", "Fix login", None)));
        assert!(!filter.matches(&issue("ENG-2", "Fix login", None)));

        let by_title = IssueFilter::new().with_query("LOGIN");
        assert!(by_title.matches(&issue("ENG-2", "Fix login", None)));
    }

    #[test]
    fn blank_values_are_ignored() {
        let filter = IssueFilter::new()
            .with_state("   ")
            .with_query("")
            .with_assignee_email(" ");
        assert_eq!(filter, IssueFilter::default());
    }

    #[test]
    fn apply_keeps_matching_issues_in_order() {
        let filter = IssueFilter::new().with_state("todo");
        let issues = vec![
            issue("ENG-1", "a", Some("Todo")),
            issue("ENG-2", "b", Some("Done")),
            issue("ENG-3", "c", Some("TODO")),
        ];

        let kept: Vec<_> = filter
            .apply(issues)
            .into_iter()
            .map(|i| i.identifier)
            .collect();
        assert_eq!(kept, vec!["ENG-1", "ENG-3"]);
    }
}
