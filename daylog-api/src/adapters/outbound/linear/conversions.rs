//! Conversions between Linear client types and domain types.

use time::{macros::format_description, Date};

use crate::domain::models::{IssueQuery, TrackerIssue, TrackerProject, TrackerUser};

pub fn to_domain_user(viewer: linear::domain::Viewer) -> TrackerUser {
    TrackerUser {
        id: viewer.id,
        name: viewer.name,
        email: viewer.email,
    }
}

pub fn to_domain_project(project: linear::domain::Project) -> TrackerProject {
    TrackerProject {
        id: project.id,
        name: project.name,
        description: project.description.filter(|d| !d.is_empty()),
        url: project.url,
        state: project.state,
        progress: project.progress,
        icon: project.icon,
        color: project.color,
        target_date: project.target_date.as_deref().and_then(parse_date),
        start_date: project.start_date.as_deref().and_then(parse_date),
    }
}

pub fn to_domain_issue(issue: linear::domain::Issue) -> TrackerIssue {
    TrackerIssue {
        state_name: issue.state_name().map(str::to_string),
        project_name: issue.project_name().map(str::to_string),
        id: issue.id,
        identifier: issue.identifier,
        title: issue.title,
        url: issue.url,
        priority: issue.priority,
        estimate: issue.estimate,
    }
}

pub fn to_issue_filter(query: &IssueQuery) -> linear::domain::IssueFilter {
    let mut filter = linear::domain::IssueFilter::new();
    if let Some(state) = &query.state {
        filter = filter.with_state(state);
    }
    if let Some(text) = &query.query {
        filter = filter.with_query(text);
    }
    if let Some(email) = &query.assignee_email {
        filter = filter.with_assignee_email(email);
    }
    filter
}

/// Linear sends calendar dates as `YYYY-MM-DD`.
fn parse_date(value: &str) -> Option<Date> {
    Date::parse(value, format_description!("[year]-[month]-[day]")).ok()
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn project_dates_parse_and_bad_dates_are_dropped() {
        let project = linear::domain::Project {
            id: "p1".to_string(),
            name: "Alpha".to_string(),
            description: Some(String::new()),
            url: "https://linear.app/acme/project/p1".to_string(),
            state: "started".to_string(),
            progress: 0.4,
            icon: None,
            color: None,
            target_date: Some("2025-06-30".to_string()),
            start_date: Some("soon".to_string()),
        };

        let converted = to_domain_project(project);
        assert_eq!(converted.target_date, Some(date!(2025-06-30)));
        assert_eq!(converted.start_date, None);
        assert_eq!(converted.description, None);
    }

    #[test]
    fn blank_query_fields_do_not_filter() {
        let filter = to_issue_filter(&IssueQuery {
            state: Some("  ".to_string()),
            query: Some("eng".to_string()),
            assignee_email: None,
        });

        assert_eq!(filter.state, None);
        assert_eq!(filter.query.as_deref(), Some("eng"));
    }
}
