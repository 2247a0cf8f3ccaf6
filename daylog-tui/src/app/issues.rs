use crate::types::{Issue, Project};

/// Issues worth mentioning today.
///
/// Keeps issues without a project and issues whose project name overlaps a
/// focused project's name (case-insensitive, either containing the other).
/// In-progress issues come first, then by identifier.
pub fn shape_issues(issues: Vec<Issue>, focused: &[Project]) -> Vec<Issue> {
    let focused_names: Vec<String> = focused.iter().map(|p| p.name.to_lowercase()).collect();

    let mut kept: Vec<Issue> = issues
        .into_iter()
        .filter(|issue| match issue.project_name() {
            None => true,
            Some(name) => {
                let name = name.to_lowercase();
                focused_names
                    .iter()
                    .any(|focused| name.contains(focused.as_str()) || focused.contains(&name))
            }
        })
        .collect();

    kept.sort_by(|a, b| {
        b.is_in_progress()
            .cmp(&a.is_in_progress())
            .then_with(|| a.identifier.cmp(&b.identifier))
    });
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Named;

    fn issue(identifier: &str, state: &str, project: Option<&str>) -> Issue {
        Issue {
            id: identifier.to_string(),
            identifier: identifier.to_string(),
            title: String::new(),
            url: String::new(),
            state: Some(Named {
                name: state.to_string(),
            }),
            project: project.map(|name| Named {
                name: name.to_string(),
            }),
        }
    }

    fn focused(name: &str) -> Project {
        Project {
            id: name.to_lowercase(),
            source: "linear".to_string(),
            name: name.to_string(),
            url: None,
            state: None,
            progress: None,
        }
    }

    #[test]
    fn keeps_unassigned_and_matching_projects_in_progress_first() {
        let issues = vec![
            issue("ENG-3", "Todo", Some("Mobile App")),
            issue("ENG-2", "Todo", None),
            issue("ENG-9", "In Progress", Some("Billing")),
            issue("ENG-1", "Todo", Some("app")),
            issue("ENG-5", "In Progress", Some("Marketing site")),
        ];

        let shaped: Vec<String> = shape_issues(issues, &[focused("App"), focused("Billing v2")])
            .into_iter()
            .map(|i| i.identifier)
            .collect();

        assert_eq!(shaped, vec!["ENG-9", "ENG-1", "ENG-2", "ENG-3"]);
    }
}
