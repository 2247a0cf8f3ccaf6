use super::{FocusedProject, ProjectId, WorkLogItem};

pub const UNKNOWN_PROJECT: &str = "Unknown Project";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectBreakdown {
    pub project_id: ProjectId,
    pub project_name: String,
    pub count: usize,
    pub minutes: u32,
}

/// Totals for one day of logged work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    pub total_tasks: usize,
    pub total_minutes: u32,
    pub planned_minutes: u32,
    pub unplanned_minutes: u32,
    /// One entry per project, in the order projects first appear in the log.
    pub project_breakdown: Vec<ProjectBreakdown>,
    pub unplanned_count: usize,
}

impl DaySummary {
    pub fn calculate(items: &[WorkLogItem], projects: &[FocusedProject]) -> Self {
        let mut breakdown: Vec<ProjectBreakdown> = Vec::new();
        let mut unplanned_count = 0;
        let mut unplanned_minutes = 0;

        for item in items {
            let Some(project_id) = &item.project_id else {
                unplanned_count += 1;
                unplanned_minutes = add_minutes(unplanned_minutes, item.minutes());
                continue;
            };

            match breakdown.iter_mut().find(|b| &b.project_id == project_id) {
                Some(entry) => {
                    entry.count += 1;
                    entry.minutes = add_minutes(entry.minutes, item.minutes());
                }
                None => breakdown.push(ProjectBreakdown {
                    project_id: project_id.clone(),
                    project_name: project_name(project_id, projects),
                    count: 1,
                    minutes: item.minutes(),
                }),
            }
        }

        let planned_minutes = breakdown.iter().map(|b| b.minutes).fold(0, add_minutes);

        Self {
            total_tasks: items.len(),
            total_minutes: add_minutes(planned_minutes, unplanned_minutes),
            planned_minutes,
            unplanned_minutes,
            project_breakdown: breakdown,
            unplanned_count,
        }
    }

    /// Plain-text digest of the day, suitable for pasting into chat.
    pub fn share_text(&self, items: &[WorkLogItem], reflection: Option<&str>) -> String {
        let mut lines: Vec<String> = vec!["Today's Work:".to_string(), String::new()];

        if !self.project_breakdown.is_empty() {
            lines.push("Projects:".to_string());
            for project in &self.project_breakdown {
                let tasks = items
                    .iter()
                    .filter(|item| item.project_id.as_ref() == Some(&project.project_id));
                for task in tasks {
                    let duration = match task.duration_minutes {
                        Some(minutes) if minutes > 0 => format!(" ({})", format_duration(minutes)),
                        _ => String::new(),
                    };
                    lines.push(format!(
                        "• [{}] {}{}",
                        project.project_name, task.description, duration
                    ));
                }
            }
            lines.push(String::new());
        }

        let unplanned: Vec<&WorkLogItem> = items.iter().filter(|i| i.is_unplanned()).collect();
        if !unplanned.is_empty() {
            lines.push("Unplanned:".to_string());
            for task in unplanned {
                let reason = task
                    .unplanned_reason
                    .as_deref()
                    .filter(|r| !r.is_empty())
                    .map(|r| format!(" ({r})"))
                    .unwrap_or_default();
                let duration = match task.duration_minutes {
                    Some(minutes) if minutes > 0 => format!(" - {}", format_duration(minutes)),
                    _ => String::new(),
                };
                lines.push(format!("• {}{}{}", task.description, reason, duration));
            }
            lines.push(String::new());
        }

        if self.total_minutes > 0 {
            lines.push(format!("Total time: {}", format_duration(self.total_minutes)));
            lines.push(String::new());
        }

        if let Some(reflection) = reflection.map(str::trim).filter(|r| !r.is_empty()) {
            lines.push("Reflection:".to_string());
            lines.push(reflection.to_string());
        }

        lines.join("\n")
    }
}

fn project_name(project_id: &ProjectId, projects: &[FocusedProject]) -> String {
    projects
        .iter()
        .find(|p| &p.project_id == project_id)
        .and_then(|p| p.name.clone())
        .unwrap_or_else(|| UNKNOWN_PROJECT.to_string())
}

/// `90` -> `1h 30m`, `120` -> `2h`, `45` -> `45m`.
fn add_minutes(a: u32, b: u32) -> u32 {
    a.saturating_add(b)
}

pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;

    match (hours, mins) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::domain::models::{TaskSource, WorkLogItemId};

    fn item(id: &str, project: Option<&str>, minutes: Option<u32>) -> WorkLogItem {
        WorkLogItem {
            id: WorkLogItemId::new(id),
            description: format!("task {id}"),
            timestamp: datetime!(2025-03-01 09:00 UTC),
            project_id: project.map(ProjectId::from),
            project_source: project.map(|_| TaskSource::Linear),
            unplanned_reason: None,
            mentions: None,
            duration_minutes: minutes,
        }
    }

    fn focused() -> Vec<FocusedProject> {
        vec![
            FocusedProject::new("alpha", TaskSource::Linear).with_name("Alpha"),
            FocusedProject::new("beta", TaskSource::Linear).with_name("Beta"),
        ]
    }

    #[test]
    fn formats_durations() {
        assert_eq!(format_duration(0), "0m");
        assert_eq!(format_duration(45), "45m");
        assert_eq!(format_duration(60), "1h");
        assert_eq!(format_duration(90), "1h 30m");
        assert_eq!(format_duration(125), "2h 5m");
    }

    #[test]
    fn project_and_unplanned_minutes_add_up_to_total() {
        let items = vec![
            item("1", Some("beta"), Some(30)),
            item("2", None, Some(15)),
            item("3", Some("alpha"), None),
            item("4", Some("beta"), Some(45)),
            item("5", None, None),
        ];
        let summary = DaySummary::calculate(&items, &focused());

        assert_eq!(summary.total_tasks, 5);
        assert_eq!(summary.total_minutes, 90);
        assert_eq!(summary.unplanned_count, 2);
        assert_eq!(summary.unplanned_minutes, 15);
        assert_eq!(
            summary.planned_minutes + summary.unplanned_minutes,
            summary.total_minutes
        );
        let project_minutes: u32 = summary.project_breakdown.iter().map(|b| b.minutes).sum();
        assert_eq!(project_minutes, summary.planned_minutes);
    }

    #[test]
    fn oversized_durations_saturate_instead_of_overflowing() {
        let items = vec![
            item("1", None, Some(i32::MAX as u32)),
            item("2", None, Some(i32::MAX as u32)),
            item("3", None, Some(i32::MAX as u32)),
            item("4", Some("alpha"), Some(10)),
        ];
        let summary = DaySummary::calculate(&items, &focused());

        assert_eq!(summary.unplanned_minutes, u32::MAX);
        assert_eq!(summary.planned_minutes, 10);
        assert_eq!(summary.total_minutes, u32::MAX);
    }

    #[test]
    fn breakdown_keeps_first_seen_order_and_names_orphans() {
        let items = vec![
            item("1", Some("beta"), Some(10)),
            item("2", Some("ghost"), Some(5)),
            item("3", Some("alpha"), Some(20)),
            item("4", Some("beta"), Some(10)),
        ];
        let summary = DaySummary::calculate(&items, &focused());
        let names: Vec<&str> = summary
            .project_breakdown
            .iter()
            .map(|b| b.project_name.as_str())
            .collect();

        assert_eq!(names, vec!["Beta", UNKNOWN_PROJECT, "Alpha"]);
        assert_eq!(summary.project_breakdown[0].count, 2);
        assert_eq!(summary.project_breakdown[0].minutes, 20);
    }

    #[test]
    fn share_text_lists_projects_unplanned_total_and_reflection() {
        let mut meeting = item("2", None, Some(45));
        meeting.description = "Standup".to_string();
        meeting.unplanned_reason = Some("Meeting".to_string());
        let mut fix = item("1", Some("alpha"), Some(90));
        fix.description = "Fix @ENG-1".to_string();

        let items = vec![fix, meeting];
        let summary = DaySummary::calculate(&items, &focused());
        let text = summary.share_text(&items, Some("  Good day.  "));

        assert_eq!(
            text,
            "Today's Work:\n\
             \n\
             Projects:\n\
             • [Alpha] Fix @ENG-1 (1h 30m)\n\
             \n\
             Unplanned:\n\
             • Standup (Meeting) - 45m\n\
             \n\
             Total time: 2h 15m\n\
             \n\
             Reflection:\n\
             Good day."
        );
    }

    #[test]
    fn share_text_for_empty_day_is_just_the_header() {
        let summary = DaySummary::calculate(&[], &focused());
        assert_eq!(summary.share_text(&[], Some("   ")), "Today's Work:\n");
    }
}
