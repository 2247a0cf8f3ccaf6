use time::Date;

use super::{FocusedProject, ProjectId, TaskSource, TrackerProject};

/// A focused project merged with whatever live metadata the tracker has for it.
#[derive(Debug, Clone, PartialEq)]
pub struct UnifiedProject {
    pub id: ProjectId,
    pub source: TaskSource,
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub state: Option<String>,
    pub progress: Option<f64>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub target_date: Option<Date>,
}

impl UnifiedProject {
    pub fn from_focused(focused: &FocusedProject, live: Option<&TrackerProject>) -> Self {
        match live {
            Some(live) => Self {
                id: focused.project_id.clone(),
                source: focused.source,
                name: live.name.clone(),
                description: live.description.clone(),
                url: Some(live.url.clone()),
                state: Some(live.state.clone()),
                progress: Some(live.progress),
                icon: live.icon.clone(),
                color: live.color.clone(),
                target_date: live.target_date,
            },
            None => Self {
                id: focused.project_id.clone(),
                source: focused.source,
                name: focused
                    .name
                    .clone()
                    .unwrap_or_else(|| focused.project_id.to_string()),
                description: None,
                url: None,
                state: None,
                progress: None,
                icon: None,
                color: None,
                target_date: None,
            },
        }
    }

    /// Pairs each focused project with the live project of the same id, when
    /// there is one. Order follows `focused`.
    pub fn merge(focused: &[FocusedProject], live: &[TrackerProject]) -> Vec<Self> {
        focused
            .iter()
            .map(|fp| {
                let live = live.iter().find(|p| p.id == fp.project_id.as_str());
                Self::from_focused(fp, live)
            })
            .collect()
    }
}
