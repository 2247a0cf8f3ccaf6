//! `@mention` detection, completion and rendering for work-log descriptions.

use std::collections::BTreeMap;

use crate::types::{Issue, Project};

/// An `@` the user is currently typing after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionTrigger {
    /// Byte offset of the `@`.
    pub start: usize,
    /// Text typed after the `@`, as typed.
    pub typed: String,
}

impl MentionTrigger {
    pub fn query(&self) -> String {
        self.typed.to_lowercase()
    }
}

/// Finds the mention being typed at `cursor`.
///
/// The last `@` before the cursor counts when it opens the text or follows a
/// space, and nothing between it and the cursor is a space.
pub fn find_trigger(text: &str, cursor: usize) -> Option<MentionTrigger> {
    let before = text.get(..cursor)?;
    let start = before.rfind('@')?;

    if start > 0 && !before[..start].ends_with(' ') {
        return None;
    }

    let typed = &before[start + 1..];
    if typed.contains(' ') {
        return None;
    }

    Some(MentionTrigger {
        start,
        typed: typed.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum MentionKind {
    Issue { project_name: Option<String> },
    Project { project_id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MentionOption {
    pub label: String,
    pub url: String,
    /// Secondary text shown next to the label in the dropdown.
    pub detail: String,
    pub in_progress: bool,
    pub kind: MentionKind,
}

/// Issues matching `identifier title`, then focused projects matching by name.
pub fn mention_options(query: &str, issues: &[Issue], projects: &[Project]) -> Vec<MentionOption> {
    let query = query.trim().to_lowercase();

    let issue_options = issues
        .iter()
        .filter(|issue| {
            format!("{} {}", issue.identifier, issue.title)
                .to_lowercase()
                .contains(&query)
        })
        .map(|issue| MentionOption {
            label: issue.identifier.clone(),
            url: issue.url.clone(),
            detail: issue.title.clone(),
            in_progress: issue.is_in_progress(),
            kind: MentionKind::Issue {
                project_name: issue.project_name().map(str::to_string),
            },
        });

    let project_options = projects
        .iter()
        .filter(|project| project.name.to_lowercase().contains(&query))
        .map(|project| MentionOption {
            label: project.name.clone(),
            url: project.url.clone().unwrap_or_default(),
            detail: "project".to_string(),
            in_progress: false,
            kind: MentionKind::Project {
                project_id: project.id.clone(),
            },
        });

    issue_options.chain(project_options).collect()
}

/// Text with the typed mention replaced by `@label `, and the cursor after it.
pub fn apply_mention(text: &str, trigger: &MentionTrigger, label: &str) -> (String, usize) {
    let label = label.trim();
    let replaced_end = (trigger.start + 1 + trigger.typed.len()).min(text.len());

    let head = format!("{}@{} ", &text[..trigger.start], label);
    let cursor = head.len();
    (format!("{}{}", head, &text[replaced_end..]), cursor)
}

/// The project a picked mention points at, given what was chosen so far.
pub fn infer_project(
    option: &MentionOption,
    focused: &[Project],
    current: Option<&str>,
) -> Option<String> {
    match &option.kind {
        MentionKind::Project { project_id } => Some(project_id.clone()),
        MentionKind::Issue {
            project_name: Some(name),
        } => focused
            .iter()
            .find(|p| p.name.to_lowercase() == name.to_lowercase())
            .map(|p| p.id.clone())
            .or_else(|| current.map(str::to_string)),
        MentionKind::Issue { project_name: None } => match (current, focused) {
            (Some(id), _) => Some(id.to_string()),
            (None, [only]) => Some(only.id.clone()),
            (None, _) => None,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Link { label: String, url: String },
}

/// Splits `text` into plain runs and links for every `@label` it recorded.
///
/// A label only links when the whole token matches it, so `@LIN-10` is not a
/// link to `LIN-1`.
pub fn render_segments(text: &str, mentions: Option<&BTreeMap<String, String>>) -> Vec<Segment> {
    let Some(mentions) = mentions.filter(|m| !m.is_empty()) else {
        return vec![Segment::Text(text.to_string())];
    };

    let mut keys: Vec<(&String, &String)> = mentions.iter().collect();
    keys.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut search_from = 0;

    while let Some(offset) = text[search_from..].find('@') {
        let at = search_from + offset;
        let rest = &text[at + 1..];

        let matched = keys.iter().find(|(label, _)| {
            rest.strip_prefix(label.as_str())
                .is_some_and(|after| after.chars().next().map_or(true, ends_token))
        });

        match matched {
            Some((label, url)) => {
                if at > plain_start {
                    segments.push(Segment::Text(text[plain_start..at].to_string()));
                }
                segments.push(Segment::Link {
                    label: label.to_string(),
                    url: url.to_string(),
                });
                plain_start = at + 1 + label.len();
                search_from = plain_start;
            }
            None => search_from = at + 1,
        }
    }

    if plain_start < text.len() {
        segments.push(Segment::Text(text[plain_start..].to_string()));
    }
    segments
}

fn ends_token(c: char) -> bool {
    !(c.is_alphanumeric() || c == '-' || c == '_')
}
