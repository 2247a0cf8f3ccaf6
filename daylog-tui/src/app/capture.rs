//! The unit-of-work capture form.
//!
//! Description (with `@mention` completion), then a project when none can be
//! inferred, then confirmation. Committing yields a `WorkLogItem`.

use std::collections::BTreeMap;

use time::OffsetDateTime;

use super::duration::parse_duration;
use super::mention::{
    apply_mention, find_trigger, infer_project, mention_options, MentionOption, MentionTrigger,
};
use super::text_input::TextInput;
use crate::types::{Issue, Project, WorkLogItem};

pub const UNPLANNED_REASONS: [&str; 4] = ["Urgent bug", "Support request", "Meeting", "Other"];
const OTHER_REASON: usize = 3;

pub const ACCEPT_OPTIONS: [&str; 2] = ["Yes, start now", "Just log it"];

/// What the form can draw from while capturing.
#[derive(Clone, Copy)]
pub struct CaptureContext<'a> {
    pub issues: &'a [Issue],
    pub projects: &'a [Project],
}

#[derive(Debug, Clone, PartialEq)]
pub struct MentionDropdown {
    pub trigger: MentionTrigger,
    pub selected: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReasonPicker {
    pub selected: usize,
    /// Free text used when `Other` is selected.
    pub other: TextInput,
}

impl ReasonPicker {
    fn is_other(&self) -> bool {
        self.selected == OTHER_REASON
    }

    fn reason(&self) -> String {
        let other = self.other.value.trim();
        if self.is_other() && !other.is_empty() {
            other.to_string()
        } else {
            UNPLANNED_REASONS[self.selected].to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaptureStep {
    ProvideDescription,
    /// `selected` ranges over the focused projects plus the unplanned entry last.
    ProvideProject {
        selected: usize,
        reason: Option<ReasonPicker>,
    },
    Accept {
        selected: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    Continue,
    Cancelled,
    Committed(WorkLogItem),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Capture {
    pub step: CaptureStep,
    pub description: TextInput,
    pub dropdown: Option<MentionDropdown>,
    pub mentions: BTreeMap<String, String>,
    pub project_id: Option<String>,
    pub unplanned_reason: Option<String>,
    pub duration: TextInput,
    pub error: Option<String>,
}

impl Default for Capture {
    fn default() -> Self {
        Self::new()
    }
}

impl Capture {
    pub fn new() -> Self {
        Self {
            step: CaptureStep::ProvideDescription,
            description: TextInput::new(),
            dropdown: None,
            mentions: BTreeMap::new(),
            project_id: None,
            unplanned_reason: None,
            duration: TextInput::new(),
            error: None,
        }
    }

    pub fn options(&self, ctx: CaptureContext<'_>) -> Vec<MentionOption> {
        match &self.dropdown {
            Some(dropdown) => mention_options(&dropdown.trigger.query(), ctx.issues, ctx.projects),
            None => Vec::new(),
        }
    }

    fn refresh_dropdown(&mut self) {
        self.dropdown = find_trigger(&self.description.value, self.description.cursor)
            .map(|trigger| MentionDropdown {
                trigger,
                selected: 0,
            });
    }

    // ------------------------------------------------------------------------
    // Text entry
    // ------------------------------------------------------------------------

    pub fn input_char(&mut self, c: char) {
        self.error = None;
        match &mut self.step {
            CaptureStep::ProvideDescription => {
                self.description.insert(c);
                self.refresh_dropdown();
            }
            CaptureStep::ProvideProject {
                reason: Some(picker),
                ..
            } if picker.is_other() => picker.other.insert(c),
            CaptureStep::Accept { .. } => self.duration.insert(c),
            CaptureStep::ProvideProject { .. } => {}
        }
    }

    pub fn backspace(&mut self) {
        match &mut self.step {
            CaptureStep::ProvideDescription => {
                self.description.backspace();
                self.refresh_dropdown();
            }
            CaptureStep::ProvideProject {
                reason: Some(picker),
                ..
            } if picker.is_other() => picker.other.backspace(),
            CaptureStep::Accept { .. } => self.duration.backspace(),
            CaptureStep::ProvideProject { .. } => {}
        }
    }

    pub fn move_cursor_left(&mut self) {
        match &mut self.step {
            CaptureStep::ProvideDescription => {
                self.description.move_left();
                self.refresh_dropdown();
            }
            CaptureStep::Accept { selected } => *selected = selected.saturating_sub(1),
            CaptureStep::ProvideProject { .. } => {}
        }
    }

    pub fn move_cursor_right(&mut self) {
        match &mut self.step {
            CaptureStep::ProvideDescription => {
                self.description.move_right();
                self.refresh_dropdown();
            }
            CaptureStep::Accept { selected } => {
                *selected = (*selected + 1).min(ACCEPT_OPTIONS.len() - 1)
            }
            CaptureStep::ProvideProject { .. } => {}
        }
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn move_up(&mut self) {
        match &mut self.step {
            CaptureStep::ProvideDescription => {
                if let Some(dropdown) = &mut self.dropdown {
                    dropdown.selected = dropdown.selected.saturating_sub(1);
                }
            }
            CaptureStep::ProvideProject {
                reason: Some(picker),
                ..
            } => picker.selected = picker.selected.saturating_sub(1),
            CaptureStep::ProvideProject { selected, .. } => {
                *selected = selected.saturating_sub(1)
            }
            CaptureStep::Accept { .. } => {}
        }
    }

    pub fn move_down(&mut self, ctx: CaptureContext<'_>) {
        let option_count = self.options(ctx).len();
        match &mut self.step {
            CaptureStep::ProvideDescription => {
                if let Some(dropdown) = &mut self.dropdown {
                    if dropdown.selected + 1 < option_count {
                        dropdown.selected += 1;
                    }
                }
            }
            CaptureStep::ProvideProject {
                reason: Some(picker),
                ..
            } => picker.selected = (picker.selected + 1).min(UNPLANNED_REASONS.len() - 1),
            CaptureStep::ProvideProject { selected, .. } => {
                // The unplanned entry sits right after the projects.
                *selected = (*selected + 1).min(ctx.projects.len())
            }
            CaptureStep::Accept { .. } => {}
        }
    }

    // ------------------------------------------------------------------------
    // Enter / Esc
    // ------------------------------------------------------------------------

    pub fn confirm(&mut self, ctx: CaptureContext<'_>, now: OffsetDateTime) -> CaptureOutcome {
        match self.step.clone() {
            CaptureStep::ProvideDescription => {
                if self.dropdown.is_some() {
                    self.pick_mention(ctx);
                } else {
                    self.description_provided(ctx);
                }
                CaptureOutcome::Continue
            }
            CaptureStep::ProvideProject { selected, reason } => {
                match reason {
                    Some(picker) => {
                        self.project_id = None;
                        self.unplanned_reason = Some(picker.reason());
                        self.step = CaptureStep::Accept { selected: 0 };
                    }
                    None if selected < ctx.projects.len() => {
                        self.project_id = Some(ctx.projects[selected].id.clone());
                        self.unplanned_reason = None;
                        self.step = CaptureStep::Accept { selected: 0 };
                    }
                    None => {
                        self.step = CaptureStep::ProvideProject {
                            selected,
                            reason: Some(ReasonPicker {
                                selected: 0,
                                other: TextInput::new(),
                            }),
                        };
                    }
                }
                CaptureOutcome::Continue
            }
            CaptureStep::Accept { .. } => self.commit(ctx, now),
        }
    }

    /// Esc: closes the dropdown or the reason list first, otherwise cancels.
    pub fn cancel(&mut self) -> CaptureOutcome {
        match &mut self.step {
            CaptureStep::ProvideDescription if self.dropdown.is_some() => {
                self.dropdown = None;
                CaptureOutcome::Continue
            }
            CaptureStep::ProvideProject { reason, .. } if reason.is_some() => {
                *reason = None;
                CaptureOutcome::Continue
            }
            _ => {
                *self = Self::new();
                CaptureOutcome::Cancelled
            }
        }
    }

    fn pick_mention(&mut self, ctx: CaptureContext<'_>) {
        let Some(dropdown) = self.dropdown.take() else {
            return;
        };
        let options = mention_options(&dropdown.trigger.query(), ctx.issues, ctx.projects);
        let Some(option) = options.get(dropdown.selected) else {
            // Nothing to pick; keep the dropdown showing its empty state.
            self.dropdown = Some(dropdown);
            return;
        };

        let (text, cursor) = apply_mention(&self.description.value, &dropdown.trigger, &option.label);
        self.description.set(text, cursor);
        self.mentions
            .insert(option.label.trim().to_string(), option.url.clone());
        self.project_id = infer_project(option, ctx.projects, self.project_id.as_deref());
    }

    fn description_provided(&mut self, ctx: CaptureContext<'_>) {
        if self.description.value.trim().is_empty() {
            return;
        }

        let inferred = self.project_id.clone().or_else(|| match ctx.projects {
            [only] => Some(only.id.clone()),
            _ => None,
        });

        match inferred {
            Some(project_id) => {
                self.project_id = Some(project_id);
                self.step = CaptureStep::Accept { selected: 0 };
            }
            None => {
                self.step = CaptureStep::ProvideProject {
                    selected: 0,
                    reason: None,
                };
            }
        }
    }

    fn commit(&mut self, ctx: CaptureContext<'_>, now: OffsetDateTime) -> CaptureOutcome {
        let duration_minutes = match parse_duration(&self.duration.value) {
            Ok(minutes) => minutes,
            Err(e) => {
                self.error = Some(e.to_string());
                return CaptureOutcome::Continue;
            }
        };

        let project_source = self.project_id.as_ref().map(|id| {
            ctx.projects
                .iter()
                .find(|p| &p.id == id)
                .map(|p| p.source.clone())
                .unwrap_or_else(|| "linear".to_string())
        });

        let item = WorkLogItem {
            id: uuid::Uuid::new_v4().to_string(),
            description: self.description.value.trim().to_string(),
            timestamp: now,
            project_id: self.project_id.clone(),
            project_source,
            unplanned_reason: self.unplanned_reason.clone(),
            mentioned_issues: (!self.mentions.is_empty()).then(|| self.mentions.clone()),
            duration_minutes,
        };

        *self = Self::new();
        CaptureOutcome::Committed(item)
    }
}
