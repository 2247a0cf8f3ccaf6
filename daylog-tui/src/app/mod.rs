use crate::types::{DaySummary, Issue, LinearProject, Project, WorkLogItem};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::time::Instant;
use time::{Date, OffsetDateTime, UtcOffset};

pub mod capture;
mod debounce;
pub mod duration;
mod issues;
pub mod mention;
mod text_input;

pub use capture::{Capture, CaptureContext, CaptureOutcome};
pub use debounce::{Debouncer, REFLECTION_DEBOUNCE};
pub use issues::shape_issues;
pub use text_input::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    SelectProjects,
    WorkLog,
    Summary,
}

pub struct App {
    pub running: bool,
    pub status_message: Option<String>,
    pub current_view: View,
    pub today: Date,
    pub utc_offset: UtcOffset,

    // Server-side plan for today, once started or resumed
    pub day_plan_id: Option<String>,

    // Project selection
    pub available_projects: Vec<LinearProject>,
    pub project_search_input: TextInput,
    pub filtered_projects: Vec<usize>, // Indices into available_projects
    pub filtered_project_index: usize,
    pub chosen_project_ids: Vec<String>, // In the order they were picked

    // The day
    pub focused_projects: Vec<Project>,
    pub issues: Vec<Issue>,
    pub work_log: Vec<WorkLogItem>,
    pub work_log_index: usize,
    pub capture: Option<Capture>,

    // Reflection, saved 800ms after the last keystroke
    pub reflection_input: TextInput,
    pub editing_reflection: bool,
    pub reflection_debounce: Debouncer,

    pub summary: Option<DaySummary>,
    /// Printed to stdout once the terminal is restored.
    pub share_text_on_exit: Option<String>,
}

impl App {
    pub fn new(today: Date, utc_offset: UtcOffset) -> Self {
        Self {
            running: true,
            status_message: None,
            current_view: View::SelectProjects,
            today,
            utc_offset,
            day_plan_id: None,
            available_projects: Vec::new(),
            project_search_input: TextInput::new(),
            filtered_projects: Vec::new(),
            filtered_project_index: 0,
            chosen_project_ids: Vec::new(),
            focused_projects: Vec::new(),
            issues: Vec::new(),
            work_log: Vec::new(),
            work_log_index: 0,
            capture: None,
            reflection_input: TextInput::new(),
            editing_reflection: false,
            reflection_debounce: Debouncer::new(REFLECTION_DEBOUNCE),
            summary: None,
            share_text_on_exit: None,
        }
    }

    /// Wall clock in the user's offset.
    pub fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.utc_offset)
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn navigate_to(&mut self, view: View) {
        self.current_view = view;
        self.clear_status();

        if view == View::SelectProjects {
            self.chosen_project_ids = self.focused_projects.iter().map(|p| p.id.clone()).collect();
            self.project_search_input.clear();
            self.filter_projects();
        }
    }

    // ========================================================================
    // Project selection
    // ========================================================================

    pub fn set_available_projects(&mut self, projects: Vec<LinearProject>) {
        self.available_projects = projects;
        self.filter_projects();
    }

    /// Filter projects based on search input using fuzzy matching
    pub fn filter_projects(&mut self) {
        self.filtered_project_index = 0;

        if self.project_search_input.value.is_empty() {
            self.filtered_projects = (0..self.available_projects.len()).collect();
            return;
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(usize, i64)> = self
            .available_projects
            .iter()
            .enumerate()
            .filter_map(|(index, project)| {
                matcher
                    .fuzzy_match(&project.name, &self.project_search_input.value)
                    .map(|score| (index, score))
            })
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1));
        self.filtered_projects = scored.into_iter().map(|(index, _)| index).collect();
    }

    pub fn search_input_char(&mut self, c: char) {
        self.project_search_input.insert(c);
        self.filter_projects();
    }

    pub fn search_input_backspace(&mut self) {
        self.project_search_input.backspace();
        self.filter_projects();
    }

    pub fn select_next_project(&mut self) {
        if !self.filtered_projects.is_empty() {
            self.filtered_project_index =
                (self.filtered_project_index + 1) % self.filtered_projects.len();
        }
    }

    pub fn select_previous_project(&mut self) {
        if !self.filtered_projects.is_empty() {
            self.filtered_project_index = if self.filtered_project_index == 0 {
                self.filtered_projects.len() - 1
            } else {
                self.filtered_project_index - 1
            };
        }
    }

    pub fn highlighted_project(&self) -> Option<&LinearProject> {
        self.filtered_projects
            .get(self.filtered_project_index)
            .and_then(|&index| self.available_projects.get(index))
    }

    pub fn is_chosen(&self, project_id: &str) -> bool {
        self.chosen_project_ids.iter().any(|id| id == project_id)
    }

    pub fn toggle_highlighted_project(&mut self) {
        let Some(id) = self.highlighted_project().map(|p| p.id.clone()) else {
            return;
        };
        match self.chosen_project_ids.iter().position(|chosen| *chosen == id) {
            Some(position) => {
                self.chosen_project_ids.remove(position);
            }
            None => self.chosen_project_ids.push(id),
        }
    }

    pub fn chosen_projects(&self) -> Vec<LinearProject> {
        self.chosen_project_ids
            .iter()
            .filter_map(|id| self.available_projects.iter().find(|p| &p.id == id))
            .cloned()
            .collect()
    }

    // ========================================================================
    // The day
    // ========================================================================

    pub fn set_focused_projects(&mut self, projects: Vec<Project>) {
        self.focused_projects = projects;
    }

    pub fn set_issues(&mut self, issues: Vec<Issue>) {
        self.issues = shape_issues(issues, &self.focused_projects);
    }

    pub fn set_work_log(&mut self, mut items: Vec<WorkLogItem>) {
        items.sort_by_key(|item| item.timestamp);
        self.work_log = items;
        self.work_log_index = self.work_log.len().saturating_sub(1);
    }

    pub fn project_name(&self, project_id: &str) -> Option<&str> {
        self.focused_projects
            .iter()
            .find(|p| p.id == project_id)
            .map(|p| p.name.as_str())
    }

    pub fn select_next_item(&mut self) {
        if self.work_log_index + 1 < self.work_log.len() {
            self.work_log_index += 1;
        }
    }

    pub fn select_previous_item(&mut self) {
        self.work_log_index = self.work_log_index.saturating_sub(1);
    }

    /// Removes the highlighted entry locally; the caller deletes it remotely.
    pub fn remove_selected_item(&mut self) -> Option<WorkLogItem> {
        if self.work_log_index >= self.work_log.len() {
            return None;
        }
        let item = self.work_log.remove(self.work_log_index);
        self.work_log_index = self.work_log_index.min(self.work_log.len().saturating_sub(1));
        Some(item)
    }

    // ========================================================================
    // Capture
    // ========================================================================

    pub fn open_capture(&mut self) {
        self.capture = Some(Capture::new());
        self.clear_status();
    }

    pub fn capture_input_char(&mut self, c: char) {
        if let Some(capture) = &mut self.capture {
            capture.input_char(c);
        }
    }

    pub fn capture_backspace(&mut self) {
        if let Some(capture) = &mut self.capture {
            capture.backspace();
        }
    }

    pub fn capture_move_left(&mut self) {
        if let Some(capture) = &mut self.capture {
            capture.move_cursor_left();
        }
    }

    pub fn capture_move_right(&mut self) {
        if let Some(capture) = &mut self.capture {
            capture.move_cursor_right();
        }
    }

    pub fn capture_move_up(&mut self) {
        if let Some(capture) = &mut self.capture {
            capture.move_up();
        }
    }

    pub fn capture_move_down(&mut self) {
        let ctx = CaptureContext {
            issues: &self.issues,
            projects: &self.focused_projects,
        };
        if let Some(capture) = &mut self.capture {
            capture.move_down(ctx);
        }
    }

    pub fn capture_cancel(&mut self) {
        if let Some(capture) = &mut self.capture {
            if capture.cancel() == CaptureOutcome::Cancelled {
                self.capture = None;
            }
        }
    }

    /// Enter in the capture form. A committed entry is appended to the log
    /// and returned so it can be persisted.
    pub fn capture_confirm(&mut self, now: OffsetDateTime) -> Option<WorkLogItem> {
        let ctx = CaptureContext {
            issues: &self.issues,
            projects: &self.focused_projects,
        };
        let outcome = self.capture.as_mut()?.confirm(ctx, now);

        match outcome {
            CaptureOutcome::Committed(item) => {
                self.capture = None;
                self.work_log.push(item.clone());
                self.work_log_index = self.work_log.len() - 1;
                Some(item)
            }
            CaptureOutcome::Cancelled => {
                self.capture = None;
                None
            }
            CaptureOutcome::Continue => None,
        }
    }

    // ========================================================================
    // Reflection
    // ========================================================================

    pub fn reflection_input_char(&mut self, c: char, now: Instant) {
        self.reflection_input.insert(c);
        self.reflection_debounce.touch(now);
    }

    pub fn reflection_backspace(&mut self, now: Instant) {
        self.reflection_input.backspace();
        self.reflection_debounce.touch(now);
    }

    /// The reflection to save, once the debounce deadline has passed.
    pub fn due_reflection(&mut self, now: Instant) -> Option<String> {
        self.reflection_debounce
            .fire(now)
            .then(|| self.reflection_input.value.clone())
    }

    /// Reflection sent when the day is closed; blank becomes None.
    pub fn closing_reflection(&self) -> Option<String> {
        let reflection = self.reflection_input.value.trim();
        (!reflection.is_empty()).then(|| reflection.to_string())
    }
}
