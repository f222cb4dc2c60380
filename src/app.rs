use crate::config::Config;
use crate::controller::Controller;
use crate::domain::{flatten_tasks, FormField, Screen, SubTaskId, Task, TaskId, UiMode};
use crate::gate::PauseGate;
use crate::scheduler::{Clock, SystemClock};
use crate::store::TaskStore;
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info};

/// Input form state for adding and editing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFormState {
    /// Main text field (task title, sub-task title, or the value being edited)
    pub title: String,
    pub description: String,
    pub category_index: usize,
    pub tag: String,
    pub field: FormField,
}

impl InputFormState {
    fn with_text(text: &str) -> Self {
        Self {
            title: text.to_string(),
            description: String::new(),
            category_index: 0,
            tag: String::new(),
            field: FormField::Title,
        }
    }
}

/// Main application state
pub struct AppState {
    pub controller: Controller,
    pub gate: PauseGate,
    pub screen: Screen,
    pub ui_mode: UiMode,
    pub selected_index: usize,
    pub input_form: Option<InputFormState>,
    /// Task shown in the detail modal
    pub detail_task: Option<TaskId>,
    /// Sub-task cursor inside the detail modal
    pub detail_selected: usize,
    pub categories: Vec<String>,
    /// Ids under the cursor, so it can follow its row when rows above change
    selected_item: Option<(TaskId, Option<SubTaskId>)>,
    /// Bumped by the controller on every change
    revision: Rc<Cell<u64>>,
    seen_revision: u64,
}

impl AppState {
    pub fn new(config: &Config, skip_pause: bool) -> Self {
        Self::with_clocks(config, skip_pause, Box::new(SystemClock), Box::new(SystemClock))
    }

    pub fn with_clocks(
        config: &Config,
        skip_pause: bool,
        controller_clock: Box<dyn Clock>,
        gate_clock: Box<dyn Clock>,
    ) -> Self {
        let mut controller = Controller::new(
            TaskStore::new(config.default_tag.clone()),
            config.timing(),
            controller_clock,
        );

        if config.sample_tasks {
            controller.add_task_tagged("Work", "Trabajar", config.default_category(), Some("Home"));
            controller.add_task("Surf", "", config.default_category());
        }

        let revision = Rc::new(Cell::new(0));
        let counter = Rc::clone(&revision);
        controller.subscribe(move |change| {
            counter.set(counter.get() + 1);
            debug!(?change, "controller changed");
        });

        let mut categories = config.categories.clone();
        if categories.is_empty() {
            categories.push(config.default_category().to_string());
        }

        let mut app = Self {
            controller,
            gate: PauseGate::new(config.pause_seconds, config.reveal_delay(), gate_clock),
            screen: if skip_pause { Screen::Today } else { Screen::Pause },
            ui_mode: UiMode::Normal,
            selected_index: 0,
            input_form: None,
            detail_task: None,
            detail_selected: 0,
            categories,
            selected_item: None,
            revision,
            seen_revision: 0,
        };
        app.selected_item = app.get_selected_item();
        app
    }

    // ---- screens ----

    /// Leave the pause gate once its button is showing
    pub fn continue_from_gate(&mut self) {
        if self.screen == Screen::Pause && self.gate.can_continue() {
            info!("pause gate passed");
            self.screen = Screen::Today;
        }
    }

    pub fn open_metrics(&mut self) {
        self.screen = Screen::Metrics;
    }

    /// Back from metrics goes all the way to the gate
    pub fn back_to_gate(&mut self) {
        self.screen = Screen::Pause;
        self.gate.restart();
    }

    // ---- selection ----

    /// Selected (task, sub-task) ids
    pub fn get_selected_item(&self) -> Option<(TaskId, Option<SubTaskId>)> {
        let tasks = self.controller.tasks();
        let row = flatten_tasks(tasks).into_iter().nth(self.selected_index)?;
        let task = &tasks[row.task_index];
        let subtask = row.subtask_index.map(|i| task.subtasks[i].id);
        Some((task.id, subtask))
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
        self.selected_item = self.get_selected_item();
    }

    pub fn move_selection_down(&mut self) {
        let row_count = flatten_tasks(self.controller.tasks()).len();
        if self.selected_index + 1 < row_count {
            self.selected_index += 1;
        }
        self.selected_item = self.get_selected_item();
    }

    /// Put the cursor back on the row it was on. Falls back to clamping
    /// the old index when that row is gone.
    fn resolve_selection(&mut self) {
        let tasks = self.controller.tasks();
        let rows = flatten_tasks(tasks);
        let found = self.selected_item.and_then(|(task_id, subtask_id)| {
            rows.iter().position(|row| {
                let task = &tasks[row.task_index];
                task.id == task_id && row.subtask_index.map(|i| task.subtasks[i].id) == subtask_id
            })
        });

        match found {
            Some(idx) => self.selected_index = idx,
            None if self.selected_index >= rows.len() => {
                self.selected_index = rows.len().saturating_sub(1);
            }
            None => {}
        }
        self.selected_item = self.get_selected_item();
    }

    // ---- task actions ----

    /// Toggle the selected row: completes a task, checks/unchecks a sub-task
    pub fn toggle_selected(&mut self) {
        match self.get_selected_item() {
            Some((task_id, Some(subtask_id))) => self.controller.toggle_subtask(task_id, subtask_id),
            Some((task_id, None)) => self.controller.toggle_task(task_id),
            None => {}
        }
    }

    pub fn undo(&mut self) {
        self.controller.undo();
    }

    // ---- detail modal ----

    pub fn open_detail(&mut self) {
        if let Some((task_id, _)) = self.get_selected_item() {
            self.detail_task = Some(task_id);
            self.detail_selected = 0;
            self.ui_mode = UiMode::Detail;
        }
    }

    pub fn close_detail(&mut self) {
        self.detail_task = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn detail(&self) -> Option<&Task> {
        self.controller.get(self.detail_task?)
    }

    pub fn detail_move_up(&mut self) {
        self.detail_selected = self.detail_selected.saturating_sub(1);
    }

    pub fn detail_move_down(&mut self) {
        let count = self.detail().map_or(0, |t| t.subtasks.len());
        if self.detail_selected + 1 < count {
            self.detail_selected += 1;
        }
    }

    pub fn detail_toggle_subtask(&mut self) {
        let Some(task) = self.detail() else {
            return;
        };
        let Some(subtask) = task.subtasks.get(self.detail_selected) else {
            return;
        };
        let (task_id, subtask_id) = (task.id, subtask.id);
        self.controller.toggle_subtask(task_id, subtask_id);
    }

    // ---- input form ----

    /// Start adding a new task (opens input form)
    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState::with_text(""));
        self.ui_mode = UiMode::AddingTask;
    }

    /// Start adding a sub-task to the detail task, or the selected task
    pub fn start_add_subtask(&mut self) {
        let target = self.detail_task.or_else(|| self.get_selected_item().map(|(id, _)| id));
        if let Some(task_id) = target {
            self.detail_task = Some(task_id);
            self.input_form = Some(InputFormState::with_text(""));
            self.ui_mode = UiMode::AddingSubtask;
        }
    }

    pub fn start_edit_title(&mut self) {
        if let Some(title) = self.detail().map(|t| t.title.clone()) {
            self.input_form = Some(InputFormState::with_text(&title));
            self.ui_mode = UiMode::EditingTitle;
        }
    }

    pub fn start_edit_description(&mut self) {
        if let Some(description) = self.detail().map(|t| t.description.clone()) {
            self.input_form = Some(InputFormState::with_text(&description));
            self.ui_mode = UiMode::EditingDescription;
        }
    }

    /// Move to the next field; only the add-task form has more than one
    pub fn input_form_next_field(&mut self) {
        if self.ui_mode != UiMode::AddingTask {
            return;
        }
        if let Some(form) = &mut self.input_form {
            form.field = form.field.next();
        }
    }

    /// Cycle the category chip (left = -1, right = +1)
    pub fn input_form_cycle_category(&mut self, forward: bool) {
        let count = self.categories.len();
        if let Some(form) = &mut self.input_form {
            if form.field != FormField::Category || count == 0 {
                return;
            }
            form.category_index = if forward {
                (form.category_index + 1) % count
            } else {
                (form.category_index + count - 1) % count
            };
        }
    }

    /// Add character to input form (current field)
    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            match form.field {
                FormField::Title => form.title.push(c),
                FormField::Description => form.description.push(c),
                FormField::Tag => form.tag.push(c),
                FormField::Category => {}
            }
        }
    }

    /// Backspace in input form (current field)
    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            match form.field {
                FormField::Title => {
                    form.title.pop();
                }
                FormField::Description => {
                    form.description.pop();
                }
                FormField::Tag => {
                    form.tag.pop();
                }
                FormField::Category => {}
            }
        }
    }

    /// Submit the form. Adding with a blank title keeps the form open.
    pub fn submit_input_form(&mut self) {
        let Some(form) = self.input_form.clone() else {
            return;
        };

        match self.ui_mode {
            UiMode::AddingTask => {
                let category = self
                    .categories
                    .get(form.category_index)
                    .cloned()
                    .unwrap_or_default();
                let added = self.controller.add_task_tagged(
                    &form.title,
                    &form.description,
                    &category,
                    Some(form.tag.as_str()),
                );
                if added.is_some() {
                    self.close_form(UiMode::Normal);
                }
            }
            UiMode::AddingSubtask => {
                let Some(task_id) = self.detail_task else {
                    self.close_form(UiMode::Normal);
                    return;
                };
                if self.controller.get(task_id).is_none() {
                    self.close_form(UiMode::Normal);
                    return;
                }
                if self.controller.add_subtask(task_id, &form.title).is_some() {
                    self.close_form(UiMode::Detail);
                }
            }
            UiMode::EditingTitle => {
                if let Some(task_id) = self.detail_task {
                    self.controller.edit_title(task_id, &form.title);
                }
                self.close_form(UiMode::Detail);
            }
            UiMode::EditingDescription => {
                if let Some(task_id) = self.detail_task {
                    self.controller.edit_description(task_id, &form.title);
                }
                self.close_form(UiMode::Detail);
            }
            UiMode::Normal | UiMode::Detail => self.input_form = None,
        }
    }

    /// Cancel input form, discarding what was typed
    pub fn cancel_input_form(&mut self) {
        let back_to = match self.ui_mode {
            UiMode::AddingTask => UiMode::Normal,
            _ if self.detail_task.is_some() => UiMode::Detail,
            _ => UiMode::Normal,
        };
        self.close_form(back_to);
    }

    fn close_form(&mut self, mode: UiMode) {
        self.input_form = None;
        self.ui_mode = mode;
        if mode == UiMode::Normal {
            self.detail_task = None;
        }
    }

    // ---- timers ----

    /// Advance timers and react to controller changes.
    /// Returns true when something visible changed.
    pub fn tick(&mut self) -> bool {
        let gate_changed = self.screen == Screen::Pause && self.gate.advance();
        self.controller.advance();

        let changed = self.revision.get() != self.seen_revision;
        if changed {
            self.seen_revision = self.revision.get();
            self.resolve_selection();
            if self.detail_task.is_some() && self.detail().is_none() {
                debug!("detail task left the list, closing detail");
                self.input_form = None;
                self.close_detail();
            }
        }

        // The snackbar countdown changes every tick while an undo is pending
        gate_changed || changed || self.controller.pending_undo().is_some()
    }
}
