use chrono::{DateTime, Local};
use ratatui::widgets::TableState;
use tracing::debug;

use crate::format;
use crate::models::{Priority, Task, TaskId, TaskList};
use crate::store::TaskStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
    Adding,
    Searching,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    None,
    Title,
    Notes,
}

pub enum DisplayItem {
    Task(Task),
    DateHeader(String, usize), // Label, count
}

pub struct App {
    pub store: TaskStore,
    pub display_items: Vec<DisplayItem>,
    pub state: TableState,
    pub input_mode: InputMode,
    pub input_field: InputField,
    pub input_buffer: String,
    pub target_id: Option<TaskId>,
    pub add_state: AddState,
    /// One-line feedback shown in the help bar, e.g. a rejected title.
    pub message: Option<String>,
    seen_revision: Option<u64>,
}

/// State for the multi-step "New Reminder" wizard.
#[derive(Default)]
pub struct AddState {
    pub title: String,
    pub notes: String,
    pub due: Option<DateTime<Local>>,
    pub step: usize, // 0: Title, 1: Notes, 2: Due, 3: Priority
}

impl App {
    pub fn new(store: TaskStore) -> App {
        let mut app = App {
            store,
            display_items: Vec::new(),
            state: TableState::default(),
            input_mode: InputMode::Normal,
            input_field: InputField::None,
            input_buffer: String::new(),
            target_id: None,
            add_state: AddState::default(),
            message: None,
            seen_revision: None,
        };
        app.reload(Local::now());
        app
    }

    /// Rebuilds the display list if the store changed since the last build.
    pub fn sync(&mut self, now: DateTime<Local>) {
        if self.seen_revision != Some(self.store.revision()) {
            self.reload(now);
        }
    }

    /// Rebuilds the display list from the store's current projection.
    ///
    /// The scheduled view gets a header row per due day.
    pub fn reload(&mut self, now: DateTime<Local>) {
        self.display_items.clear();
        if self.store.selected_view() == TaskList::Scheduled {
            for (day, tasks) in self.store.date_sections(now) {
                self.display_items
                    .push(DisplayItem::DateHeader(format::day_label(day, now), tasks.len()));
                for t in tasks {
                    self.display_items.push(DisplayItem::Task(t.clone()));
                }
            }
        } else {
            for t in self.store.filtered_tasks(now) {
                self.display_items.push(DisplayItem::Task(t.clone()));
            }
        }

        if self.display_items.is_empty() {
            self.state.select(None);
        } else if let Some(i) = self.state.selected() {
            if i >= self.display_items.len() {
                self.state.select(Some(self.display_items.len() - 1));
            }
        } else {
            let first_task = self
                .display_items
                .iter()
                .position(|item| matches!(item, DisplayItem::Task(_)));
            self.state.select(Some(first_task.unwrap_or(0)));
        }
        self.seen_revision = Some(self.store.revision());
    }

    pub fn selected_task(&self) -> Option<&Task> {
        match self.state.selected().and_then(|i| self.display_items.get(i)) {
            Some(DisplayItem::Task(t)) => Some(t),
            _ => None,
        }
    }

    /// Selects the next row, wrapping around.
    pub fn next(&mut self) {
        if self.display_items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < self.display_items.len() => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    /// Selects the previous row, wrapping around.
    pub fn previous(&mut self) {
        if self.display_items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => self.display_items.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn select_view(&mut self, view: TaskList) {
        self.store.set_selected_view(view);
        self.state.select(None);
    }

    /// Moves the sidebar selection by `step` views, wrapping around.
    pub fn shift_view(&mut self, step: isize) {
        let len = TaskList::ALL.len() as isize;
        let current = TaskList::ALL
            .iter()
            .position(|l| *l == self.store.selected_view())
            .unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(len) as usize;
        self.select_view(TaskList::ALL[next]);
    }

    /// Marks the selected task done, or reopens it.
    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task().map(|t| t.id()) {
            self.store.toggle_completion(id);
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_task().map(|t| t.id()) {
            self.store.delete(id);
        }
    }

    pub fn cycle_priority(&mut self) {
        if let Some(mut task) = self.selected_task().cloned() {
            task.priority = task.priority.cycle();
            self.store.update(task);
        }
    }

    pub fn clear_completed(&mut self) {
        self.store.clear_completed();
    }

    /// Starts the "New Reminder" wizard.
    pub fn start_add(&mut self) {
        self.input_mode = InputMode::Adding;
        self.add_state = AddState::default();
        self.input_buffer.clear();
        self.message = None;
    }

    /// Starts editing `field` of the selected task, pre-filled with its value.
    pub fn start_edit(&mut self, field: InputField) {
        let Some((id, prefill)) = self.selected_task().map(|t| {
            let prefill = match field {
                InputField::Title => t.title.clone(),
                InputField::Notes => t.notes.clone(),
                InputField::None => String::new(),
            };
            (t.id(), prefill)
        }) else {
            return;
        };
        self.target_id = Some(id);
        self.input_mode = InputMode::Editing;
        self.input_field = field;
        self.input_buffer = prefill;
        self.message = None;
    }

    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Searching;
        self.input_buffer = self.store.search_query().to_string();
    }

    pub fn push_char(&mut self, c: char) {
        self.input_buffer.push(c);
        if self.input_mode == InputMode::Searching {
            self.store.set_search_query(self.input_buffer.clone());
        }
    }

    pub fn pop_char(&mut self) {
        self.input_buffer.pop();
        if self.input_mode == InputMode::Searching {
            self.store.set_search_query(self.input_buffer.clone());
        }
    }

    /// Leaves any input mode; cancelling a search also clears the query.
    pub fn cancel_input(&mut self) {
        if self.input_mode == InputMode::Searching {
            self.store.set_search_query("");
        }
        self.input_mode = InputMode::Normal;
        self.input_field = InputField::None;
        self.input_buffer.clear();
    }

    /// Handles Enter based on the current mode.
    pub fn handle_input(&mut self) {
        match self.input_mode {
            InputMode::Adding => self.handle_adding_input(),
            InputMode::Editing => self.handle_editing_input(),
            InputMode::Searching => {
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
            }
            InputMode::Normal => {}
        }
    }

    fn handle_adding_input(&mut self) {
        match self.add_state.step {
            0 => {
                // Title
                let title = self.input_buffer.trim();
                if title.is_empty() {
                    self.message = Some("A reminder needs a title".to_string());
                    return;
                }
                self.add_state.title = title.to_string();
                self.advance_add();
            }
            1 => {
                // Notes
                self.add_state.notes = self.input_buffer.trim().to_string();
                self.advance_add();
            }
            2 => {
                // Due
                match format::parse_due(&self.input_buffer) {
                    Ok(due) => {
                        self.add_state.due = due;
                        self.advance_add();
                    }
                    Err(e) => self.message = Some(e.to_string()),
                }
            }
            3 => {
                // Priority
                let input = self.input_buffer.trim();
                let priority = if input.is_empty() {
                    Some(Priority::None)
                } else {
                    Priority::ALL
                        .into_iter()
                        .find(|p| p.label().eq_ignore_ascii_case(input))
                };
                let Some(priority) = priority else {
                    self.message = Some(format!("Unknown priority '{}'", input));
                    return;
                };
                let mut task = self.store.create_blank_task(self.store.selected_view());
                task.title = std::mem::take(&mut self.add_state.title);
                task.notes = std::mem::take(&mut self.add_state.notes);
                task.due = self.add_state.due;
                task.priority = priority;
                debug!(id = %task.id(), "adding reminder from TUI");
                self.store.add(task);
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
            }
            _ => {}
        }
    }

    fn advance_add(&mut self) {
        self.add_state.step += 1;
        self.input_buffer.clear();
        self.message = None;
    }

    fn handle_editing_input(&mut self) {
        let value = self.input_buffer.trim().to_string();
        if self.input_field == InputField::Title && value.is_empty() {
            self.message = Some("A reminder needs a title".to_string());
            return;
        }
        if let Some(mut task) = self.target_id.and_then(|id| self.store.get(id)).cloned() {
            match self.input_field {
                InputField::Title => task.title = value,
                InputField::Notes => task.notes = value,
                InputField::None => {}
            }
            self.store.update(task);
        }
        self.input_mode = InputMode::Normal;
        self.input_field = InputField::None;
        self.input_buffer.clear();
    }
}
