use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Duration, Local, NaiveDate};
use tracing::{debug, trace};

use crate::config::Config;
use crate::models::{Priority, Task, TaskId, TaskList};
use crate::projection;

/// A change applied to the store, delivered to subscribers after it happens.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    Added(TaskId),
    Updated(TaskId),
    Deleted(Vec<TaskId>),
    CompletionToggled { id: TaskId, completed: bool },
    ClearedCompleted(Vec<TaskId>),
    SelectionChanged(TaskList),
    SearchChanged(String),
}

type Listener = Box<dyn FnMut(&StoreEvent)>;

/// In-memory owner of all tasks plus the current view selection and search query.
///
/// Insertion order is the canonical order. Mutations naming an unknown id are
/// silently ignored.
pub struct TaskStore {
    tasks: Vec<Task>,
    selected: TaskList,
    search: String,
    default_list: TaskList,
    revision: u64,
    listeners: Vec<Listener>,
}

impl fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskStore")
            .field("tasks", &self.tasks)
            .field("selected", &self.selected)
            .field("search", &self.search)
            .field("default_list", &self.default_list)
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        TaskStore::empty()
    }
}

impl TaskStore {
    /// An empty store with the default settings.
    pub fn empty() -> TaskStore {
        TaskStore {
            tasks: Vec::new(),
            selected: TaskList::Reminders,
            search: String::new(),
            default_list: TaskList::Reminders,
            revision: 0,
            listeners: Vec::new(),
        }
    }

    /// Creates a store per `config`, seeded with the demo reminders unless disabled.
    pub fn new(config: &Config) -> TaskStore {
        let mut store = if config.seed_demo_data {
            TaskStore::seeded(Local::now())
        } else {
            TaskStore::empty()
        };
        store.default_list = config.default_list;
        store
    }

    /// A store holding the demo reminders, timed relative to `now`.
    pub fn seeded(now: DateTime<Local>) -> TaskStore {
        let mut store = TaskStore::empty();
        store.tasks = seed_tasks(now);
        debug!(count = store.tasks.len(), "seeded store with demo reminders");
        store
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn selected_view(&self) -> TaskList {
        self.selected
    }

    pub fn search_query(&self) -> &str {
        &self.search
    }

    pub fn default_list(&self) -> TaskList {
        self.default_list
    }

    /// Counter bumped by every mutation that changed something.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Registers `listener` to be called after every effective mutation.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&StoreEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self, event: StoreEvent) {
        self.revision += 1;
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    /// Appends `task` as-is; titles are not validated here.
    ///
    /// A task whose id is already stored is ignored, so ids stay unique.
    pub fn add(&mut self, task: Task) {
        let id = task.id();
        if self.get(id).is_some() {
            trace!(%id, "add ignored, id already stored");
            return;
        }
        debug!(%id, title = %task.title, "adding task");
        self.tasks.push(task);
        self.emit(StoreEvent::Added(id));
    }

    /// Replaces the stored task with the same id, keeping its position.
    pub fn update(&mut self, task: Task) {
        let id = task.id();
        match self.tasks.iter_mut().find(|t| t.id() == id) {
            Some(slot) => {
                debug!(%id, "updating task");
                *slot = task;
                self.emit(StoreEvent::Updated(id));
            }
            None => trace!(%id, "update ignored, no such task"),
        }
    }

    pub fn delete(&mut self, id: TaskId) {
        self.delete_many(&[id]);
    }

    /// Removes every task whose id is in `ids`.
    pub fn delete_many(&mut self, ids: &[TaskId]) {
        let removed: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|t| ids.contains(&t.id()))
            .map(|t| t.id())
            .collect();
        if removed.is_empty() {
            trace!(?ids, "delete ignored, no such tasks");
            return;
        }
        self.tasks.retain(|t| !ids.contains(&t.id()));
        debug!(?removed, "deleted tasks");
        self.emit(StoreEvent::Deleted(removed));
    }

    /// Deletes the tasks at `offsets` within the currently filtered view.
    /// Offsets past the end of the view are skipped.
    pub fn delete_filtered_at(&mut self, offsets: &[usize], now: DateTime<Local>) {
        let ids: Vec<TaskId> = {
            let visible = self.filtered_tasks(now);
            offsets
                .iter()
                .filter_map(|&i| visible.get(i).map(|t| t.id()))
                .collect()
        };
        self.delete_many(&ids);
    }

    /// Flips completion of the task with `id`, stamping or clearing its completion time.
    pub fn toggle_completion(&mut self, id: TaskId) {
        self.toggle_completion_at(id, Local::now());
    }

    pub fn toggle_completion_at(&mut self, id: TaskId, now: DateTime<Local>) {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id() == id) else {
            trace!(%id, "toggle ignored, no such task");
            return;
        };
        let completed = !task.is_completed();
        task.set_completed(completed, now);
        debug!(%id, completed, "toggled completion");
        self.emit(StoreEvent::CompletionToggled { id, completed });
    }

    /// Removes every completed task.
    pub fn clear_completed(&mut self) {
        let removed: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|t| t.is_completed())
            .map(|t| t.id())
            .collect();
        if removed.is_empty() {
            return;
        }
        self.tasks.retain(|t| !t.is_completed());
        debug!(count = removed.len(), "cleared completed tasks");
        self.emit(StoreEvent::ClearedCompleted(removed));
    }

    pub fn set_selected_view(&mut self, view: TaskList) {
        if self.selected == view {
            return;
        }
        self.selected = view;
        self.emit(StoreEvent::SelectionChanged(view));
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if self.search == query {
            return;
        }
        self.search = query.clone();
        self.emit(StoreEvent::SearchChanged(query));
    }

    /// A fresh, untitled task due now, filed under `view`.
    ///
    /// Falls back to the default list for the `Completed` view. The task is
    /// not added to the store.
    pub fn create_blank_task(&self, view: TaskList) -> Task {
        self.create_blank_task_at(view, Local::now())
    }

    pub fn create_blank_task_at(&self, view: TaskList, now: DateTime<Local>) -> Task {
        let list = if view == TaskList::Completed {
            self.default_list
        } else {
            view
        };
        Task::new("", now).with_due(now).with_list(list)
    }

    pub fn filtered_tasks(&self, now: DateTime<Local>) -> Vec<&Task> {
        projection::filtered_tasks(&self.tasks, self.selected, &self.search, now)
    }

    pub fn task_counts(&self, now: DateTime<Local>) -> BTreeMap<TaskList, usize> {
        projection::task_counts(&self.tasks, now)
    }

    pub fn grouped_by_date(&self, now: DateTime<Local>) -> BTreeMap<Option<NaiveDate>, Vec<&Task>> {
        projection::grouped_by_date(&self.filtered_tasks(now))
    }

    pub fn date_sections(&self, now: DateTime<Local>) -> Vec<(Option<NaiveDate>, Vec<&Task>)> {
        projection::date_sections(&self.filtered_tasks(now))
    }

    pub fn overdue_tasks(&self, now: DateTime<Local>) -> Vec<&Task> {
        projection::overdue_tasks(&self.tasks, now)
    }
}

/// The demo reminders every fresh store starts with.
pub fn seed_tasks(now: DateTime<Local>) -> Vec<Task> {
    vec![
        Task::new("Buy groceries", now)
            .with_notes("Milk, bread, eggs, cheese")
            .with_due(now + Duration::hours(2))
            .with_priority(Priority::Medium),
        Task::new("Team meeting", now)
            .with_notes("Discuss Q4 roadmap and deliverables")
            .with_due(now + Duration::days(1))
            .with_priority(Priority::High),
        Task::new("Call dentist", now)
            .with_notes("Book appointment for checkup")
            .with_due(now + Duration::days(3))
            .with_priority(Priority::Low),
        Task::new("Finish project report", now)
            .with_notes("Complete sections 3-5 and add charts")
            .with_due(now)
            .completed_at(now),
    ]
}
