use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique, immutable identifier of a task.
pub type TaskId = Uuid;

/// Importance of a task, ordered from `None` to `High`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::None, Priority::Low, Priority::Medium, Priority::High];

    pub fn label(self) -> &'static str {
        match self {
            Priority::None => "None",
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// The next priority, wrapping from `High` back to `None`.
    pub fn cycle(self) -> Priority {
        match self {
            Priority::None => Priority::Low,
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::None,
        }
    }
}

/// A named view over the task collection.
///
/// Declaration order is the sidebar order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskList {
    #[default]
    Reminders,
    Today,
    Scheduled,
    Flagged,
    Completed,
}

impl TaskList {
    pub const ALL: [TaskList; 5] = [
        TaskList::Reminders,
        TaskList::Today,
        TaskList::Scheduled,
        TaskList::Flagged,
        TaskList::Completed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TaskList::Reminders => "Reminders",
            TaskList::Today => "Today",
            TaskList::Scheduled => "Scheduled",
            TaskList::Flagged => "Flagged",
            TaskList::Completed => "Completed",
        }
    }

    /// Parses a view name case-insensitively (`"today"`, `"Today"`, ...).
    pub fn from_name(name: &str) -> Option<TaskList> {
        TaskList::ALL
            .into_iter()
            .find(|l| l.label().eq_ignore_ascii_case(name.trim()))
    }
}

/// Represents a single reminder.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Task {
    /// Assigned once at construction.
    id: TaskId,
    pub title: String,
    pub notes: String,
    /// `None` means the task has no due date.
    pub due: Option<DateTime<Local>>,
    /// Priority of the task; `High` puts it in the flagged view.
    pub priority: Priority,
    /// The list the task was filed under.
    pub list: TaskList,
    created_at: DateTime<Local>,
    completed: bool,
    completed_at: Option<DateTime<Local>>,
}

impl Task {
    /// Creates an incomplete task with no notes, no due date and no priority.
    pub fn new(title: impl Into<String>, now: DateTime<Local>) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: title.into(),
            notes: String::new(),
            due: None,
            priority: Priority::None,
            list: TaskList::Reminders,
            created_at: now,
            completed: false,
            completed_at: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Task {
        self.notes = notes.into();
        self
    }

    pub fn with_due(mut self, due: DateTime<Local>) -> Task {
        self.due = Some(due);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Task {
        self.priority = priority;
        self
    }

    pub fn with_list(mut self, list: TaskList) -> Task {
        self.list = list;
        self
    }

    /// Marks the task as completed at `at`.
    pub fn completed_at(mut self, at: DateTime<Local>) -> Task {
        self.set_completed(true, at);
        self
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn completion_time(&self) -> Option<DateTime<Local>> {
        self.completed_at
    }

    /// Sets the completion flag, keeping the completion timestamp in step:
    /// stamped with `now` when completing, cleared when reopening.
    pub fn set_completed(&mut self, completed: bool, now: DateTime<Local>) {
        self.completed = completed;
        self.completed_at = if completed { Some(now) } else { None };
    }
}
