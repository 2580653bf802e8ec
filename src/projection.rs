//! Read-only views derived from the task collection.
//!
//! Every function here is pure: the current time is always passed in, and
//! results depend only on the arguments.

use std::collections::BTreeMap;

use chrono::{DateTime, Days, Local, NaiveDate};

use crate::models::{Priority, Task, TaskList};

/// Whether `task` belongs to `list`, ignoring any search query.
pub fn matches_list(task: &Task, list: TaskList, now: DateTime<Local>) -> bool {
    match list {
        TaskList::Reminders | TaskList::Scheduled => !task.is_completed(),
        TaskList::Today => !task.is_completed() && is_due_today(task, now),
        TaskList::Flagged => !task.is_completed() && task.priority == Priority::High,
        TaskList::Completed => task.is_completed(),
    }
}

/// Case-insensitive substring match against title and notes.
/// An empty query matches everything.
pub fn matches_query(task: &Task, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    task.title.to_lowercase().contains(&needle) || task.notes.to_lowercase().contains(&needle)
}

/// The tasks shown for `list`, narrowed by `query`.
///
/// Collection order is kept except for `Scheduled`, which is stably sorted
/// by due date with undated tasks last.
pub fn filtered_tasks<'a>(
    tasks: &'a [Task],
    list: TaskList,
    query: &str,
    now: DateTime<Local>,
) -> Vec<&'a Task> {
    let mut filtered: Vec<&Task> = tasks
        .iter()
        .filter(|t| matches_list(t, list, now))
        .collect();

    if list == TaskList::Scheduled {
        // `None` sorts before `Some` for Option, so key on (is_none, due).
        filtered.sort_by_key(|t| (t.due.is_none(), t.due));
    }

    filtered.retain(|t| matches_query(t, query));
    filtered
}

/// Number of tasks in each view. The search query never affects counts.
pub fn task_counts(tasks: &[Task], now: DateTime<Local>) -> BTreeMap<TaskList, usize> {
    TaskList::ALL
        .into_iter()
        .map(|list| {
            let count = tasks.iter().filter(|t| matches_list(t, list, now)).count();
            (list, count)
        })
        .collect()
}

/// Buckets already-filtered tasks by local calendar day of their due date.
///
/// Undated tasks land under `None`. Each bucket keeps the input order.
pub fn grouped_by_date<'a>(filtered: &[&'a Task]) -> BTreeMap<Option<NaiveDate>, Vec<&'a Task>> {
    let mut groups: BTreeMap<Option<NaiveDate>, Vec<&Task>> = BTreeMap::new();
    for task in filtered {
        groups.entry(due_day(task)).or_default().push(*task);
    }
    groups
}

/// Date buckets in display order: dated days ascending, then the undated bucket.
pub fn date_sections<'a>(filtered: &[&'a Task]) -> Vec<(Option<NaiveDate>, Vec<&'a Task>)> {
    let mut sections: Vec<_> = grouped_by_date(filtered).into_iter().collect();
    // `None` sorts first in the map; undated tasks belong at the end.
    sections.sort_by_key(|(day, _)| (day.is_none(), *day));
    sections
}

/// Incomplete tasks whose due time is strictly before `now`, in collection order.
pub fn overdue_tasks(tasks: &[Task], now: DateTime<Local>) -> Vec<&Task> {
    tasks.iter().filter(|t| is_overdue(t, now)).collect()
}

pub fn is_overdue(task: &Task, now: DateTime<Local>) -> bool {
    !task.is_completed() && task.due.is_some_and(|due| due < now)
}

pub fn is_due_today(task: &Task, now: DateTime<Local>) -> bool {
    due_day(task) == Some(now.date_naive())
}

pub fn is_due_tomorrow(task: &Task, now: DateTime<Local>) -> bool {
    let tomorrow = now.date_naive().checked_add_days(Days::new(1));
    tomorrow.is_some() && due_day(task) == tomorrow
}

/// Local calendar day a task is due on.
pub fn due_day(task: &Task) -> Option<NaiveDate> {
    task.due.map(|due| due.date_naive())
}
