use chrono::{DateTime, Local};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::error::Result;
use crate::format;
use crate::models::{Priority, Task, TaskList};
use crate::projection::{self, is_overdue};
use crate::store::TaskStore;

/// Builds the table used by `list` and `overdue`.
pub fn task_table(tasks: &[&Task], now: DateTime<Local>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Notes").add_attribute(Attribute::Bold),
            Cell::new("Due").add_attribute(Attribute::Bold),
            Cell::new("Priority").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    for t in tasks {
        let color = if t.is_completed() {
            Color::Grey
        } else if is_overdue(t, now) {
            Color::Red
        } else if t.priority == Priority::High {
            Color::Yellow
        } else {
            Color::Green
        };

        table.add_row(vec![
            Cell::new(&t.title).fg(color),
            Cell::new(&t.notes),
            Cell::new(format::when(t, now)),
            Cell::new(t.priority.label()),
            Cell::new(if t.is_completed() { "Done" } else { "Pending" }).fg(color),
        ]);
    }
    table
}

/// Renders the filtered view of `store`, optionally split into date sections.
pub fn render_list(store: &TaskStore, now: DateTime<Local>, group: bool) -> String {
    let tasks = store.filtered_tasks(now);
    if tasks.is_empty() {
        return "No tasks found.".to_string();
    }
    if !group {
        return task_table(&tasks, now).to_string();
    }
    projection::date_sections(&tasks)
        .into_iter()
        .map(|(day, bucket)| {
            format!("{}\n{}", format::day_label(day, now), task_table(&bucket, now))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Renders per-view counts, one line per view in sidebar order.
pub fn render_counts(store: &TaskStore, now: DateTime<Local>) -> String {
    let counts = store.task_counts(now);
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec![
            Cell::new("View").add_attribute(Attribute::Bold),
            Cell::new("Count").add_attribute(Attribute::Bold),
        ]);
    for list in TaskList::ALL {
        let count = counts.get(&list).copied().unwrap_or(0);
        table.add_row(vec![Cell::new(list.label()), Cell::new(count)]);
    }
    table.to_string()
}

/// Prints the tasks in the store's selected view.
pub fn cmd_list(store: &TaskStore, now: DateTime<Local>, group: bool, as_json: bool) -> Result<()> {
    if as_json {
        let tasks = store.filtered_tasks(now);
        println!("{}", serde_json::to_string_pretty(&tasks)?);
    } else {
        println!("{}", render_list(store, now, group));
    }
    Ok(())
}

/// Prints how many tasks each view holds.
pub fn cmd_counts(store: &TaskStore, now: DateTime<Local>, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(&store.task_counts(now))?);
    } else {
        println!("{}", render_counts(store, now));
    }
    Ok(())
}

/// Prints incomplete tasks that are past due.
pub fn cmd_overdue(store: &TaskStore, now: DateTime<Local>, as_json: bool) -> Result<()> {
    let overdue = store.overdue_tasks(now);
    if as_json {
        println!("{}", serde_json::to_string_pretty(&overdue)?);
    } else if overdue.is_empty() {
        println!("Nothing overdue.");
    } else {
        println!("{}", task_table(&overdue, now));
    }
    Ok(())
}
