mod common;

use remindrs::commands::{render_counts, render_list};
use remindrs::{Task, TaskList, TaskStore};

use common::noon;

#[test]
fn test_list_renders_selected_view() {
    let now = noon();
    let mut store = TaskStore::seeded(now);
    store.set_selected_view(TaskList::Flagged);

    let out = render_list(&store, now, false);
    assert!(out.contains("Team meeting"));
    assert!(out.contains("Tomorrow 12:00"));
    assert!(!out.contains("Buy groceries"));
}

#[test]
fn test_list_grouped_has_day_sections() {
    let now = noon();
    let mut store = TaskStore::seeded(now);
    store.set_selected_view(TaskList::Scheduled);

    let out = render_list(&store, now, true);
    let today = out.find("Today\n").unwrap();
    let tomorrow = out.find("Tomorrow\n").unwrap();
    assert!(today < tomorrow);
    assert!(out.contains("13/03/25"));
}

#[test]
fn test_list_empty_search() {
    let now = noon();
    let mut store = TaskStore::seeded(now);
    store.set_search_query("nothing matches this");
    assert_eq!(render_list(&store, now, false), "No tasks found.");
}

#[test]
fn test_counts_table_lists_every_view() {
    let now = noon();
    let store = TaskStore::seeded(now);
    let out = render_counts(&store, now);
    for list in TaskList::ALL {
        assert!(out.contains(list.label()), "missing {}", list.label());
    }
}

#[test]
fn test_list_grouped_puts_undated_section_last() {
    let now = noon();
    let mut store = TaskStore::seeded(now);
    store.add(Task::new("Someday", now));
    store.set_selected_view(TaskList::Scheduled);

    let out = render_list(&store, now, true);
    let no_date = out.find("No date\n").unwrap();
    let dated = out.find("13/03/25\n").unwrap();
    assert!(out.find("Today\n").unwrap() < dated);
    assert!(dated < no_date);
    assert!(out[no_date..].contains("Someday"));
}

#[test]
fn test_json_output_carries_completion_pair() {
    let now = noon();
    let store = TaskStore::seeded(now);
    let value = serde_json::to_value(store.tasks()).unwrap();
    let tasks = value.as_array().unwrap();

    assert_eq!(tasks.len(), 4);
    for t in tasks {
        let completed = t["completed"].as_bool().unwrap();
        assert_eq!(!t["completed_at"].is_null(), completed, "{}", t["title"]);
        assert!(t["id"].is_string());
    }
}
