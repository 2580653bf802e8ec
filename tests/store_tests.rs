mod common;

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Duration;
use pretty_assertions::assert_eq;
use remindrs::config::Config;
use remindrs::{Priority, StoreEvent, Task, TaskList, TaskStore};
use uuid::Uuid;

use common::{noon, titles};

fn task_named<'a>(store: &'a TaskStore, title: &str) -> &'a Task {
    store.tasks().iter().find(|t| t.title == title).unwrap()
}

#[test]
fn test_seeded_store() {
    let store = TaskStore::seeded(noon());
    assert_eq!(store.len(), 4);
    assert_eq!(store.selected_view(), TaskList::Reminders);
    assert_eq!(store.search_query(), "");

    let report = task_named(&store, "Finish project report");
    assert!(report.is_completed());
    assert_eq!(report.completion_time(), Some(noon()));
}

#[test]
fn test_new_respects_config() {
    let config = Config {
        default_list: TaskList::Flagged,
        seed_demo_data: false,
    };
    let store = TaskStore::new(&config);
    assert!(store.is_empty());
    assert_eq!(store.default_list(), TaskList::Flagged);

    assert_eq!(TaskStore::new(&Config::default()).len(), 4);
}

#[test]
fn test_add_accepts_blank_title() {
    let mut store = TaskStore::empty();
    store.add(Task::new("", noon()));
    assert_eq!(store.len(), 1);
    assert_eq!(store.tasks()[0].title, "");
}

#[test]
fn test_add_ignores_duplicate_id() {
    let mut store = TaskStore::seeded(noon());
    let revision = store.revision();
    let copy = store.tasks()[0].clone();

    store.add(copy.clone());
    assert_eq!(store.len(), 4);
    assert_eq!(store.revision(), revision);

    store.delete(copy.id());
    assert_eq!(store.len(), 3);
    assert!(store.get(copy.id()).is_none());
}

#[test]
fn test_update_replaces_in_place() {
    let now = noon();
    let mut store = TaskStore::seeded(now);
    let mut meeting = task_named(&store, "Team meeting").clone();
    meeting.title = "Team sync".to_string();
    meeting.priority = Priority::Low;
    store.update(meeting.clone());

    assert_eq!(store.tasks()[1], meeting);
    // Updates show up in projections straight away.
    assert!(store.filtered_tasks(now).iter().any(|t| t.title == "Team sync"));
    store.set_selected_view(TaskList::Flagged);
    assert!(store.filtered_tasks(now).is_empty());
    assert_eq!(store.task_counts(now)[&TaskList::Flagged], 0);
}

#[test]
fn test_update_unknown_id_is_ignored() {
    let now = noon();
    let mut store = TaskStore::seeded(now);
    let before = store.tasks().to_vec();
    let revision = store.revision();

    store.update(Task::new("stranger", now));

    assert_eq!(store.tasks(), &before[..]);
    assert_eq!(store.revision(), revision);
}

#[test]
fn test_delete_removes_exactly_one() {
    let mut store = TaskStore::seeded(noon());
    let id = task_named(&store, "Call dentist").id();

    store.delete(id);
    assert_eq!(store.len(), 3);
    assert!(store.get(id).is_none());

    store.delete(id);
    store.delete(Uuid::new_v4());
    assert_eq!(store.len(), 3);
}

#[test]
fn test_delete_many() {
    let mut store = TaskStore::seeded(noon());
    let ids = vec![
        task_named(&store, "Buy groceries").id(),
        task_named(&store, "Team meeting").id(),
        Uuid::new_v4(),
    ];
    store.delete_many(&ids);
    let remaining: Vec<&Task> = store.tasks().iter().collect();
    assert_eq!(titles(&remaining), vec!["Call dentist", "Finish project report"]);
}

#[test]
fn test_delete_filtered_at_uses_view_positions() {
    let now = noon();
    let mut store = TaskStore::seeded(now);
    store.set_selected_view(TaskList::Completed);
    store.delete_filtered_at(&[0, 7], now);

    assert_eq!(store.len(), 3);
    assert!(store.tasks().iter().all(|t| !t.is_completed()));
}

#[test]
fn test_toggle_completion_round_trip() {
    let now = noon();
    let later = now + Duration::minutes(5);
    let mut store = TaskStore::seeded(now);
    let original = task_named(&store, "Buy groceries").clone();

    store.toggle_completion_at(original.id(), later);
    let toggled = store.get(original.id()).unwrap();
    assert!(toggled.is_completed());
    assert_eq!(toggled.completion_time(), Some(later));

    store.toggle_completion_at(original.id(), later + Duration::minutes(1));
    let restored = store.get(original.id()).unwrap();
    assert_eq!(restored.is_completed(), original.is_completed());
    assert_eq!(restored.completion_time(), original.completion_time());
    assert_eq!(restored.created_at(), original.created_at());
}

#[test]
fn test_completion_time_tracks_flag() {
    let mut store = TaskStore::seeded(noon());
    let ids: Vec<_> = store.tasks().iter().map(|t| t.id()).collect();
    for id in ids {
        store.toggle_completion(id);
        let t = store.get(id).unwrap();
        assert_eq!(t.completion_time().is_some(), t.is_completed());
    }
}

#[test]
fn test_clear_completed_keeps_incomplete_tasks_untouched() {
    let now = noon();
    let mut store = TaskStore::seeded(now);
    let incomplete: Vec<Task> = store
        .tasks()
        .iter()
        .filter(|t| !t.is_completed())
        .cloned()
        .collect();

    store.clear_completed();

    assert_eq!(store.tasks(), &incomplete[..]);
    assert_eq!(store.task_counts(now)[&TaskList::Completed], 0);
}

#[test]
fn test_store_projections_use_selection_state() {
    let now = noon();
    let mut store = TaskStore::seeded(now);
    store.set_search_query("groc");
    assert_eq!(titles(&store.filtered_tasks(now)), vec!["Buy groceries"]);
    // Counts never see the query.
    assert_eq!(store.task_counts(now)[&TaskList::Reminders], 3);

    store.set_selected_view(TaskList::Scheduled);
    store.set_search_query("");
    let groups = store.grouped_by_date(now);
    assert_eq!(groups.values().map(Vec::len).sum::<usize>(), 3);
}

#[test]
fn test_create_blank_task() {
    let now = noon();
    let store = TaskStore::empty();

    let task = store.create_blank_task_at(TaskList::Today, now);
    assert_eq!(task.title, "");
    assert_eq!(task.notes, "");
    assert_eq!(task.due, Some(now));
    assert_eq!(task.priority, Priority::None);
    assert_eq!(task.list, TaskList::Today);
    assert!(!task.is_completed());
    assert_eq!(task.completion_time(), None);

    let from_completed = store.create_blank_task_at(TaskList::Completed, now);
    assert_eq!(from_completed.list, TaskList::Reminders);
    assert_ne!(from_completed.id(), task.id());

    let flagged_default = TaskStore::new(&Config {
        default_list: TaskList::Flagged,
        seed_demo_data: false,
    });
    assert_eq!(
        flagged_default.create_blank_task_at(TaskList::Completed, now).list,
        TaskList::Flagged
    );
}

#[test]
fn test_subscribers_see_effective_mutations_only() {
    let now = noon();
    let mut store = TaskStore::seeded(now);
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    store.subscribe(move |e| sink.borrow_mut().push(e.clone()));

    let id = task_named(&store, "Buy groceries").id();
    store.toggle_completion_at(id, now);
    store.toggle_completion_at(Uuid::new_v4(), now);
    store.set_selected_view(TaskList::Reminders); // already selected
    store.set_selected_view(TaskList::Today);
    store.set_search_query("x");
    store.clear_completed();
    store.delete(Uuid::new_v4());

    let events = events.borrow();
    assert_eq!(events.len(), 4);
    assert_eq!(events[0], StoreEvent::CompletionToggled { id, completed: true });
    assert_eq!(events[1], StoreEvent::SelectionChanged(TaskList::Today));
    assert_eq!(events[2], StoreEvent::SearchChanged("x".to_string()));
    match &events[3] {
        StoreEvent::ClearedCompleted(ids) => assert_eq!(ids.len(), 2),
        other => panic!("unexpected event {:?}", other),
    }
    assert_eq!(store.revision(), 4);
}
