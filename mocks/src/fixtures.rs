//! Standard test fixtures for consistent testing
//!
//! Provides pre-built test data including:
//! - A standard record and its creation input
//! - Records spread across a known week
//! - Request payloads as clients send them

use chrono::{NaiveDate, NaiveDateTime};
use todo_core::{FixedClock, NewToDo, ToDo, ToDoPayload};

/// The date every fixture is anchored to: Friday 16 October 2026
pub fn fixture_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

/// A clock pinned to [`fixture_today`]
pub fn fixture_clock() -> FixedClock {
    FixedClock(fixture_today())
}

/// Noon on the given day of October 2026
pub fn expiry_on(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, day)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// Create a standard NewToDo for testing creation
pub fn create_new_todo() -> NewToDo {
    NewToDo::new("Pay the electricity bill", expiry_on(16))
        .with_description("Account 4471, due before the 18th")
}

/// Create NewToDo with specific title
pub fn create_new_todo_with_title(title: &str) -> NewToDo {
    let mut todo = create_new_todo();
    todo.title = title.to_string();
    todo
}

/// Create a basic test record with sensible defaults
pub fn create_test_todo() -> ToDo {
    ToDo::from_new(1, create_new_todo())
}

/// Create multiple unique records with IDs `1..=count`, all due today
pub fn create_test_todos(count: usize) -> Vec<ToDo> {
    (1..=count)
        .map(|i| {
            ToDo::from_new(
                i as i32,
                NewToDo::new(format!("Test to-do {i}"), expiry_on(16))
                    .with_complete_percent((i * 10 % 101) as f64),
            )
        })
        .collect()
}

/// One record per interesting day around [`fixture_today`].
///
/// IDs 1-5 are due: last Saturday (10th), this Sunday (11th), today
/// (16th), tomorrow (17th, also the last day of the week) and next Sunday
/// (18th).
pub fn create_todos_across_week() -> Vec<ToDo> {
    [
        (10, "Last week"),
        (11, "Week start"),
        (16, "Today"),
        (17, "Tomorrow"),
        (18, "Next week"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (day, title))| ToDo::from_new(i as i32 + 1, NewToDo::new(title, expiry_on(day))))
    .collect()
}

/// A payload that passes validation
pub fn create_valid_payload() -> ToDoPayload {
    ToDoPayload {
        title: Some("Test".to_string()),
        description: Some("Test description".to_string()),
        expiry: Some("2026-10-16T12:00:00".to_string()),
        complete_percent: Some(0.0),
        is_done: None,
    }
}
