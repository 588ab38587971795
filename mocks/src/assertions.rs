//! Custom assertion helpers for testing
//!
//! Provides specialized assertions for:
//! - Comparing stored records with the input that created them
//! - Validation failures naming specific fields
//! - Ordering and membership of listings

use todo_core::{NewToDo, Result, ToDo, ToDoError};

/// Assert a stored record carries every field of its input
pub fn assert_todo_matches_new(actual: &ToDo, expected: &NewToDo) {
    assert_eq!(actual.title, expected.title, "Titles don't match");
    assert_eq!(actual.description, expected.description, "Descriptions don't match");
    assert_eq!(actual.expiry, expected.expiry, "Expiry times don't match");
    assert_eq!(
        actual.complete_percent, expected.complete_percent,
        "Completion percentages don't match"
    );
    assert_eq!(actual.is_done, expected.is_done, "Done flags don't match");
}

/// Assert records are equal, every field included
pub fn assert_todo_equals(actual: &ToDo, expected: &ToDo) {
    assert_eq!(actual, expected, "Records are not equal");
}

/// Assert a result is a validation failure reporting exactly `fields`, in order
pub fn assert_validation_fields<T: std::fmt::Debug>(result: &Result<T>, fields: &[&str]) {
    match result {
        Err(error @ ToDoError::Validation(_)) => {
            let actual: Vec<&str> = error
                .field_errors()
                .iter()
                .map(|e| e.field.as_str())
                .collect();
            assert_eq!(actual, fields, "Unexpected field errors: {error}");
        }
        other => panic!("Expected validation error on {fields:?}, got: {other:?}"),
    }
}

/// Assert the listing contains exactly these IDs, in this order
pub fn assert_ids(todos: &[ToDo], expected: &[i32]) {
    let ids: Vec<i32> = todos.iter().map(|t| t.id).collect();
    assert_eq!(ids, expected, "Unexpected record IDs");
}

/// Assert a listing is in ascending ID order
pub fn assert_sorted_by_id(todos: &[ToDo]) {
    for window in todos.windows(2) {
        assert!(
            window[0].id < window[1].id,
            "Records are not sorted by ID. Record {} comes before {}",
            window[0].id,
            window[1].id
        );
    }
}

/// Assert the listing contains a record with the given title
pub fn assert_contains_title(todos: &[ToDo], title: &str) {
    assert!(
        todos.iter().any(|t| t.title == title),
        "Expected to find '{}' in listing. Available titles: {:?}",
        title,
        todos.iter().map(|t| &t.title).collect::<Vec<_>>()
    );
}
