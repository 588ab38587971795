//! Contract test helpers for validating trait implementations
//!
//! Provides standardized tests that any ToDoRepository implementation
//! should pass, ensuring the SQLite, in-memory and mock stores behave the
//! same. Each helper expects an empty store.

use crate::{
    assert_ids, assert_sorted_by_id, assert_todo_matches_new, create_new_todo, expiry_on,
    fixture_today, NewToDoBuilder,
};
use chrono::Days;
use todo_core::{DueWindow, ToDoRepository};

/// Test any ToDoRepository implementation with comprehensive contract tests
///
/// The helpers run in sequence against the same store; each one only
/// asserts on records it created itself.
pub async fn test_repository_contract<R: ToDoRepository>(repo: &R) {
    test_create_contract(repo).await;
    test_get_contract(repo).await;
    test_update_contract(repo).await;
    test_replace_contract(repo).await;
    test_delete_contract(repo).await;
    test_list_contract(repo).await;
    test_expiry_contract(repo).await;
    test_health_check_contract(repo).await;
}

/// Test record creation contract
pub async fn test_create_contract<R: ToDoRepository>(repo: &R) {
    let new_todo = create_new_todo();
    let first = repo
        .create(new_todo.clone())
        .await
        .expect("Create should succeed");

    assert!(first.id > 0, "Created record should have positive ID");
    assert_todo_matches_new(&first, &new_todo);

    let second = repo
        .create(new_todo)
        .await
        .expect("Identical input should create a second record");
    assert!(second.id > first.id, "IDs should increase");
}

/// Test record retrieval contract
pub async fn test_get_contract<R: ToDoRepository>(repo: &R) {
    let created = repo
        .create(NewToDoBuilder::new().with_title("Get me").build())
        .await
        .expect("Create should succeed");

    let fetched = repo
        .get_by_id(created.id)
        .await
        .expect("Get should succeed")
        .expect("Record should exist");
    assert_eq!(fetched, created);

    let missing = repo.get_by_id(99999).await.expect("Get should succeed");
    assert!(missing.is_none(), "Unknown ID should return None");
}

/// Test read-modify-write contract
pub async fn test_update_contract<R: ToDoRepository>(repo: &R) {
    let created = repo
        .create(NewToDoBuilder::new().with_title("Update me").build())
        .await
        .expect("Create should succeed");

    let mut todo = created.clone();
    todo.complete();
    todo.mark_done();
    let updated = repo
        .update(&todo)
        .await
        .expect("Update should succeed")
        .expect("Record should exist");
    assert_eq!(updated.complete_percent, 100.0);
    assert!(updated.is_done);
    assert_eq!(updated.id, created.id, "ID should remain unchanged");
    assert_eq!(updated.title, created.title);

    let stored = repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(stored, updated, "Update should be persisted");

    let mut ghost = created;
    ghost.id = 99999;
    let result = repo.update(&ghost).await.expect("Update should succeed");
    assert!(result.is_none(), "Updating an unknown ID should return None");
    assert!(
        repo.get_by_id(99999).await.unwrap().is_none(),
        "Update must never create"
    );
}

/// Test full replacement contract
pub async fn test_replace_contract<R: ToDoRepository>(repo: &R) {
    let created = repo
        .create(
            NewToDoBuilder::new()
                .with_title("Replace me")
                .with_description("old")
                .done()
                .build(),
        )
        .await
        .expect("Create should succeed");

    let replacement = NewToDoBuilder::new()
        .with_title("Replaced")
        .with_expiry(expiry_on(20))
        .with_complete_percent(35.0)
        .build();
    let replaced = repo
        .replace(created.id, replacement.clone())
        .await
        .expect("Replace should succeed")
        .expect("Record should exist");

    assert_eq!(replaced.id, created.id);
    assert_eq!(replaced.title, "Replaced");
    assert_eq!(replaced.description, None, "Omitted description should be cleared");
    assert_eq!(replaced.expiry, replacement.expiry);
    assert_eq!(replaced.complete_percent, 35.0);
    assert!(replaced.is_done, "Replace should keep the done flag");

    let missing = repo
        .replace(99999, replacement)
        .await
        .expect("Replace should succeed");
    assert!(missing.is_none(), "Replacing an unknown ID should return None");
}

/// Test deletion contract
pub async fn test_delete_contract<R: ToDoRepository>(repo: &R) {
    let created = repo
        .create(NewToDoBuilder::new().with_title("Delete me").build())
        .await
        .expect("Create should succeed");

    assert!(repo.delete(created.id).await.expect("Delete should succeed"));
    assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    assert!(
        !repo.delete(created.id).await.expect("Delete should succeed"),
        "Second delete should report nothing removed"
    );

    let next = repo
        .create(NewToDoBuilder::new().build())
        .await
        .expect("Create should succeed");
    assert!(next.id > created.id, "Deleted IDs should not be reused");
}

/// Test listing contract
pub async fn test_list_contract<R: ToDoRepository>(repo: &R) {
    let before = repo.list_all().await.expect("List should succeed");
    let created = repo
        .create(NewToDoBuilder::new().with_title("Listed").build())
        .await
        .expect("Create should succeed");

    let after = repo.list_all().await.expect("List should succeed");
    assert_eq!(after.len(), before.len() + 1);
    assert_sorted_by_id(&after);
    assert_eq!(after.last(), Some(&created));
}

/// Test expiry window contract using dates far from other helpers' records
pub async fn test_expiry_contract<R: ToDoRepository>(repo: &R) {
    let base = fixture_today() + Days::new(3650);
    let (week_start, week_end) = DueWindow::ThisWeek.bounds(base);

    let at = |date: chrono::NaiveDate, h: u32, m: u32| date.and_hms_opt(h, m, 0).unwrap();

    let midnight = repo
        .create(NewToDoBuilder::new().with_title("Midnight").with_expiry(at(base, 0, 0)).build())
        .await
        .unwrap();
    let last_minute = repo
        .create(NewToDoBuilder::new().with_title("Last minute").with_expiry(at(base, 23, 59)).build())
        .await
        .unwrap();
    let first_of_week = repo
        .create(NewToDoBuilder::new().with_title("Week start").with_expiry(at(week_start, 8, 0)).build())
        .await
        .unwrap();
    let end_of_week = repo
        .create(NewToDoBuilder::new().with_title("Week end").with_expiry(at(week_end, 20, 0)).build())
        .await
        .unwrap();
    repo.create(
        NewToDoBuilder::new()
            .with_title("Next week")
            .with_expiry(at(week_end + Days::new(1), 0, 0))
            .build(),
    )
    .await
    .unwrap();

    let due_on_base = repo.list_by_expiry_date(base).await.expect("Query should succeed");
    let mut expected = vec![midnight.id, last_minute.id];
    if week_start == base {
        expected.push(first_of_week.id);
    }
    if week_end == base {
        expected.push(end_of_week.id);
    }
    assert_ids(&due_on_base, &expected);

    let week = repo
        .list_by_expiry_range(week_start, week_end)
        .await
        .expect("Query should succeed");
    assert_ids(
        &week,
        &[midnight.id, last_minute.id, first_of_week.id, end_of_week.id],
    );

    let inverted = repo
        .list_by_expiry_range(week_end, week_start)
        .await
        .expect("Query should succeed");
    assert!(inverted.is_empty(), "Inverted range should be empty");
}

/// Test health check contract
pub async fn test_health_check_contract<R: ToDoRepository>(repo: &R) {
    repo.health_check()
        .await
        .expect("Health check should succeed");
}
