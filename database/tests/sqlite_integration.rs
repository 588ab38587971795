use chrono::{NaiveDate, NaiveDateTime};
use database::{NewToDo, SqliteToDoRepository, ToDo, ToDoError, ToDoRepository};
use futures::future::join_all;
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::Instant;

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
}

async fn create_test_repository() -> SqliteToDoRepository {
    let repo = SqliteToDoRepository::new(":memory:").await.unwrap();
    repo.migrate().await.unwrap();
    repo
}

#[tokio::test]
async fn test_repository_creation_and_health() {
    let repo = create_test_repository().await;

    assert!(repo.health_check().await.is_ok());
    assert!(repo.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_full_todo_lifecycle() {
    let repo = create_test_repository().await;

    let created = repo
        .create(
            NewToDo::new("Book flights", at(16, 18))
                .with_description("window seat")
                .with_complete_percent(10.0),
        )
        .await
        .unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.description.as_deref(), Some("window seat"));
    assert!(!created.is_done);

    // Read-modify-write, the way the percent and done routes do it
    let mut fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
    fetched.complete();
    fetched.mark_done();
    let updated = repo.update(&fetched).await.unwrap().unwrap();
    assert_eq!(updated.complete_percent, 100.0);
    assert!(updated.is_done);

    // Replace keeps the done flag
    let replaced = repo
        .replace(created.id, NewToDo::new("Book trains", at(17, 9)))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(replaced.title, "Book trains");
    assert_eq!(replaced.description, None);
    assert_eq!(replaced.complete_percent, 0.0);
    assert!(replaced.is_done);

    assert!(repo.delete(created.id).await.unwrap());
    assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    assert!(!repo.delete(created.id).await.unwrap());
}

#[tokio::test]
async fn test_missing_records() {
    let repo = create_test_repository().await;

    assert!(repo.get_by_id(99999).await.unwrap().is_none());
    assert!(repo
        .replace(99999, NewToDo::new("nothing", at(16, 0)))
        .await
        .unwrap()
        .is_none());

    let ghost = ToDo::from_new(99999, NewToDo::new("ghost", at(16, 0)));
    assert!(repo.update(&ghost).await.unwrap().is_none());
    assert!(repo.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_expiry_queries_ignore_time_of_day() {
    let repo = create_test_repository().await;

    let early = repo.create(NewToDo::new("early", at(16, 0))).await.unwrap();
    let late = repo
        .create(NewToDo::new("late", at(16, 23) + chrono::Duration::minutes(59)))
        .await
        .unwrap();
    let tomorrow = repo.create(NewToDo::new("tomorrow", at(17, 8))).await.unwrap();
    let next_week = repo.create(NewToDo::new("next week", at(18, 8))).await.unwrap();

    let today: Vec<i32> = repo
        .list_by_expiry_date(date(16))
        .await
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(today, vec![early.id, late.id]);

    let week: Vec<i32> = repo
        .list_by_expiry_range(date(11), date(17))
        .await
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(week, vec![early.id, late.id, tomorrow.id]);
    assert!(!week.contains(&next_week.id));

    assert!(repo
        .list_by_expiry_range(date(17), date(11))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_check_constraints_reject_invalid_rows() {
    let repo = create_test_repository().await;

    let result = repo.create(NewToDo::new("   ", at(16, 0))).await;
    match result.unwrap_err() {
        ToDoError::Database(msg) => assert!(msg.contains("Constraint violation"), "{msg}"),
        other => panic!("Expected database error, got: {:?}", other),
    }

    let result = repo
        .create(NewToDo::new("Too far", at(16, 0)).with_complete_percent(150.0))
        .await;
    assert!(result.unwrap_err().is_database());

    assert!(repo.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_file_database_persists_across_connections() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("todo.sqlite");
    let url = format!("sqlite://{}", db_path.display());

    let id = {
        let repo = SqliteToDoRepository::new(&url).await.unwrap();
        repo.migrate().await.unwrap();
        let created = repo.create(NewToDo::new("Survive restart", at(16, 12))).await.unwrap();
        repo.pool().close().await;
        created.id
    };

    assert!(db_path.exists());

    let reopened = SqliteToDoRepository::new(db_path.to_str().unwrap()).await.unwrap();
    reopened.migrate().await.unwrap();
    let fetched = reopened.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(fetched.title, "Survive restart");
    assert_eq!(fetched.expiry, at(16, 12));
}

#[tokio::test]
async fn test_performance_requirements() {
    let repo = create_test_repository().await;

    // Create operation should complete in <100ms
    let start = Instant::now();
    let todo = repo.create(NewToDo::new("Performance", at(16, 0))).await.unwrap();
    let create_duration = start.elapsed();
    assert!(create_duration < Duration::from_millis(100), "Create took {:?}", create_duration);

    let start = Instant::now();
    repo.get_by_id(todo.id).await.unwrap();
    let read_duration = start.elapsed();
    assert!(read_duration < Duration::from_millis(100), "Read took {:?}", read_duration);

    let start = Instant::now();
    repo.list_by_expiry_range(date(11), date(17)).await.unwrap();
    let list_duration = start.elapsed();
    assert!(list_duration < Duration::from_millis(100), "List took {:?}", list_duration);
}

#[tokio::test]
async fn test_concurrent_creates_get_unique_ids() {
    let temp_dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}", temp_dir.path().join("concurrent.sqlite").display());
    let repo = SqliteToDoRepository::new(&url).await.unwrap();
    repo.migrate().await.unwrap();

    let results = join_all((0..10).map(|i| {
        let repo = repo.clone();
        async move {
            repo.create(NewToDo::new(format!("Concurrent {i}"), at(16, 0)))
                .await
        }
    }))
    .await;

    let mut ids: Vec<i32> = results.into_iter().map(|r| r.unwrap().id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 10);
    assert_eq!(repo.list_all().await.unwrap().len(), 10);
}
