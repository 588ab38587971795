//! Behavior of the provided `ToDoRepository::replace` method
//!
//! Uses a minimal vector-backed store so only the default method is under test.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Mutex;
use todo_core::{NewToDo, Result, ToDo, ToDoRepository};

#[derive(Default)]
struct VecRepository {
    todos: Mutex<Vec<ToDo>>,
}

#[async_trait]
impl ToDoRepository for VecRepository {
    async fn list_all(&self) -> Result<Vec<ToDo>> {
        Ok(self.todos.lock().unwrap().clone())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<ToDo>> {
        Ok(self.todos.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn create(&self, todo: NewToDo) -> Result<ToDo> {
        let mut todos = self.todos.lock().unwrap();
        let created = ToDo::from_new(todos.len() as i32 + 1, todo);
        todos.push(created.clone());
        Ok(created)
    }

    async fn update(&self, todo: &ToDo) -> Result<Option<ToDo>> {
        let mut todos = self.todos.lock().unwrap();
        Ok(todos.iter_mut().find(|t| t.id == todo.id).map(|stored| {
            *stored = todo.clone();
            stored.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let mut todos = self.todos.lock().unwrap();
        let before = todos.len();
        todos.retain(|t| t.id != id);
        Ok(todos.len() != before)
    }

    async fn list_by_expiry_date(&self, date: NaiveDate) -> Result<Vec<ToDo>> {
        self.list_by_expiry_range(date, date).await
    }

    async fn list_by_expiry_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<ToDo>> {
        Ok(self
            .todos
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.is_due_between(start, end))
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

fn expiry(day: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, day)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

#[tokio::test]
async fn test_replace_rewrites_fields_and_keeps_done_flag() {
    let repo = VecRepository::default();
    let created = repo
        .create(NewToDo::new("Original", expiry(16)).with_done(true))
        .await
        .unwrap();

    let replaced = repo
        .replace(
            created.id,
            NewToDo::new("Replaced", expiry(18))
                .with_description("new text")
                .with_complete_percent(75.0),
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(replaced.id, created.id);
    assert_eq!(replaced.title, "Replaced");
    assert_eq!(replaced.description.as_deref(), Some("new text"));
    assert_eq!(replaced.expiry, expiry(18));
    assert_eq!(replaced.complete_percent, 75.0);
    assert!(replaced.is_done);

    let stored = repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(stored, replaced);
}

#[tokio::test]
async fn test_replace_missing_id_creates_nothing() {
    let repo = VecRepository::default();

    let result = repo.replace(42, NewToDo::new("Ghost", expiry(16))).await.unwrap();

    assert!(result.is_none());
    assert!(repo.list_all().await.unwrap().is_empty());
}
