use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
};
use todo_core::{
    error::{Result, ToDoError},
    models::{NewToDo, ToDo},
    repository::ToDoRepository,
};

/// Process-local record store backed by an ordered map.
///
/// Used when the service runs with the `memory` backend, and by tests that
/// do not need SQL. Clones share the same records. IDs start at 1 and are
/// never reused, matching SQLite `AUTOINCREMENT`.
#[derive(Debug, Clone)]
pub struct InMemoryToDoRepository {
    todos: Arc<Mutex<BTreeMap<i32, ToDo>>>,
    // Wider than the id type so exhaustion is detected instead of wrapping
    next_id: Arc<AtomicI64>,
}

impl Default for InMemoryToDoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryToDoRepository {
    pub fn new() -> Self {
        Self {
            todos: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Create a store pre-populated with records.
    ///
    /// The next assigned ID follows the largest seeded one.
    pub fn with_todos(todos: impl IntoIterator<Item = ToDo>) -> Self {
        let map: BTreeMap<i32, ToDo> = todos.into_iter().map(|todo| (todo.id, todo)).collect();
        let next_id = map.keys().next_back().map_or(1, |max| i64::from(*max) + 1);

        Self {
            todos: Arc::new(Mutex::new(map)),
            next_id: Arc::new(AtomicI64::new(next_id)),
        }
    }

    pub fn len(&self) -> usize {
        self.todos.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.lock().is_empty()
    }

    fn filtered(&self, predicate: impl Fn(&ToDo) -> bool) -> Vec<ToDo> {
        self.todos
            .lock()
            .values()
            .filter(|todo| predicate(todo))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ToDoRepository for InMemoryToDoRepository {
    async fn list_all(&self) -> Result<Vec<ToDo>> {
        Ok(self.todos.lock().values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<ToDo>> {
        Ok(self.todos.lock().get(&id).cloned())
    }

    async fn create(&self, todo: NewToDo) -> Result<ToDo> {
        let id = self
            .next_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |next| {
                (next <= i64::from(i32::MAX)).then_some(next + 1)
            })
            .ok()
            .and_then(|id| i32::try_from(id).ok())
            .ok_or_else(|| ToDoError::Internal("To-do ID space exhausted".to_string()))?;
        let created = ToDo::from_new(id, todo);

        self.todos.lock().insert(id, created.clone());
        tracing::debug!(id, "Created to-do in memory");
        Ok(created)
    }

    async fn update(&self, todo: &ToDo) -> Result<Option<ToDo>> {
        let mut todos = self.todos.lock();
        match todos.get_mut(&todo.id) {
            Some(existing) => {
                *existing = todo.clone();
                Ok(Some(existing.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        Ok(self.todos.lock().remove(&id).is_some())
    }

    async fn list_by_expiry_date(&self, date: NaiveDate) -> Result<Vec<ToDo>> {
        Ok(self.filtered(|todo| todo.is_due_on(date)))
    }

    async fn list_by_expiry_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<ToDo>> {
        Ok(self.filtered(|todo| todo.is_due_between(start, end)))
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
