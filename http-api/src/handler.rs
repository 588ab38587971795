//! To-do route logic
//!
//! One method per route. Each call performs at most one read and one write
//! against the record store; nothing is kept between calls.

use ::todo_core::error::Result;
use ::todo_core::{
    Clock, DueWindow, SystemClock, ToDo, ToDoError, ToDoPayload, ToDoRepository, ToDoValidator,
};
use std::sync::Arc;

/// Bridges HTTP routes with a ToDoRepository
pub struct ToDoHandler<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> Clone for ToDoHandler<R> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl<R> ToDoHandler<R> {
    /// Create a handler reading "today" from the system clock
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_clock(repository, Arc::new(SystemClock))
    }

    /// Create a handler with an explicit clock
    pub fn with_clock(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Get a clone of the repository Arc
    pub fn repository(&self) -> Arc<R> {
        self.repository.clone()
    }
}

impl<R: ToDoRepository> ToDoHandler<R> {
    pub async fn list_all(&self) -> Result<Vec<ToDo>> {
        self.repository.list_all().await
    }

    pub async fn get(&self, id: i32) -> Result<ToDo> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| ToDoError::not_found_id(id))
    }

    /// Records due inside `window`; an empty result is reported as not found
    pub async fn due(&self, window: DueWindow) -> Result<Vec<ToDo>> {
        let today = self.clock.today();

        let todos = match window.single_day(today) {
            Some(date) => self.repository.list_by_expiry_date(date).await?,
            None => {
                let (start, end) = window.bounds(today);
                self.repository.list_by_expiry_range(start, end).await?
            }
        };

        if todos.is_empty() {
            return Err(ToDoError::NotFound(format!("nothing due {window}")));
        }
        Ok(todos)
    }

    pub async fn create(&self, payload: ToDoPayload) -> Result<ToDo> {
        let new_todo = ToDoValidator::validate(payload)?;
        self.repository.create(new_todo).await
    }

    /// Full update. The body is validated before the record is looked up.
    pub async fn replace(&self, id: i32, payload: ToDoPayload) -> Result<ToDo> {
        let replacement = ToDoValidator::validate(payload)?;
        self.repository
            .replace(id, replacement)
            .await?
            .ok_or_else(|| ToDoError::not_found_id(id))
    }

    /// Force progress to 100 percent
    pub async fn complete(&self, id: i32) -> Result<ToDo> {
        self.modify(id, ToDo::complete).await
    }

    pub async fn mark_done(&self, id: i32) -> Result<ToDo> {
        self.modify(id, ToDo::mark_done).await
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(ToDoError::not_found_id(id))
        }
    }

    pub async fn health_check(&self) -> Result<()> {
        self.repository.health_check().await
    }

    async fn modify(&self, id: i32, change: fn(&mut ToDo)) -> Result<ToDo> {
        let mut todo = self.get(id).await?;
        change(&mut todo);

        // The record may have been deleted since it was read
        self.repository
            .update(&todo)
            .await?
            .ok_or_else(|| ToDoError::not_found_id(id))
    }
}
