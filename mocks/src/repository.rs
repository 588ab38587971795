//! Mock implementation of ToDoRepository trait
//!
//! Provides a thread-safe mock repository with:
//! - Error injection capabilities
//! - Call tracking for verification
//!
//! Storage itself is delegated to [`InMemoryToDoRepository`], so the mock
//! behaves exactly like the memory backend unless an error is injected.

use async_trait::async_trait;
use chrono::NaiveDate;
use database::InMemoryToDoRepository;
use parking_lot::Mutex;
use std::sync::Arc;
use todo_core::{NewToDo, Result, ToDo, ToDoError, ToDoRepository};

/// Mock implementation of ToDoRepository for testing
#[derive(Clone)]
pub struct MockToDoRepository {
    store: InMemoryToDoRepository,
    error_injection: Arc<Mutex<Option<ToDoError>>>,
    call_history: Arc<Mutex<Vec<String>>>,
}

impl Default for MockToDoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockToDoRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::from_store(InMemoryToDoRepository::new())
    }

    /// Create mock repository with pre-populated records
    pub fn with_todos(todos: Vec<ToDo>) -> Self {
        Self::from_store(InMemoryToDoRepository::with_todos(todos))
    }

    fn from_store(store: InMemoryToDoRepository) -> Self {
        Self {
            store,
            error_injection: Arc::new(Mutex::new(None)),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Inject error for next operation
    pub fn inject_error(&self, error: ToDoError) {
        *self.error_injection.lock() = Some(error);
    }

    /// Clear error injection
    pub fn clear_error(&self) {
        *self.error_injection.lock() = None;
    }

    /// Get history of called methods
    pub fn call_history(&self) -> Vec<String> {
        self.call_history.lock().clone()
    }

    /// Clear call history
    pub fn clear_history(&self) {
        self.call_history.lock().clear();
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Assert method was called
    pub fn assert_called(&self, method: &str) {
        let history = self.call_history.lock();
        assert!(
            history.iter().any(|call| call.contains(method)),
            "Method '{}' was not called. Call history: {:?}",
            method,
            *history
        );
    }

    /// Assert method was never called
    pub fn assert_not_called(&self, method: &str) {
        let history = self.call_history.lock();
        assert!(
            !history.iter().any(|call| call.starts_with(&format!("{method}("))),
            "Method '{}' was called. Call history: {:?}",
            method,
            *history
        );
    }

    /// Check if an error should be injected, consuming it if so
    fn check_error_injection(&self) -> Result<()> {
        let mut error_opt = self.error_injection.lock();
        if let Some(error) = error_opt.take() {
            return Err(error);
        }
        Ok(())
    }

    /// Record method call in history
    fn record_call(&self, method: &str) {
        self.call_history.lock().push(format!("{method}()"));
    }

    /// Record method call with parameters in history
    fn record_call_with_params(&self, method: &str, params: &str) {
        self.call_history.lock().push(format!("{method}({params})"));
    }
}

#[async_trait]
impl ToDoRepository for MockToDoRepository {
    async fn list_all(&self) -> Result<Vec<ToDo>> {
        self.record_call("list_all");
        self.check_error_injection()?;
        self.store.list_all().await
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<ToDo>> {
        self.record_call_with_params("get_by_id", &format!("id={id}"));
        self.check_error_injection()?;
        self.store.get_by_id(id).await
    }

    async fn create(&self, todo: NewToDo) -> Result<ToDo> {
        self.record_call_with_params("create", &format!("title={}", todo.title));
        self.check_error_injection()?;
        self.store.create(todo).await
    }

    async fn update(&self, todo: &ToDo) -> Result<Option<ToDo>> {
        self.record_call_with_params("update", &format!("id={}", todo.id));
        self.check_error_injection()?;
        self.store.update(todo).await
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        self.record_call_with_params("delete", &format!("id={id}"));
        self.check_error_injection()?;
        self.store.delete(id).await
    }

    async fn list_by_expiry_date(&self, date: NaiveDate) -> Result<Vec<ToDo>> {
        self.record_call_with_params("list_by_expiry_date", &format!("date={date}"));
        self.check_error_injection()?;
        self.store.list_by_expiry_date(date).await
    }

    async fn list_by_expiry_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<ToDo>> {
        self.record_call_with_params(
            "list_by_expiry_range",
            &format!("start={start}, end={end}"),
        );
        self.check_error_injection()?;
        self.store.list_by_expiry_range(start, end).await
    }

    async fn health_check(&self) -> Result<()> {
        self.record_call("health_check");
        self.check_error_injection()?;

        // Mock always reports healthy
        Ok(())
    }
}
