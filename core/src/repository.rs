use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    error::Result,
    models::{NewToDo, ToDo},
};

/// Repository trait for to-do persistence and retrieval operations
///
/// This trait defines the interface for all record store operations.
/// Implementations must be thread-safe and support concurrent access;
/// each call is an independent single-record statement.
#[async_trait]
pub trait ToDoRepository: Send + Sync {
    /// List every record, ordered by ID
    ///
    /// # Returns
    /// * `Ok(Vec<ToDo>)` - All records (may be empty)
    /// * `Err(ToDoError::Database)` - If the store operation fails
    async fn list_all(&self) -> Result<Vec<ToDo>>;

    /// Get a record by its ID
    ///
    /// # Returns
    /// * `Ok(Some(ToDo))` - The record if found
    /// * `Ok(None)` - If no record exists with that ID
    /// * `Err(ToDoError::Database)` - If the store operation fails
    async fn get_by_id(&self, id: i32) -> Result<Option<ToDo>>;

    /// Create a new record
    ///
    /// # Arguments
    /// * `todo` - Validated input; the store assigns the ID
    ///
    /// # Returns
    /// * `Ok(ToDo)` - The created record with its assigned ID
    /// * `Err(ToDoError::Database)` - If the store operation fails
    async fn create(&self, todo: NewToDo) -> Result<ToDo>;

    /// Write every mutable field of an already-fetched record
    ///
    /// This is the explicit update call of a read-modify-write sequence.
    ///
    /// # Returns
    /// * `Ok(Some(ToDo))` - The record as stored
    /// * `Ok(None)` - If the ID no longer exists
    /// * `Err(ToDoError::Database)` - If the store operation fails
    async fn update(&self, todo: &ToDo) -> Result<Option<ToDo>>;

    /// Delete a record
    ///
    /// # Returns
    /// * `Ok(true)` - The record existed and was removed
    /// * `Ok(false)` - No record with that ID
    /// * `Err(ToDoError::Database)` - If the store operation fails
    async fn delete(&self, id: i32) -> Result<bool>;

    /// List records whose expiry falls on `date`, time of day ignored
    async fn list_by_expiry_date(&self, date: NaiveDate) -> Result<Vec<ToDo>>;

    /// List records whose expiry date lies in `start..=end`
    ///
    /// An inverted range yields an empty list.
    async fn list_by_expiry_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<ToDo>>;

    /// Check that the store is reachable
    ///
    /// # Returns
    /// * `Ok(())` - Store is healthy and connected
    /// * `Err(ToDoError::Database)` - Store is unhealthy
    async fn health_check(&self) -> Result<()>;

    /// Replace title, description, expiry and progress of a record
    ///
    /// The done flag is preserved. Never creates a record.
    ///
    /// # Returns
    /// * `Ok(Some(ToDo))` - The replaced record
    /// * `Ok(None)` - If no record exists with that ID
    async fn replace(&self, id: i32, replacement: NewToDo) -> Result<Option<ToDo>> {
        let Some(mut todo) = self.get_by_id(id).await? else {
            return Ok(None);
        };
        todo.apply_replacement(replacement);
        self.update(&todo).await
    }
}
