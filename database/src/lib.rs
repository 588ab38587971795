//! Database crate for the to-do service
//!
//! This crate provides the record stores behind the `ToDoRepository` trait:
//! a SQLite implementation for durable storage and an in-memory one for
//! ephemeral runs and tests.
//!
//! # Features
//!
//! - SQLite database support with WAL mode for file databases
//! - Embedded migrations creating the `todos` table
//! - Connection pooling, with a pinned single connection for `:memory:`
//! - Error mapping into `ToDoError::Database`
//!
//! # Usage
//!
//! ```rust
//! use database::SqliteToDoRepository;
//! use todo_core::repository::ToDoRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create repository (in-memory for testing)
//!     let repo = SqliteToDoRepository::new(":memory:").await?;
//!
//!     // Run migrations
//!     repo.migrate().await?;
//!
//!     repo.health_check().await?;
//!     assert!(repo.list_all().await?.is_empty());
//!
//!     Ok(())
//! }
//! ```

mod common;
mod memory;
mod sqlite;

pub use memory::InMemoryToDoRepository;
pub use sqlite::{is_memory_url, SqliteToDoRepository, DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_MAX_CONNECTIONS};

// Re-export commonly used types from todo-core for convenience
pub use todo_core::{
    error::{Result, ToDoError},
    models::{NewToDo, ToDo},
    repository::ToDoRepository,
};
