//! To-Do Core Library
//!
//! This crate provides the domain model, validation rules and trait
//! interfaces for the to-do service. All other crates depend on the types
//! and interfaces defined here.
//!
//! # Architecture
//!
//! - [`models`] - The `ToDo` record, validated input and raw request payload
//! - [`error`] - Error taxonomy and result handling
//! - [`repository`] - Record store trait
//! - [`validation`] - Field constraints applied before every write
//! - [`schedule`] - Clock abstraction and due-date windows
//!
//! # Example
//!
//! ```rust
//! use todo_core::{ToDoPayload, ToDoValidator};
//!
//! let payload = ToDoPayload {
//!     title: Some("Renew passport".to_string()),
//!     expiry: Some("2026-10-16T12:00:00".to_string()),
//!     ..Default::default()
//! };
//!
//! // Validate the input before handing it to a store
//! let new_todo = ToDoValidator::validate(payload).unwrap();
//! assert_eq!(new_todo.complete_percent, 0.0);
//! ```

pub mod error;
pub mod models;
pub mod repository;
pub mod schedule;
pub mod validation;

// Re-export commonly used types at the crate root for convenience
pub use error::{FieldError, Result, ToDoError};
pub use models::{NewToDo, ToDo, ToDoPayload};
pub use repository::ToDoRepository;
pub use schedule::{Clock, DueWindow, FixedClock, SystemClock};
pub use validation::ToDoValidator;

/// Current version of the core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Current crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
