//! To-do HTTP API
//!
//! This crate maps the `/todoitems` REST routes onto a
//! [`ToDoRepository`](todo_core::ToDoRepository).
//!
//! # Overview
//!
//! - Route table and axum router ([`ToDoServer`])
//! - Route logic over a record store ([`ToDoHandler`])
//! - Error mapping from core errors to status codes and problem bodies
//! - Case-insensitive request body decoding
//! - Request logging middleware
//!
//! # Usage
//!
//! ```no_run
//! use database::InMemoryToDoRepository;
//! use http_api::ToDoServer;
//! use std::sync::Arc;
//!
//! async fn start_server() -> Result<(), Box<dyn std::error::Error>> {
//!     let repository = Arc::new(InMemoryToDoRepository::new());
//!     let server = ToDoServer::new(repository);
//!     server.serve("127.0.0.1:5000").await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod handler;
pub mod request_logger;
pub mod serialization;
pub mod server;

// Re-export key types for easier usage
pub use error::ApiError;
pub use handler::ToDoHandler;
pub use serialization::{deserialize_todo_payload, fold_keys};
pub use server::{ToDoServer, ToDoServerState};

// Re-export core types for external consumers
pub use todo_core::{Clock, DueWindow, FixedClock, SystemClock, ToDo, ToDoPayload, ToDoRepository};
