//! To-do Server Library
//!
//! Configuration loading, logging setup and store bootstrap for the
//! `todo-server` binary.

pub mod config;
pub mod setup;
pub mod telemetry;

pub use config::{Backend, Config};
pub use setup::{
    create_memory_repository, create_repository, ensure_database_directory, initialize_app,
    AppServer,
};
pub use telemetry::init_telemetry;
