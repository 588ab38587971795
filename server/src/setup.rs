use anyhow::{Context, Result};
use database::{is_memory_url, InMemoryToDoRepository, SqliteToDoRepository};
use http_api::ToDoServer;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::{Backend, Config};

/// The HTTP server over whichever store the configuration selected
pub enum AppServer {
    Sqlite(ToDoServer<SqliteToDoRepository>),
    Memory(ToDoServer<InMemoryToDoRepository>),
}

impl AppServer {
    pub fn backend(&self) -> Backend {
        match self {
            AppServer::Sqlite(_) => Backend::Sqlite,
            AppServer::Memory(_) => Backend::Memory,
        }
    }

    /// Serve on `listener` until `shutdown` resolves
    pub async fn serve_with_shutdown<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        match self {
            AppServer::Sqlite(server) => server.serve_with_shutdown(listener, shutdown).await,
            AppServer::Memory(server) => server.serve_with_shutdown(listener, shutdown).await,
        }
    }
}

/// Open the SQLite store named by the configuration and bring its schema up to date
pub async fn create_repository(config: &Config) -> Result<Arc<SqliteToDoRepository>> {
    let database_url = config.database_url();
    info!("Initializing SQLite repository at: {}", database_url);

    let repo = SqliteToDoRepository::with_pool_options(
        &database_url,
        config.database.max_connections,
        config.connection_timeout(),
    )
    .await
    .context("Failed to create SQLite repository")?;

    info!("Running database migrations");
    repo.migrate()
        .await
        .context("Failed to run database migrations")?;

    Ok(Arc::new(repo))
}

pub fn create_memory_repository() -> Arc<InMemoryToDoRepository> {
    info!("Using in-memory repository; records are lost on exit");
    Arc::new(InMemoryToDoRepository::new())
}

/// Initialize the complete application
pub async fn initialize_app(config: &Config) -> Result<AppServer> {
    let server = match config.database.backend {
        Backend::Sqlite => {
            ensure_database_directory(&config.database_url())
                .context("Failed to create database directory")?;
            let repository = create_repository(config)
                .await
                .context("Failed to create repository")?;
            AppServer::Sqlite(ToDoServer::new(repository))
        }
        Backend::Memory => AppServer::Memory(ToDoServer::new(create_memory_repository())),
    };

    info!(backend = %server.backend(), "Application initialized successfully");
    Ok(server)
}

/// Ensure the database directory exists with owner-only permissions
pub fn ensure_database_directory(database_url: &str) -> Result<()> {
    if is_memory_url(database_url) {
        return Ok(());
    }

    let Some(db_path) = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };

    let db_path = Path::new(db_path);
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating database directory: {}", parent.display());
            std::fs::create_dir_all(parent).context("Failed to create database directory")?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let permissions = std::fs::Permissions::from_mode(0o700);
                std::fs::set_permissions(parent, permissions)
                    .context("Failed to set directory permissions")?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use database::ToDoRepository;
    use tempfile::TempDir;

    fn config_with_url(url: String) -> Config {
        let mut config = Config::default();
        config.database.url = Some(url);
        config
    }

    #[tokio::test]
    async fn test_create_repository_runs_migrations() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("todo.sqlite");
        let config = config_with_url(format!("sqlite://{}", db_path.display()));

        let repo = create_repository(&config).await.unwrap();
        assert!(repo.list_all().await.unwrap().is_empty());
        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_create_repository_invalid_url() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("no").join("such").join("dir").join("todo.sqlite");
        let config = config_with_url(format!("sqlite://{}", missing.display()));

        // Parent directories are only created by ensure_database_directory
        assert!(create_repository(&config).await.is_err());
    }

    #[test]
    fn test_ensure_database_directory() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("subdir").join("todo.sqlite");
        let database_url = format!("sqlite://{}", db_path.display());

        ensure_database_directory(&database_url).unwrap();
        let parent = db_path.parent().unwrap();
        assert!(parent.exists());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(parent).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o700);
        }
    }

    #[test]
    fn test_ensure_database_directory_ignores_memory_and_bare_names() {
        assert!(ensure_database_directory("sqlite::memory:").is_ok());
        assert!(ensure_database_directory("sqlite://todo.sqlite").is_ok());
    }

    #[tokio::test]
    async fn test_initialize_app_selects_backend() {
        let mut config = Config::default();
        config.database.backend = Backend::Memory;
        let server = initialize_app(&config).await.unwrap();
        assert_eq!(server.backend(), Backend::Memory);

        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("todo.sqlite");
        let config = config_with_url(format!("sqlite://{}", db_path.display()));
        let server = initialize_app(&config).await.unwrap();
        assert_eq!(server.backend(), Backend::Sqlite);
        assert!(db_path.parent().unwrap().exists());
    }
}
