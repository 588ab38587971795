use crate::common::{build_expiry_query, row_to_todo, sqlx_error_to_todo_error, TODO_COLUMNS};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};
use std::{str::FromStr, time::Duration};
use todo_core::{
    error::{Result, ToDoError},
    models::{NewToDo, ToDo},
    repository::ToDoRepository,
};

/// Default number of pooled connections for file databases
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default time to wait for a pooled connection
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// SQLite implementation of the ToDoRepository trait
///
/// Records live in the `todos` table created by the bundled migrations.
/// Every trait method is a single statement against the pool.
#[derive(Debug, Clone)]
pub struct SqliteToDoRepository {
    pool: SqlitePool,
}

/// True for URLs that name a private in-memory database
pub fn is_memory_url(database_url: &str) -> bool {
    matches!(
        database_url.trim(),
        ":memory:" | "sqlite::memory:" | "sqlite://:memory:"
    )
}

impl SqliteToDoRepository {
    /// Create a new SQLite repository with the given database URL
    ///
    /// # Arguments
    /// * `database_url` - `sqlite://path`, `sqlite:path`, a bare file path, or `:memory:`
    ///
    /// # Returns
    /// * `Ok(SqliteToDoRepository)` - Successfully connected repository
    /// * `Err(ToDoError::Database)` - If connection fails
    ///
    /// # Examples
    /// ```rust,no_run
    /// use database::SqliteToDoRepository;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// // In-memory database for testing
    /// let repo = SqliteToDoRepository::new(":memory:").await?;
    ///
    /// // File-based database
    /// let repo = SqliteToDoRepository::new("sqlite:///tmp/todos.db").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(database_url: &str) -> Result<Self> {
        Self::with_pool_options(database_url, DEFAULT_MAX_CONNECTIONS, DEFAULT_ACQUIRE_TIMEOUT).await
    }

    /// Create a repository with explicit pool sizing
    ///
    /// In-memory databases always use a single connection that is never
    /// recycled: each SQLite connection to `:memory:` opens its own empty
    /// database.
    pub async fn with_pool_options(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self> {
        let in_memory = is_memory_url(database_url);

        let connect_options = if in_memory {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(sqlx_error_to_todo_error)?
                .journal_mode(SqliteJournalMode::Memory)
        } else {
            let path = database_url
                .strip_prefix("sqlite://")
                .or_else(|| database_url.strip_prefix("sqlite:"))
                .unwrap_or(database_url);

            SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
        }
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true);

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options
            .acquire_timeout(acquire_timeout)
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, database_url, "Failed to open SQLite database");
                sqlx_error_to_todo_error(e)
            })?;

        tracing::debug!(database_url, in_memory, "SQLite pool ready");
        Ok(Self { pool })
    }

    /// Run database migrations
    ///
    /// Applies every pending migration under `migrations/sqlite`. Call once
    /// after creating the repository; already-applied migrations are skipped.
    ///
    /// # Returns
    /// * `Ok(())` - Migrations completed successfully
    /// * `Err(ToDoError::Database)` - If migration fails
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations/sqlite")
            .run(&self.pool)
            .await
            .map_err(|e| ToDoError::Database(format!("Migration failed: {e}")))?;

        tracing::info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get access to the underlying database pool for custom operations
    ///
    /// This method is primarily intended for testing scenarios where
    /// direct SQL execution is needed.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn fetch_many(&self, mut query_builder: sqlx::QueryBuilder<'_, sqlx::Sqlite>) -> Result<Vec<ToDo>> {
        let rows = query_builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(sqlx_error_to_todo_error)?;

        rows.iter().map(row_to_todo).collect()
    }
}

#[async_trait]
impl ToDoRepository for SqliteToDoRepository {
    async fn list_all(&self) -> Result<Vec<ToDo>> {
        let rows = sqlx::query(&format!("SELECT {TODO_COLUMNS} FROM todos ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(sqlx_error_to_todo_error)?;

        rows.iter().map(row_to_todo).collect()
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<ToDo>> {
        let result = sqlx::query(&format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(sqlx_error_to_todo_error)?;

        match result {
            Some(row) => Ok(Some(row_to_todo(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, todo: NewToDo) -> Result<ToDo> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO todos (title, description, expiry, complete_percent, is_done)
            VALUES (?, ?, ?, ?, ?)
            RETURNING {TODO_COLUMNS}
            "#
        ))
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.expiry)
        .bind(todo.complete_percent)
        .bind(todo.is_done)
        .fetch_one(&self.pool)
        .await
        .map_err(sqlx_error_to_todo_error)?;

        let created = row_to_todo(&row)?;
        tracing::debug!(id = created.id, "Created to-do");
        Ok(created)
    }

    async fn update(&self, todo: &ToDo) -> Result<Option<ToDo>> {
        let result = sqlx::query(&format!(
            r#"
            UPDATE todos
            SET title = ?, description = ?, expiry = ?, complete_percent = ?, is_done = ?
            WHERE id = ?
            RETURNING {TODO_COLUMNS}
            "#
        ))
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.expiry)
        .bind(todo.complete_percent)
        .bind(todo.is_done)
        .bind(todo.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(sqlx_error_to_todo_error)?;

        tracing::debug!(id = todo.id, found = result.is_some(), "Updated to-do");
        result.as_ref().map(row_to_todo).transpose()
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(sqlx_error_to_todo_error)?;

        let found = result.rows_affected() > 0;
        tracing::debug!(id, found, "Deleted to-do");
        Ok(found)
    }

    async fn list_by_expiry_date(&self, date: NaiveDate) -> Result<Vec<ToDo>> {
        self.fetch_many(build_expiry_query(date, date)).await
    }

    async fn list_by_expiry_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<ToDo>> {
        if start > end {
            return Ok(Vec::new());
        }
        self.fetch_many(build_expiry_query(start, end)).await
    }

    async fn health_check(&self) -> Result<()> {
        // Simple query to verify database connectivity
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(sqlx_error_to_todo_error)?;

        Ok(())
    }
}
