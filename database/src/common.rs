use chrono::{NaiveDate, NaiveDateTime};
use sqlx::{sqlite::SqliteRow, Row};
use todo_core::{
    error::{Result, ToDoError},
    models::ToDo,
};

/// Column list shared by every query that returns whole records
pub const TODO_COLUMNS: &str = "id, title, description, expiry, complete_percent, is_done";

/// Convert SQLite row to ToDo model
pub fn row_to_todo(row: &SqliteRow) -> Result<ToDo> {
    let expiry: NaiveDateTime = row
        .try_get("expiry")
        .map_err(|e| ToDoError::Database(format!("Invalid expiry in database: {e}")))?;

    Ok(ToDo {
        id: row.try_get("id").map_err(sqlx_error_to_todo_error)?,
        title: row.try_get("title").map_err(sqlx_error_to_todo_error)?,
        description: row.try_get("description").map_err(sqlx_error_to_todo_error)?,
        expiry,
        complete_percent: row
            .try_get("complete_percent")
            .map_err(sqlx_error_to_todo_error)?,
        is_done: row.try_get("is_done").map_err(sqlx_error_to_todo_error)?,
    })
}

/// Convert SQLx error to ToDoError
pub fn sqlx_error_to_todo_error(err: sqlx::Error) -> ToDoError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let message = db_err.message();

            // SQLITE_CONSTRAINT_CHECK
            if db_err.code().as_deref() == Some("275") || message.contains("CHECK constraint failed")
            {
                ToDoError::Database(format!("Constraint violation: {message}"))
            } else {
                ToDoError::Database(format!("Database error: {message}"))
            }
        }
        sqlx::Error::RowNotFound => {
            // Absence is handled with fetch_optional; reaching this is a bug
            ToDoError::Database("Unexpected RowNotFound error".to_string())
        }
        sqlx::Error::PoolTimedOut => ToDoError::Database("Connection pool timeout".to_string()),
        sqlx::Error::Io(io_err) => ToDoError::Database(format!("Database I/O error: {io_err}")),
        _ => ToDoError::Database(format!("Database operation failed: {err}")),
    }
}

/// Build a query selecting records by the date portion of `expiry`.
///
/// A one-day range compiles to an equality test, anything wider to an
/// inclusive `BETWEEN`.
pub fn build_expiry_query(start: NaiveDate, end: NaiveDate) -> sqlx::QueryBuilder<'static, sqlx::Sqlite> {
    let mut query_builder: sqlx::QueryBuilder<sqlx::Sqlite> =
        sqlx::QueryBuilder::new(format!("SELECT {TODO_COLUMNS} FROM todos WHERE "));

    if start == end {
        query_builder.push("date(expiry) = ");
        query_builder.push_bind(start);
    } else {
        query_builder.push("date(expiry) BETWEEN ");
        query_builder.push_bind(start);
        query_builder.push(" AND ");
        query_builder.push_bind(end);
    }

    query_builder.push(" ORDER BY id");
    query_builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Execute;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn test_single_day_query_uses_equality() {
        let mut builder = build_expiry_query(date(16), date(16));
        let query = builder.build();
        assert_eq!(
            query.sql(),
            "SELECT id, title, description, expiry, complete_percent, is_done FROM todos WHERE date(expiry) = ? ORDER BY id"
        );
    }

    #[test]
    fn test_range_query_uses_between() {
        let mut builder = build_expiry_query(date(11), date(17));
        let query = builder.build();
        assert!(query.sql().contains("date(expiry) BETWEEN ? AND ?"));
        assert!(query.sql().ends_with("ORDER BY id"));
    }

    #[test]
    fn test_row_not_found_maps_to_database_error() {
        let error = sqlx_error_to_todo_error(sqlx::Error::RowNotFound);
        assert!(error.is_database());
    }
}
