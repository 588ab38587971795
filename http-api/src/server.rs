//! HTTP server for the to-do routes
//!
//! Builds the axum router over a [`ToDoHandler`] and serves it.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};
use serde_json::Value;
use std::{future::Future, net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::{error::ApiError, handler::ToDoHandler, serialization::deserialize_todo_payload};
use ::todo_core::{Clock, DueWindow, ToDo, ToDoRepository};

/// Shared server state for route functions
pub struct ToDoServerState<R> {
    pub handler: ToDoHandler<R>,
}

type SharedState<R> = State<Arc<ToDoServerState<R>>>;

/// To-do HTTP server
pub struct ToDoServer<R> {
    handler: ToDoHandler<R>,
}

impl<R: ToDoRepository + 'static> ToDoServer<R> {
    /// Create a server using the system clock
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            handler: ToDoHandler::new(repository),
        }
    }

    /// Create a server whose due-window routes read "today" from `clock`
    pub fn with_clock(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            handler: ToDoHandler::with_clock(repository, clock),
        }
    }

    /// Bind `addr` and serve until the process is stopped
    pub async fn serve(self, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
        let socket_addr: SocketAddr = addr
            .parse()
            .map_err(|e| format!("Invalid address '{addr}': {e}"))?;

        let listener = TcpListener::bind(socket_addr).await?;
        self.serve_with_shutdown(listener, std::future::pending())
            .await?;

        Ok(())
    }

    /// Serve on an already-bound listener until `shutdown` resolves
    ///
    /// In-flight requests are allowed to finish after the signal.
    pub async fn serve_with_shutdown<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!("Starting to-do server on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }

    /// Create the router with all endpoints
    pub fn router(self) -> Router {
        let state = Arc::new(ToDoServerState {
            handler: self.handler,
        });

        Router::new()
            .route("/todoitems", get(list_handler::<R>).post(create_handler::<R>))
            .route("/todoitems/today", get(today_handler::<R>))
            .route("/todoitems/nextday", get(next_day_handler::<R>))
            .route("/todoitems/thisweek", get(this_week_handler::<R>))
            .route(
                "/todoitems/:id",
                get(get_handler::<R>)
                    .put(replace_handler::<R>)
                    .patch(complete_handler::<R>)
                    .delete(delete_handler::<R>),
            )
            .route("/todoitems/:id/done", patch(done_handler::<R>))
            .route("/health", get(health_handler::<R>))
            .layer(middleware::from_fn(
                crate::request_logger::request_logging_middleware,
            ))
            .with_state(state)
    }
}

async fn list_handler<R: ToDoRepository>(
    State(state): SharedState<R>,
) -> Result<Json<Vec<ToDo>>, ApiError> {
    Ok(Json(state.handler.list_all().await?))
}

async fn get_handler<R: ToDoRepository>(
    State(state): SharedState<R>,
    Path(id): Path<i32>,
) -> Result<Json<ToDo>, ApiError> {
    Ok(Json(state.handler.get(id).await?))
}

async fn due_response<R: ToDoRepository>(
    state: &ToDoServerState<R>,
    window: DueWindow,
) -> Result<Json<Vec<ToDo>>, ApiError> {
    Ok(Json(state.handler.due(window).await?))
}

async fn today_handler<R: ToDoRepository>(
    State(state): SharedState<R>,
) -> Result<Json<Vec<ToDo>>, ApiError> {
    due_response(&state, DueWindow::Today).await
}

async fn next_day_handler<R: ToDoRepository>(
    State(state): SharedState<R>,
) -> Result<Json<Vec<ToDo>>, ApiError> {
    due_response(&state, DueWindow::NextDay).await
}

async fn this_week_handler<R: ToDoRepository>(
    State(state): SharedState<R>,
) -> Result<Json<Vec<ToDo>>, ApiError> {
    due_response(&state, DueWindow::ThisWeek).await
}

async fn create_handler<R: ToDoRepository>(
    State(state): SharedState<R>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let payload = deserialize_todo_payload(body)?;

    let todo = state.handler.create(payload).await?;
    let location = format!("/todoitems/{}", todo.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(todo)))
}

async fn replace_handler<R: ToDoRepository>(
    State(state): SharedState<R>,
    Path(id): Path<i32>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(body) = body?;
    let payload = deserialize_todo_payload(body)?;

    state.handler.replace(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn complete_handler<R: ToDoRepository>(
    State(state): SharedState<R>,
    Path(id): Path<i32>,
) -> Result<Json<ToDo>, ApiError> {
    Ok(Json(state.handler.complete(id).await?))
}

async fn done_handler<R: ToDoRepository>(
    State(state): SharedState<R>,
    Path(id): Path<i32>,
) -> Result<Json<ToDo>, ApiError> {
    Ok(Json(state.handler.mark_done(id).await?))
}

async fn delete_handler<R: ToDoRepository>(
    State(state): SharedState<R>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.handler.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn health_handler<R: ToDoRepository>(
    State(state): SharedState<R>,
) -> Result<&'static str, ApiError> {
    state.handler.health_check().await?;
    Ok("OK")
}
