//! Structured request logging middleware for the to-do routes
//!
//! Emits one event per request with timing and a truncated summary of the
//! JSON body. Bodies are buffered up to [`MAX_BODY_BYTES`]; larger ones are
//! answered with 413 before reaching a handler.

use axum::{
    body::Body,
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use serde_json::Value;
use std::time::Instant;

/// Maximum length for field values before truncation
const MAX_PARAM_LENGTH: usize = 30;

/// Truncation suffix for long values
const TRUNCATION_SUFFIX: &str = "...";

/// Path prefix of the logged routes
const LOGGED_PREFIX: &str = "/todoitems";

/// Largest request body accepted on the logged routes, same as axum's
/// default extractor limit
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Request logging middleware
///
/// Logs `/todoitems` requests as a single `info` event carrying method,
/// path, status, elapsed milliseconds and body fields such as
/// `title="Renew passport", completePercent="40"`.
pub async fn request_logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    if !path.starts_with(LOGGED_PREFIX) {
        return next.run(request).await;
    }

    if declared_length(&request).is_some_and(|length| length > MAX_BODY_BYTES) {
        let response = StatusCode::PAYLOAD_TOO_LARGE.into_response();
        log_completed(&method, &path, &response, start_time, "");
        return response;
    }

    let (parts, body) = request.into_parts();
    let body_bytes = match Limited::new(body, MAX_BODY_BYTES).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.is::<LengthLimitError>() => {
            let response = StatusCode::PAYLOAD_TOO_LARGE.into_response();
            log_completed(&method, &path, &response, start_time, "");
            return response;
        }
        Err(e) => {
            // Proceed without the body; the handler sees an empty request
            tracing::warn!(%method, path, error = %e, "Failed to read request body");
            let response = next.run(Request::from_parts(parts, Body::empty())).await;
            log_completed(&method, &path, &response, start_time, "");
            return response;
        }
    };

    let params_summary = if body_bytes.is_empty() {
        String::new()
    } else {
        match serde_json::from_slice::<Value>(&body_bytes) {
            Ok(json) => format_params_summary(&json),
            Err(_) => "invalid_json".to_string(),
        }
    };

    let response = next
        .run(Request::from_parts(parts, Body::from(body_bytes)))
        .await;
    log_completed(&method, &path, &response, start_time, &params_summary);

    response
}

fn declared_length(request: &Request<Body>) -> Option<usize> {
    request
        .headers()
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

fn log_completed(
    method: &axum::http::Method,
    path: &str,
    response: &Response,
    start_time: Instant,
    params: &str,
) {
    tracing::info!(
        %method,
        path,
        status = response.status().as_u16(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        params,
        "Handled request"
    );
}

/// Format body fields into a summary string with truncation
fn format_params_summary(params: &Value) -> String {
    match params {
        Value::Object(map) => {
            let formatted_params: Vec<String> = map
                .iter()
                .filter_map(|(key, value)| {
                    let formatted_value = format_parameter_value(value);
                    if formatted_value.is_empty() {
                        None
                    } else {
                        Some(format!("{key}=\"{formatted_value}\""))
                    }
                })
                .collect();

            formatted_params.join(", ")
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        _ => format_parameter_value(params),
    }
}

/// Format a single value with truncation
fn format_parameter_value(value: &Value) -> String {
    let value_str = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{...{} fields}}", obj.len()),
        Value::Null => "null".to_string(),
    };

    truncate_string(&value_str, MAX_PARAM_LENGTH)
}

/// Truncate to `max_length` characters, suffix included
fn truncate_string(input: &str, max_length: usize) -> String {
    if input.chars().count() <= max_length {
        input.to_string()
    } else {
        let kept = max_length.saturating_sub(TRUNCATION_SUFFIX.len());
        let prefix: String = input.chars().take(kept).collect();
        format!("{prefix}{TRUNCATION_SUFFIX}")
    }
}
