//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// The maximum number of characters of a request or response body to log at
/// the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// The request line, response status and a preview of each body are logged
/// at the `info` level. If a body is longer than [LOG_BODY_LENGTH_LIMIT]
/// characters, the full body and headers are logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read body of {} {}: {error}", parts.method, parts.uri);
            return StatusCode::BAD_REQUEST.into_response();
        }
    };
    let body_text = body_to_text(&bytes);

    tracing::info!(
        "Received request: {} {} body: {:?}",
        parts.method,
        parts.uri,
        preview(&body_text)
    );
    tracing::debug!("Request headers: {:#?}", parts.headers);
    if body_text.chars().count() > LOG_BODY_LENGTH_LIMIT {
        tracing::debug!("Full request body: {body_text:?}");
    }

    let response = next
        .run(Request::from_parts(parts, Body::from(bytes)))
        .await;

    let (parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    let body_text = body_to_text(&bytes);

    tracing::info!(
        "Sending response: {} body: {:?}",
        parts.status,
        preview(&body_text)
    );
    tracing::debug!("Response headers: {:#?}", parts.headers);
    if body_text.chars().count() > LOG_BODY_LENGTH_LIMIT {
        tracing::debug!("Full response body: {body_text:?}");
    }

    Response::from_parts(parts, Body::from(bytes))
}

/// Text for the logs only. Bodies are forwarded as the original bytes.
fn body_to_text(bytes: &Bytes) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// The first [LOG_BODY_LENGTH_LIMIT] characters of `text`, with "..." appended
/// if anything was cut off.
fn preview(text: &str) -> String {
    match text.char_indices().nth(LOG_BODY_LENGTH_LIMIT) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_owned(),
    }
}
