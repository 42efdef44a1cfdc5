//! Appends one line per request to the request log file.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use chrono::NaiveDateTime;
use kaiwa_shared::time::LOG_TIMESTAMP_FORMAT;

use crate::ui::{
    extractor::{ANONYMOUS, Identity},
    state::AppState,
};

/// Format a request log line:
/// `<timestamp> - User: <user> - Path: <path> - Method: <method>`
pub fn format_log_entry(timestamp: NaiveDateTime, user: &str, path: &str, method: &Method) -> String {
    format!(
        "{} - User: {} - Path: {} - Method: {}",
        timestamp.format(LOG_TIMESTAMP_FORMAT),
        user,
        path,
        method
    )
}

/// Write the log line, then forward the request unchanged.
///
/// A failed write is reported through tracing; the request is still served.
pub async fn log_request(State(state): State<Arc<AppState>>, req: Request, next: Next) -> Response {
    let entry = {
        let identity = req.extensions().get::<Identity>();
        let user = identity.map_or(ANONYMOUS, Identity::display_name);
        tracing::debug!(
            authenticated = identity.is_some_and(Identity::is_authenticated),
            path = %req.uri().path(),
            "Logging request"
        );
        format_log_entry(state.clock.now(), user, req.uri().path(), req.method())
    };

    if let Err(e) = state.request_log.append(&entry).await {
        tracing::warn!(
            file = %state.request_log.path().display(),
            error = %e,
            "Failed to write request log"
        );
    }

    next.run(req).await
}
