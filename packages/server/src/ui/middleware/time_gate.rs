//! Blocks gated paths during the restricted time window.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{domain::AccessDecision, ui::state::AppState};

/// Respond `403 Forbidden` with a plain-text explanation when the current
/// time of day is restricted and the path is gated; otherwise forward.
pub async fn restrict_by_time(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let Some(gate) = &state.access_gate else {
        return next.run(req).await;
    };

    let now = state.clock.time_of_day();
    match gate.check(now, req.uri().path()) {
        AccessDecision::Allow => next.run(req).await,
        AccessDecision::Deny(message) => {
            tracing::info!(
                path = %req.uri().path(),
                time = %now.format("%H:%M:%S"),
                "Request blocked by time window"
            );
            (StatusCode::FORBIDDEN, message).into_response()
        }
    }
}
