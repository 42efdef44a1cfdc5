//! Route table and middleware stack.

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        create_conversation, create_message, current_user, delete_conversation, delete_message,
        get_conversation, get_message, health_check, list_conversation_messages,
        list_conversations, list_messages, not_found, refresh_token, register_user,
        update_conversation, update_message,
    },
    middleware::{authenticate, log_request, restrict_by_time},
    state::AppState,
};

/// Build the HTTP router.
///
/// Layers run outermost first: trace → authenticate → log_request →
/// restrict_by_time → handler. The fallback sits inside the stack, so unknown
/// paths are logged and gated like any other request.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/users", post(register_user))
        .route("/api/users/me", get(current_user))
        .route("/api/token/refresh/", post(refresh_token))
        .route(
            "/api/conversations",
            get(list_conversations).post(create_conversation),
        )
        .route(
            "/api/conversations/{conversation_id}",
            get(get_conversation)
                .put(update_conversation)
                .patch(update_conversation)
                .delete(delete_conversation),
        )
        .route(
            "/api/conversations/{conversation_id}/messages",
            get(list_conversation_messages),
        )
        .route("/api/messages", get(list_messages).post(create_message))
        .route(
            "/api/messages/{message_id}",
            get(get_message)
                .put(update_message)
                .patch(update_message)
                .delete(delete_message),
        )
        .fallback(not_found)
        .layer(from_fn_with_state(state.clone(), restrict_by_time))
        .layer(from_fn_with_state(state.clone(), log_request))
        .layer(from_fn_with_state(state.clone(), authenticate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
