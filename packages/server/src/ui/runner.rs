//! Server wiring and the accept loop.

use std::sync::Arc;

use axum::Router;

use crate::{
    config::ServerConfig,
    domain::Clock,
    infrastructure::{
        repository::{
            InMemoryConversationRepository, InMemoryMessageRepository, InMemoryUserRepository,
        },
        request_log::RequestLogFile,
    },
};

use super::{router::create_router, signal::shutdown_signal, state::AppState};

/// Wire the in-memory repositories, the request log and the access gate
/// into a ready-to-serve router.
pub fn build_app(config: &ServerConfig, clock: Arc<dyn Clock>) -> Router {
    let state = Arc::new(AppState {
        user_repository: Arc::new(InMemoryUserRepository::new()),
        conversation_repository: Arc::new(InMemoryConversationRepository::new()),
        message_repository: Arc::new(InMemoryMessageRepository::new()),
        clock,
        access_gate: config.access_gate.clone(),
        request_log: Arc::new(RequestLogFile::new(config.request_log_path.clone())),
    });
    create_router(state)
}

/// Run the server until a shutdown signal arrives.
pub async fn run(
    config: ServerConfig,
    clock: Arc<dyn Clock>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_app(&config, clock);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Listening on {}", listener.local_addr()?);
    tracing::info!("Request log: {}", config.request_log_path.display());
    match &config.access_gate {
        Some(gate) => tracing::info!(
            start = %gate.window.start().format("%H:%M"),
            end = %gate.window.end().format("%H:%M"),
            "Time-window access gate enabled"
        ),
        None => tracing::warn!("Time-window access gate disabled"),
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
