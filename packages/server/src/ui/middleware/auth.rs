//! Resolves the caller's identity from `Authorization: Bearer <token>`.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

use crate::{
    domain::AccessToken,
    ui::{extractor::Identity, state::AppState},
    usecase::{AuthError, AuthenticateUseCase},
};

/// Store the resolved [`Identity`] in the request extensions.
///
/// Never rejects by itself; handlers that need a user use the
/// `CurrentUser` extractor.
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let identity = resolve_identity(&state, req.headers()).await;
    req.extensions_mut().insert(identity);
    next.run(req).await
}

async fn resolve_identity(state: &AppState, headers: &HeaderMap) -> Identity {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Identity::Anonymous;
    };
    let Some(raw) = value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
    else {
        tracing::debug!("Malformed Authorization header");
        return Identity::InvalidToken;
    };
    let Ok(token) = AccessToken::new(raw.to_string()) else {
        return Identity::InvalidToken;
    };

    match AuthenticateUseCase::new(state.user_repository.clone())
        .execute(&token)
        .await
    {
        Ok(user) => Identity::Authenticated(user),
        Err(AuthError::InvalidToken) => Identity::InvalidToken,
        Err(e) => {
            tracing::error!(error = %e, "Failed to resolve access token");
            Identity::InvalidToken
        }
    }
}
