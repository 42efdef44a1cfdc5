//! Request identity, the extractor for authenticated handlers, and body /
//! query extractors whose rejections use the API error format.

use axum::{
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
};

use crate::domain::User;

use super::error::{ApiError, INVALID_TOKEN, NOT_AUTHENTICATED};

/// Name written to the request log for unauthenticated requests
pub const ANONYMOUS: &str = "Anonymous";

/// Who sent the request. Resolved once by the `authenticate` middleware and
/// stored in the request extensions.
#[derive(Debug, Clone, Default)]
pub enum Identity {
    /// No `Authorization` header
    #[default]
    Anonymous,
    Authenticated(User),
    /// A bearer token was sent but does not resolve to a user
    InvalidToken,
}

impl Identity {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Username of an authenticated user, `Anonymous` otherwise
    pub fn display_name(&self) -> &str {
        match self {
            Self::Authenticated(user) => user.username.as_str(),
            Self::Anonymous | Self::InvalidToken => ANONYMOUS,
        }
    }
}

/// Extractor for handlers that require an authenticated user
///
/// Usage:
/// ```ignore
/// async fn handler(CurrentUser(user): CurrentUser) -> ... { }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Identity>() {
            Some(Identity::Authenticated(user)) => Ok(Self(user.clone())),
            Some(Identity::InvalidToken) => Err(ApiError::unauthorized(INVALID_TOKEN)),
            Some(Identity::Anonymous) | None => Err(ApiError::unauthorized(NOT_AUTHENTICATED)),
        }
    }
}

/// `Json` whose rejection is a `{"detail"}` body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `Query` whose rejection is a `{"detail"}` body
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
