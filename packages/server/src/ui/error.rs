//! Mapping of use-case errors to HTTP responses.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    domain::ValueObjectError,
    infrastructure::dto::http::ErrorDto,
    usecase::{AuthError, ConversationUseCaseError, MessageUseCaseError, RegisterUserError},
};

pub const NOT_AUTHENTICATED: &str = "Authentication credentials were not provided.";
pub const INVALID_TOKEN: &str = "Invalid token.";
pub const PERMISSION_DENIED: &str = "You do not have permission to perform this action.";
pub const NOT_FOUND: &str = "Not found.";

/// Error response with a `{"detail": "..."}` body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, detail)
    }

    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail)
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, detail)
    }

    fn internal(error: &dyn std::error::Error) -> Self {
        tracing::error!(error = %error, "Unexpected repository failure");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorDto { detail: self.detail })).into_response()
    }
}

impl From<ValueObjectError> for ApiError {
    fn from(error: ValueObjectError) -> Self {
        Self::bad_request(error.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<RegisterUserError> for ApiError {
    fn from(error: RegisterUserError) -> Self {
        match error {
            RegisterUserError::UsernameTaken(name) => {
                Self::conflict(format!("A user with username '{name}' already exists."))
            }
            RegisterUserError::Repository(e) => Self::internal(&e),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidToken => Self::unauthorized(INVALID_TOKEN),
            AuthError::Repository(e) => Self::internal(&e),
        }
    }
}

impl From<ConversationUseCaseError> for ApiError {
    fn from(error: ConversationUseCaseError) -> Self {
        match error {
            ConversationUseCaseError::NotFound(_) => Self::not_found(NOT_FOUND),
            ConversationUseCaseError::PermissionDenied => Self::forbidden(PERMISSION_DENIED),
            ConversationUseCaseError::UnknownParticipant(id) => {
                Self::bad_request(format!("Invalid participant id '{id}': user does not exist."))
            }
            ConversationUseCaseError::Rule(e) => Self::bad_request(e.to_string()),
            ConversationUseCaseError::Repository(e) => Self::internal(&e),
        }
    }
}

impl From<MessageUseCaseError> for ApiError {
    fn from(error: MessageUseCaseError) -> Self {
        match error {
            MessageUseCaseError::NotFound(_) => Self::not_found(NOT_FOUND),
            MessageUseCaseError::PermissionDenied => Self::forbidden(PERMISSION_DENIED),
            MessageUseCaseError::ConversationNotFound(id) => Self::bad_request(format!(
                "Invalid conversation_id '{id}': conversation does not exist."
            )),
            MessageUseCaseError::Repository(e) => Self::internal(&e),
        }
    }
}
