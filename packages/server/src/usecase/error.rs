//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{ConversationError, RepositoryError};

/// ユーザー登録のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegisterUserError {
    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 認証・トークン更新のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Token is unknown or has been rotated away
    #[error("Invalid token")]
    InvalidToken,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 会話操作のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversationUseCaseError {
    #[error("Conversation '{0}' not found")]
    NotFound(String),

    /// Caller is not a participant of the conversation
    #[error("Not a participant of the conversation")]
    PermissionDenied,

    #[error("User '{0}' does not exist")]
    UnknownParticipant(String),

    #[error(transparent)]
    Rule(#[from] ConversationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// メッセージ操作のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessageUseCaseError {
    #[error("Message '{0}' not found")]
    NotFound(String),

    /// Caller is not a participant of the message's conversation
    #[error("Not a participant of the conversation")]
    PermissionDenied,

    /// Referenced conversation does not exist (on create)
    #[error("Conversation '{0}' does not exist")]
    ConversationNotFound(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
