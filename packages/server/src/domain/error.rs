//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// UserId validation error
    #[error("UserId cannot be empty")]
    UserIdEmpty,

    /// UserId invalid format error (not a valid UUID format)
    #[error("UserId must be a valid UUID format (got: {0})")]
    UserIdInvalidFormat(String),

    /// ConversationId validation error
    #[error("ConversationId cannot be empty")]
    ConversationIdEmpty,

    /// ConversationId invalid format error (not a valid UUID format)
    #[error("ConversationId must be a valid UUID format (got: {0})")]
    ConversationIdInvalidFormat(String),

    /// MessageId validation error
    #[error("MessageId cannot be empty")]
    MessageIdEmpty,

    /// MessageId invalid format error (not a valid UUID format)
    #[error("MessageId must be a valid UUID format (got: {0})")]
    MessageIdInvalidFormat(String),

    #[error("Username cannot be empty")]
    UsernameEmpty,

    #[error("Username cannot exceed {max} characters (got {actual})")]
    UsernameTooLong { max: usize, actual: usize },

    #[error("Email cannot be empty")]
    EmailEmpty,

    #[error("Email cannot exceed {max} characters (got {actual})")]
    EmailTooLong { max: usize, actual: usize },

    #[error("Email must look like 'name@domain' (got: {0})")]
    EmailInvalidFormat(String),

    /// First/last name too long error
    #[error("Name cannot exceed {max} characters (got {actual})")]
    NameTooLong { max: usize, actual: usize },

    /// MessageBody validation error
    #[error("MessageBody cannot be empty")]
    MessageBodyEmpty,

    /// MessageBody too long error
    #[error("MessageBody cannot exceed {max} characters (got {actual})")]
    MessageBodyTooLong { max: usize, actual: usize },

    #[error("AccessToken cannot be empty")]
    AccessTokenEmpty,
}

/// Errors related to Conversation domain rules
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversationError {
    /// A conversation must keep at least one participant
    #[error("Conversation must have at least one participant")]
    NoParticipants,
}

/// Errors returned by repository implementations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error("Conversation '{0}' not found")]
    ConversationNotFound(String),

    #[error("Message '{0}' not found")]
    MessageNotFound(String),
}
