//! Repository traits owned by the domain layer.
//!
//! Use cases depend on these traits, never on a concrete storage
//! implementation (dependency inversion).

use async_trait::async_trait;

use super::{
    entity::{Conversation, Message, User},
    error::RepositoryError,
    value_object::{AccessToken, ConversationId, MessageId, UserId},
};

/// Storage of users and their bearer tokens
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user together with its first token.
    ///
    /// Returns `RepositoryError::UsernameTaken` if the username is in use.
    async fn insert(&self, user: User, token: AccessToken) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    async fn find_by_token(&self, token: &AccessToken) -> Result<Option<User>, RepositoryError>;

    /// Look up several users at once; unknown ids are skipped.
    /// The result follows the order of `ids`.
    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, RepositoryError>;

    /// Replace the user's token. The previous token stops resolving.
    async fn replace_token(&self, id: &UserId, token: AccessToken)
    -> Result<(), RepositoryError>;
}

/// Storage of conversations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Insert or replace a conversation
    async fn save(&self, conversation: Conversation) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &ConversationId)
    -> Result<Option<Conversation>, RepositoryError>;

    /// Conversations the user participates in, oldest first
    async fn list_for_participant(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Conversation>, RepositoryError>;

    async fn delete(&self, id: &ConversationId) -> Result<(), RepositoryError>;
}

/// Storage of messages, kept in send order
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Insert a new message or replace an existing one in place
    async fn save(&self, message: Message) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &MessageId) -> Result<Option<Message>, RepositoryError>;

    async fn list_by_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<Message>, RepositoryError>;

    /// Messages of any of the given conversations, in send order
    async fn list_by_conversations(
        &self,
        conversation_ids: &[ConversationId],
    ) -> Result<Vec<Message>, RepositoryError>;

    async fn delete(&self, id: &MessageId) -> Result<(), RepositoryError>;

    /// Remove every message of a conversation, returning how many were removed
    async fn delete_by_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<usize, RepositoryError>;
}
