//! Domain factories for creating identifiers and tokens.

use uuid::Uuid;

use super::value_object::{AccessToken, ConversationId, MessageId, UserId};

/// Factory for generating UserId instances.
///
/// This factory encapsulates the logic for generating new user identifiers,
/// separating the generation concern from the validation logic in UserId.
pub struct UserIdFactory;

impl UserIdFactory {
    /// Generate a new UserId with a random UUID v4.
    pub fn generate() -> UserId {
        UserId::from_uuid(Uuid::new_v4())
    }
}

/// Factory for generating ConversationId instances.
pub struct ConversationIdFactory;

impl ConversationIdFactory {
    /// Generate a new ConversationId with a random UUID v4.
    pub fn generate() -> ConversationId {
        ConversationId::from_uuid(Uuid::new_v4())
    }
}

/// Factory for generating MessageId instances.
pub struct MessageIdFactory;

impl MessageIdFactory {
    /// Generate a new MessageId with a random UUID v4.
    pub fn generate() -> MessageId {
        MessageId::from_uuid(Uuid::new_v4())
    }
}

/// Factory for issuing opaque bearer tokens.
pub struct AccessTokenFactory;

impl AccessTokenFactory {
    /// Issue a new token made of two random UUID v4 values (244 random bits).
    pub fn issue() -> AccessToken {
        let raw = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        AccessToken::from_generated(raw)
    }
}
