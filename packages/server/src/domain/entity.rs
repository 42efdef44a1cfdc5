//! Core domain models for the messaging server.

use serde::{Deserialize, Serialize};

use super::{
    error::ConversationError,
    value_object::{
        ConversationId, Email, MessageBody, MessageId, PersonName, Timestamp, UserId, Username,
    },
};

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier
    pub id: UserId,
    /// Unique login name
    pub username: Username,
    pub email: Email,
    pub first_name: PersonName,
    pub last_name: PersonName,
    /// Timestamp when the user registered
    pub created_at: Timestamp,
}

impl User {
    /// Create a new user
    pub fn new(
        id: UserId,
        username: Username,
        email: Email,
        first_name: PersonName,
        last_name: PersonName,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            username,
            email,
            first_name,
            last_name,
            created_at,
        }
    }

    /// Case-insensitive substring match over e-mail, first name and last name.
    ///
    /// `needle` is expected to be lowercased by the caller.
    pub fn matches_search(&self, needle: &str) -> bool {
        [
            self.email.as_str(),
            self.first_name.as_str(),
            self.last_name.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

/// A conversation between a set of participants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Conversation identifier
    pub id: ConversationId,
    /// Participants, in the order they were added (no duplicates)
    pub participants: Vec<UserId>,
    /// Timestamp when the conversation was created
    pub created_at: Timestamp,
}

impl Conversation {
    /// Start a conversation. The creator is always the first participant.
    pub fn start(
        id: ConversationId,
        creator: UserId,
        others: Vec<UserId>,
        created_at: Timestamp,
    ) -> Self {
        let mut participants = Vec::with_capacity(others.len() + 1);
        participants.push(creator);
        for user_id in others {
            if !participants.contains(&user_id) {
                participants.push(user_id);
            }
        }
        Self {
            id,
            participants,
            created_at,
        }
    }

    /// Whether the given user is a participant of this conversation
    pub fn has_participant(&self, user_id: &UserId) -> bool {
        self.participants.iter().any(|p| p == user_id)
    }

    /// Replace the participant set.
    ///
    /// # Errors
    ///
    /// Returns `ConversationError::NoParticipants` if `participants` is empty
    pub fn replace_participants(
        &mut self,
        participants: Vec<UserId>,
    ) -> Result<(), ConversationError> {
        if participants.is_empty() {
            return Err(ConversationError::NoParticipants);
        }
        let mut deduped: Vec<UserId> = Vec::with_capacity(participants.len());
        for user_id in participants {
            if !deduped.contains(&user_id) {
                deduped.push(user_id);
            }
        }
        self.participants = deduped;
        Ok(())
    }
}

/// A message posted to a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message identifier
    pub id: MessageId,
    /// Conversation the message belongs to
    pub conversation_id: ConversationId,
    /// Sender's user ID
    pub sender_id: UserId,
    /// Message body
    pub body: MessageBody,
    /// Timestamp when the message was sent
    pub sent_at: Timestamp,
}

impl Message {
    /// Create a new message
    pub fn new(
        id: MessageId,
        conversation_id: ConversationId,
        sender_id: UserId,
        body: MessageBody,
        sent_at: Timestamp,
    ) -> Self {
        Self {
            id,
            conversation_id,
            sender_id,
            body,
            sent_at,
        }
    }

    /// Replace the message body
    pub fn edit(&mut self, body: MessageBody) {
        self.body = body;
    }
}
