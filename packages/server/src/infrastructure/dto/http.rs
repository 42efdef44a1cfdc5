//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};

use kaiwa_shared::time::timestamp_to_rfc3339;

use crate::{
    domain::{Message, User},
    usecase::ConversationDetail,
};

/// User as exposed over the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: String, // ISO 8601
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.as_str().to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            first_name: user.first_name.as_str().to_string(),
            last_name: user.last_name.as_str().to_string(),
            created_at: timestamp_to_rfc3339(user.created_at.value()),
        }
    }
}

/// Body of `POST /api/users`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserResponse {
    pub user: UserDto,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Conversation with its participants resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationDto {
    pub conversation_id: String,
    pub participants: Vec<UserDto>,
    pub created_at: String, // ISO 8601
}

impl From<&ConversationDetail> for ConversationDto {
    fn from(detail: &ConversationDetail) -> Self {
        Self {
            conversation_id: detail.conversation.id.as_str().to_string(),
            participants: detail.participants.iter().map(UserDto::from).collect(),
            created_at: timestamp_to_rfc3339(detail.conversation.created_at.value()),
        }
    }
}

/// Body of `POST /api/conversations`; the caller is always added
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateConversationRequest {
    #[serde(default)]
    pub participant_ids: Vec<String>,
}

/// Body of `PUT`/`PATCH /api/conversations/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateConversationRequest {
    pub participant_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub message_id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub message_body: String,
    pub sent_at: String, // ISO 8601
}

impl From<&Message> for MessageDto {
    fn from(message: &Message) -> Self {
        Self {
            message_id: message.id.as_str().to_string(),
            conversation_id: message.conversation_id.as_str().to_string(),
            sender_id: message.sender_id.as_str().to_string(),
            message_body: message.body.as_str().to_string(),
            sent_at: timestamp_to_rfc3339(message.sent_at.value()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMessageRequest {
    pub conversation_id: String,
    pub message_body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMessageRequest {
    pub message_body: String,
}

/// `?search=` on list endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

/// Query string of `GET /api/messages`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageListQuery {
    pub conversation_id: Option<String>,
    pub sender: Option<String>,
    pub search: Option<String>,
}

/// Error body: `{"detail": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDto {
    pub detail: String,
}
