//! Handler modules for the HTTP API.

pub mod conversation;
pub mod health;
pub mod message;
pub mod user;

pub use conversation::{
    create_conversation, delete_conversation, get_conversation, list_conversation_messages,
    list_conversations, update_conversation,
};
pub use health::{health_check, not_found};
pub use message::{create_message, delete_message, get_message, list_messages, update_message};
pub use user::{current_user, refresh_token, register_user};
