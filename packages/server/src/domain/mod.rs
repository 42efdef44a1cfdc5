//! Domain layer for the messaging server.
//!
//! This module contains business rules that are independent of
//! data transfer objects (DTOs), HTTP and infrastructure concerns.

pub mod access_window;
pub mod clock;
pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use access_window::{
    AccessDecision, AccessGate, DEFAULT_EXEMPT_PREFIXES, DEFAULT_GATED_PREFIXES, GateScope,
    RestrictedWindow,
};
pub use clock::Clock;
pub use entity::{Conversation, Message, User};
pub use error::{ConversationError, RepositoryError, ValueObjectError};
pub use factory::{AccessTokenFactory, ConversationIdFactory, MessageIdFactory, UserIdFactory};
pub use repository::{ConversationRepository, MessageRepository, UserRepository};
pub use value_object::{
    AccessToken, ConversationId, Email, MessageBody, MessageId, PersonName, Timestamp, UserId,
    Username,
};
