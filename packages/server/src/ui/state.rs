//! Shared application state.

use std::sync::Arc;

use crate::{
    domain::{AccessGate, Clock, ConversationRepository, MessageRepository, UserRepository},
    infrastructure::request_log::RequestLogFile,
};

/// State shared by every handler and middleware
pub struct AppState {
    /// Repositories（データアクセス層の抽象化）
    pub user_repository: Arc<dyn UserRepository>,
    pub conversation_repository: Arc<dyn ConversationRepository>,
    pub message_repository: Arc<dyn MessageRepository>,
    /// Time source for the access gate and the request log
    pub clock: Arc<dyn Clock>,
    /// `None` when the time gate is disabled
    pub access_gate: Option<AccessGate>,
    pub request_log: Arc<RequestLogFile>,
}
