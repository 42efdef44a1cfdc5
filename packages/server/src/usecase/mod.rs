//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層の Repository trait を通してデータを操作します。

pub mod conversation;
pub mod error;
pub mod message;
pub mod user;

pub use conversation::{
    ConversationDetail, CreateConversationUseCase, DeleteConversationUseCase,
    GetConversationUseCase, ListConversationMessagesUseCase, ListConversationsUseCase,
    UpdateConversationUseCase,
};
pub use error::{AuthError, ConversationUseCaseError, MessageUseCaseError, RegisterUserError};
pub use message::{
    CreateMessageUseCase, DeleteMessageUseCase, GetMessageUseCase, ListMessagesUseCase,
    MessageFilter, UpdateMessageUseCase,
};
pub use user::{AuthenticateUseCase, NewUser, RefreshTokenUseCase, RegisterUserUseCase};
