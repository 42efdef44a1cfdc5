//! InMemory Repository 実装
//!
//! プロセス内のコレクションをインメモリ DB として使用します。
//! 再起動するとデータは失われます。

mod conversation;
mod message;
mod user;

pub use conversation::InMemoryConversationRepository;
pub use message::InMemoryMessageRepository;
pub use user::InMemoryUserRepository;
