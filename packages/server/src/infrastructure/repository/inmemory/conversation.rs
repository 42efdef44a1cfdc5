//! InMemory Conversation Repository 実装

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Conversation, ConversationId, ConversationRepository, RepositoryError, UserId,
};

/// インメモリ Conversation Repository 実装
///
/// 作成順を保つため Vec で保持します。
#[derive(Default)]
pub struct InMemoryConversationRepository {
    conversations: Arc<Mutex<Vec<Conversation>>>,
}

impl InMemoryConversationRepository {
    /// 新しい InMemoryConversationRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn save(&self, conversation: Conversation) -> Result<(), RepositoryError> {
        let mut conversations = self.conversations.lock().await;
        match conversations.iter_mut().find(|c| c.id == conversation.id) {
            Some(existing) => *existing = conversation,
            None => conversations.push(conversation),
        }
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ConversationId,
    ) -> Result<Option<Conversation>, RepositoryError> {
        let conversations = self.conversations.lock().await;
        Ok(conversations.iter().find(|c| &c.id == id).cloned())
    }

    async fn list_for_participant(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Conversation>, RepositoryError> {
        let conversations = self.conversations.lock().await;
        Ok(conversations
            .iter()
            .filter(|c| c.has_participant(user_id))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &ConversationId) -> Result<(), RepositoryError> {
        let mut conversations = self.conversations.lock().await;
        let index = conversations
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| RepositoryError::ConversationNotFound(id.as_str().to_string()))?;
        conversations.remove(index);
        Ok(())
    }
}
