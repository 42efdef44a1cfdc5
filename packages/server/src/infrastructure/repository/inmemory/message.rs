//! InMemory Message Repository 実装

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConversationId, Message, MessageId, MessageRepository, RepositoryError};

/// インメモリ Message Repository 実装
///
/// 送信順を保つため Vec で保持します。
#[derive(Default)]
pub struct InMemoryMessageRepository {
    messages: Arc<Mutex<Vec<Message>>>,
}

impl InMemoryMessageRepository {
    /// 新しい InMemoryMessageRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn save(&self, message: Message) -> Result<(), RepositoryError> {
        let mut messages = self.messages.lock().await;
        match messages.iter_mut().find(|m| m.id == message.id) {
            Some(existing) => *existing = message,
            None => messages.push(message),
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &MessageId) -> Result<Option<Message>, RepositoryError> {
        let messages = self.messages.lock().await;
        Ok(messages.iter().find(|m| &m.id == id).cloned())
    }

    async fn list_by_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<Message>, RepositoryError> {
        let messages = self.messages.lock().await;
        Ok(messages
            .iter()
            .filter(|m| &m.conversation_id == conversation_id)
            .cloned()
            .collect())
    }

    async fn list_by_conversations(
        &self,
        conversation_ids: &[ConversationId],
    ) -> Result<Vec<Message>, RepositoryError> {
        let messages = self.messages.lock().await;
        Ok(messages
            .iter()
            .filter(|m| conversation_ids.contains(&m.conversation_id))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &MessageId) -> Result<(), RepositoryError> {
        let mut messages = self.messages.lock().await;
        let index = messages
            .iter()
            .position(|m| &m.id == id)
            .ok_or_else(|| RepositoryError::MessageNotFound(id.as_str().to_string()))?;
        messages.remove(index);
        Ok(())
    }

    async fn delete_by_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<usize, RepositoryError> {
        let mut messages = self.messages.lock().await;
        let before = messages.len();
        messages.retain(|m| &m.conversation_id != conversation_id);
        Ok(before - messages.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ConversationIdFactory, MessageBody, MessageIdFactory, Timestamp, UserIdFactory,
    };

    fn create_message(conversation_id: &ConversationId, body: &str) -> Message {
        Message::new(
            MessageIdFactory::generate(),
            conversation_id.clone(),
            UserIdFactory::generate(),
            MessageBody::new(body.to_string()).unwrap(),
            Timestamp::new(1000),
        )
    }

    #[tokio::test]
    async fn test_list_by_conversation_keeps_send_order() {
        // テスト項目: 会話ごとのメッセージ一覧は送信順に並ぶ
        // given (前提条件):
        let repo = InMemoryMessageRepository::new();
        let conversation_id = ConversationIdFactory::generate();
        let other_id = ConversationIdFactory::generate();
        let first = create_message(&conversation_id, "first");
        let other = create_message(&other_id, "other");
        let second = create_message(&conversation_id, "second");

        // when (操作):
        repo.save(first.clone()).await.unwrap();
        repo.save(other.clone()).await.unwrap();
        repo.save(second.clone()).await.unwrap();

        // then (期待する結果):
        let listed = repo.list_by_conversation(&conversation_id).await.unwrap();
        assert_eq!(listed, vec![first.clone(), second.clone()]);

        let all = repo
            .list_by_conversations(&[conversation_id, other_id])
            .await
            .unwrap();
        assert_eq!(all, vec![first, other, second]);
    }

    #[tokio::test]
    async fn test_save_existing_message_keeps_position() {
        // テスト項目: 編集したメッセージは元の位置のまま上書きされる
        // given (前提条件):
        let repo = InMemoryMessageRepository::new();
        let conversation_id = ConversationIdFactory::generate();
        let mut first = create_message(&conversation_id, "first");
        let second = create_message(&conversation_id, "second");
        repo.save(first.clone()).await.unwrap();
        repo.save(second.clone()).await.unwrap();

        // when (操作):
        first.edit(MessageBody::new("edited".to_string()).unwrap());
        repo.save(first.clone()).await.unwrap();

        // then (期待する結果):
        let listed = repo.list_by_conversation(&conversation_id).await.unwrap();
        assert_eq!(listed, vec![first, second]);
    }

    #[tokio::test]
    async fn test_delete_message() {
        // テスト項目: メッセージを削除でき、二度目はエラーになる
        // given (前提条件):
        let repo = InMemoryMessageRepository::new();
        let message = create_message(&ConversationIdFactory::generate(), "bye");
        repo.save(message.clone()).await.unwrap();

        // when (操作):
        let first = repo.delete(&message.id).await;
        let second = repo.delete(&message.id).await;

        // then (期待する結果):
        assert!(first.is_ok());
        assert!(matches!(second, Err(RepositoryError::MessageNotFound(_))));
        assert_eq!(repo.find_by_id(&message.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_by_conversation() {
        // テスト項目: 会話に属するメッセージだけがまとめて削除される
        // given (前提条件):
        let repo = InMemoryMessageRepository::new();
        let conversation_id = ConversationIdFactory::generate();
        let other_id = ConversationIdFactory::generate();
        repo.save(create_message(&conversation_id, "a")).await.unwrap();
        repo.save(create_message(&conversation_id, "b")).await.unwrap();
        let kept = create_message(&other_id, "c");
        repo.save(kept.clone()).await.unwrap();

        // when (操作):
        let removed = repo.delete_by_conversation(&conversation_id).await.unwrap();

        // then (期待する結果):
        assert_eq!(removed, 2);
        assert_eq!(
            repo.list_by_conversations(&[conversation_id, other_id])
                .await
                .unwrap(),
            vec![kept]
        );
    }
}
