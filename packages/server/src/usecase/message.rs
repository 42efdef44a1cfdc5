//! UseCase: メッセージの一覧・作成・取得・更新・削除
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - メッセージに対する各ユースケースの execute() メソッド
//! - conversation_id / sender / search による絞り込み
//!
//! ### なぜこのテストが必要か
//! - 参加者以外には会話のメッセージが見えないことを保証する
//! - conversation_id で絞り込んだ一覧は、権限が無い場合もエラーではなく空になる
//!
//! ### どのような状況を想定しているか
//! - 正常系：送信・一覧・編集・削除
//! - 異常系：存在しない会話への送信、参加者以外の取得・削除

use std::{collections::HashMap, sync::Arc};

use kaiwa_shared::time::get_timestamp_millis;

use crate::domain::{
    ConversationId, ConversationRepository, Message, MessageBody, MessageId, MessageIdFactory,
    MessageRepository, RepositoryError, Timestamp, UserId, UserRepository,
};

use super::error::MessageUseCaseError;

/// メッセージ一覧の絞り込み条件
#[derive(Debug, Clone, Default)]
pub struct MessageFilter {
    /// Restrict to one conversation
    pub conversation_id: Option<ConversationId>,
    /// Restrict to one sender
    pub sender_id: Option<UserId>,
    /// Substring of the body or of the sender's e-mail (case-insensitive)
    pub search: Option<String>,
}

/// Load a message and require `user_id` to participate in its conversation.
async fn load_as_participant(
    conversations: &dyn ConversationRepository,
    messages: &dyn MessageRepository,
    user_id: &UserId,
    message_id: &MessageId,
) -> Result<Message, MessageUseCaseError> {
    let not_found = || MessageUseCaseError::NotFound(message_id.as_str().to_string());

    let message = messages.find_by_id(message_id).await?.ok_or_else(not_found)?;
    let conversation = conversations
        .find_by_id(&message.conversation_id)
        .await?
        .ok_or_else(not_found)?;

    if !conversation.has_participant(user_id) {
        tracing::debug!(
            user_id = %user_id,
            message_id = %message_id,
            "Rejected message access by non-participant"
        );
        return Err(MessageUseCaseError::PermissionDenied);
    }
    Ok(message)
}

/// メッセージ一覧のユースケース
pub struct ListMessagesUseCase {
    conversations: Arc<dyn ConversationRepository>,
    messages: Arc<dyn MessageRepository>,
    users: Arc<dyn UserRepository>,
}

impl ListMessagesUseCase {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        messages: Arc<dyn MessageRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            conversations,
            messages,
            users,
        }
    }

    /// 閲覧可能なメッセージを送信順で返す
    ///
    /// `conversation_id` が指定され、呼び出し元がその会話の参加者でない場合
    /// （会話が存在しない場合も含む）は空の一覧を返す。
    pub async fn execute(
        &self,
        user_id: &UserId,
        filter: MessageFilter,
    ) -> Result<Vec<Message>, MessageUseCaseError> {
        let mut messages = match &filter.conversation_id {
            Some(conversation_id) => {
                let visible = self
                    .conversations
                    .find_by_id(conversation_id)
                    .await?
                    .is_some_and(|c| c.has_participant(user_id));
                if !visible {
                    return Ok(Vec::new());
                }
                self.messages.list_by_conversation(conversation_id).await?
            }
            None => {
                let conversation_ids: Vec<ConversationId> = self
                    .conversations
                    .list_for_participant(user_id)
                    .await?
                    .into_iter()
                    .map(|c| c.id)
                    .collect();
                self.messages
                    .list_by_conversations(&conversation_ids)
                    .await?
            }
        };

        if let Some(sender_id) = &filter.sender_id {
            messages.retain(|m| &m.sender_id == sender_id);
        }

        let needle = filter
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        if let Some(needle) = needle {
            let emails = self.sender_emails(&messages).await?;
            messages.retain(|m| {
                m.body.as_str().to_lowercase().contains(&needle)
                    || emails
                        .get(&m.sender_id)
                        .is_some_and(|email| email.contains(&needle))
            });
        }

        Ok(messages)
    }

    /// Lowercased e-mail of every sender appearing in `messages`
    async fn sender_emails(
        &self,
        messages: &[Message],
    ) -> Result<HashMap<UserId, String>, MessageUseCaseError> {
        let mut sender_ids: Vec<UserId> = Vec::new();
        for message in messages {
            if !sender_ids.contains(&message.sender_id) {
                sender_ids.push(message.sender_id.clone());
            }
        }
        Ok(self
            .users
            .find_many(&sender_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.email.as_str().to_lowercase()))
            .collect())
    }
}

/// メッセージ送信のユースケース
pub struct CreateMessageUseCase {
    conversations: Arc<dyn ConversationRepository>,
    messages: Arc<dyn MessageRepository>,
}

impl CreateMessageUseCase {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        messages: Arc<dyn MessageRepository>,
    ) -> Self {
        Self {
            conversations,
            messages,
        }
    }

    /// メッセージを送信する
    ///
    /// # Returns
    ///
    /// * `Ok(Message)` - 保存されたメッセージ
    /// * `Err(MessageUseCaseError::ConversationNotFound)` - 会話が存在しない
    /// * `Err(MessageUseCaseError::PermissionDenied)` - 送信者が参加者ではない
    pub async fn execute(
        &self,
        sender_id: &UserId,
        conversation_id: &ConversationId,
        body: MessageBody,
    ) -> Result<Message, MessageUseCaseError> {
        let conversation = self
            .conversations
            .find_by_id(conversation_id)
            .await?
            .ok_or_else(|| {
                MessageUseCaseError::ConversationNotFound(conversation_id.as_str().to_string())
            })?;
        if !conversation.has_participant(sender_id) {
            return Err(MessageUseCaseError::PermissionDenied);
        }

        let message = Message::new(
            MessageIdFactory::generate(),
            conversation.id,
            sender_id.clone(),
            body,
            Timestamp::new(get_timestamp_millis()),
        );
        self.messages.save(message.clone()).await?;

        tracing::info!(
            message_id = %message.id,
            conversation_id = %message.conversation_id,
            "Message sent"
        );
        Ok(message)
    }
}

/// メッセージ取得のユースケース
pub struct GetMessageUseCase {
    conversations: Arc<dyn ConversationRepository>,
    messages: Arc<dyn MessageRepository>,
}

impl GetMessageUseCase {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        messages: Arc<dyn MessageRepository>,
    ) -> Self {
        Self {
            conversations,
            messages,
        }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        message_id: &MessageId,
    ) -> Result<Message, MessageUseCaseError> {
        load_as_participant(
            self.conversations.as_ref(),
            self.messages.as_ref(),
            user_id,
            message_id,
        )
        .await
    }
}

/// メッセージ編集のユースケース
pub struct UpdateMessageUseCase {
    conversations: Arc<dyn ConversationRepository>,
    messages: Arc<dyn MessageRepository>,
}

impl UpdateMessageUseCase {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        messages: Arc<dyn MessageRepository>,
    ) -> Self {
        Self {
            conversations,
            messages,
        }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        message_id: &MessageId,
        body: MessageBody,
    ) -> Result<Message, MessageUseCaseError> {
        let mut message = load_as_participant(
            self.conversations.as_ref(),
            self.messages.as_ref(),
            user_id,
            message_id,
        )
        .await?;

        message.edit(body);
        self.messages.save(message.clone()).await?;
        Ok(message)
    }
}

/// メッセージ削除のユースケース
pub struct DeleteMessageUseCase {
    conversations: Arc<dyn ConversationRepository>,
    messages: Arc<dyn MessageRepository>,
}

impl DeleteMessageUseCase {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        messages: Arc<dyn MessageRepository>,
    ) -> Self {
        Self {
            conversations,
            messages,
        }
    }

    /// 参加者であることを再確認してから削除する
    pub async fn execute(
        &self,
        user_id: &UserId,
        message_id: &MessageId,
    ) -> Result<(), MessageUseCaseError> {
        load_as_participant(
            self.conversations.as_ref(),
            self.messages.as_ref(),
            user_id,
            message_id,
        )
        .await?;

        // a concurrent delete may have removed it since the participant check
        self.messages
            .delete(message_id)
            .await
            .map_err(|e| match e {
                RepositoryError::MessageNotFound(id) => MessageUseCaseError::NotFound(id),
                other => MessageUseCaseError::Repository(other),
            })?;
        tracing::info!(message_id = %message_id, "Message deleted");
        Ok(())
    }
}
