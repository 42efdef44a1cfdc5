//! UseCase: 会話の作成・一覧・取得・更新・削除・メッセージ一覧
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - 会話に対する各ユースケースの execute() メソッド
//! - 参加者かどうかによる権限チェック
//!
//! ### なぜこのテストが必要か
//! - 参加者以外が会話やメッセージを読めないことを保証する
//! - 存在しない会話は NotFound、権限が無い場合は PermissionDenied と区別する
//!
//! ### どのような状況を想定しているか
//! - 正常系：作成・一覧・検索・更新・削除
//! - 異常系：存在しない会話、参加者以外のアクセス、存在しないユーザーの指定

use std::sync::Arc;

use kaiwa_shared::time::get_timestamp_millis;

use crate::domain::{
    Conversation, ConversationId, ConversationIdFactory, ConversationRepository, Message,
    MessageRepository, RepositoryError, Timestamp, User, UserId, UserRepository,
};

use super::error::ConversationUseCaseError;

/// 参加者の User を解決済みの会話
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationDetail {
    pub conversation: Conversation,
    pub participants: Vec<User>,
}

/// Load a conversation and require `user_id` to be one of its participants.
async fn load_as_participant(
    conversations: &dyn ConversationRepository,
    user_id: &UserId,
    conversation_id: &ConversationId,
) -> Result<Conversation, ConversationUseCaseError> {
    let conversation = conversations
        .find_by_id(conversation_id)
        .await?
        .ok_or_else(|| ConversationUseCaseError::NotFound(conversation_id.as_str().to_string()))?;

    if !conversation.has_participant(user_id) {
        tracing::debug!(
            user_id = %user_id,
            conversation_id = %conversation_id,
            "Rejected access by non-participant"
        );
        return Err(ConversationUseCaseError::PermissionDenied);
    }
    Ok(conversation)
}

/// Fail with the first id that does not belong to a registered user.
async fn ensure_users_exist(
    users: &dyn UserRepository,
    ids: &[UserId],
) -> Result<(), ConversationUseCaseError> {
    let found = users.find_many(ids).await?;
    match ids.iter().find(|id| !found.iter().any(|u| &u.id == *id)) {
        Some(missing) => Err(ConversationUseCaseError::UnknownParticipant(
            missing.as_str().to_string(),
        )),
        None => Ok(()),
    }
}

async fn with_participants(
    users: &dyn UserRepository,
    conversation: Conversation,
) -> Result<ConversationDetail, ConversationUseCaseError> {
    let participants = users.find_many(&conversation.participants).await?;
    Ok(ConversationDetail {
        conversation,
        participants,
    })
}

/// 会話作成のユースケース
pub struct CreateConversationUseCase {
    conversations: Arc<dyn ConversationRepository>,
    users: Arc<dyn UserRepository>,
}

impl CreateConversationUseCase {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            conversations,
            users,
        }
    }

    /// 会話を作成する。作成者は常に参加者に含まれる。
    ///
    /// # Returns
    ///
    /// * `Ok(ConversationDetail)` - 作成された会話
    /// * `Err(ConversationUseCaseError::UnknownParticipant)` - 存在しないユーザーが指定された
    pub async fn execute(
        &self,
        creator: &UserId,
        participant_ids: Vec<UserId>,
    ) -> Result<ConversationDetail, ConversationUseCaseError> {
        ensure_users_exist(self.users.as_ref(), &participant_ids).await?;

        let conversation = Conversation::start(
            ConversationIdFactory::generate(),
            creator.clone(),
            participant_ids,
            Timestamp::new(get_timestamp_millis()),
        );
        self.conversations.save(conversation.clone()).await?;

        tracing::info!(
            conversation_id = %conversation.id,
            participants = conversation.participants.len(),
            "Conversation created"
        );
        with_participants(self.users.as_ref(), conversation).await
    }
}

/// 会話一覧のユースケース
pub struct ListConversationsUseCase {
    conversations: Arc<dyn ConversationRepository>,
    users: Arc<dyn UserRepository>,
}

impl ListConversationsUseCase {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            conversations,
            users,
        }
    }

    /// 参加している会話の一覧を返す
    ///
    /// `search` が指定された場合、参加者のメールアドレス・名・姓のいずれかに
    /// 部分一致（大文字小文字を区別しない）する会話だけを返す。
    pub async fn execute(
        &self,
        user_id: &UserId,
        search: Option<&str>,
    ) -> Result<Vec<ConversationDetail>, ConversationUseCaseError> {
        let needle = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let mut details = Vec::new();
        for conversation in self.conversations.list_for_participant(user_id).await? {
            let detail = with_participants(self.users.as_ref(), conversation).await?;
            let matched = match &needle {
                Some(needle) => detail.participants.iter().any(|p| p.matches_search(needle)),
                None => true,
            };
            if matched {
                details.push(detail);
            }
        }
        Ok(details)
    }
}

/// 会話取得のユースケース
pub struct GetConversationUseCase {
    conversations: Arc<dyn ConversationRepository>,
    users: Arc<dyn UserRepository>,
}

impl GetConversationUseCase {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            conversations,
            users,
        }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        conversation_id: &ConversationId,
    ) -> Result<ConversationDetail, ConversationUseCaseError> {
        let conversation =
            load_as_participant(self.conversations.as_ref(), user_id, conversation_id).await?;
        with_participants(self.users.as_ref(), conversation).await
    }
}

/// 会話の参加者を置き換えるユースケース
pub struct UpdateConversationUseCase {
    conversations: Arc<dyn ConversationRepository>,
    users: Arc<dyn UserRepository>,
}

impl UpdateConversationUseCase {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            conversations,
            users,
        }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        conversation_id: &ConversationId,
        participant_ids: Vec<UserId>,
    ) -> Result<ConversationDetail, ConversationUseCaseError> {
        let mut conversation =
            load_as_participant(self.conversations.as_ref(), user_id, conversation_id).await?;
        ensure_users_exist(self.users.as_ref(), &participant_ids).await?;

        conversation.replace_participants(participant_ids)?;
        self.conversations.save(conversation.clone()).await?;

        tracing::info!(conversation_id = %conversation.id, "Conversation participants updated");
        with_participants(self.users.as_ref(), conversation).await
    }
}

/// 会話削除のユースケース（会話のメッセージも削除する）
pub struct DeleteConversationUseCase {
    conversations: Arc<dyn ConversationRepository>,
    messages: Arc<dyn MessageRepository>,
}

impl DeleteConversationUseCase {
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
        conversation_id: &ConversationId,
    ) -> Result<(), ConversationUseCaseError> {
        load_as_participant(self.conversations.as_ref(), user_id, conversation_id).await?;

        let removed = self.messages.delete_by_conversation(conversation_id).await?;
        // a concurrent delete may have removed it since the participant check
        self.conversations
            .delete(conversation_id)
            .await
            .map_err(|e| match e {
                RepositoryError::ConversationNotFound(id) => ConversationUseCaseError::NotFound(id),
                other => ConversationUseCaseError::Repository(other),
            })?;

        tracing::info!(
            conversation_id = %conversation_id,
            removed_messages = removed,
            "Conversation deleted"
        );
        Ok(())
    }
}

/// 会話のメッセージ一覧のユースケース
pub struct ListConversationMessagesUseCase {
    conversations: Arc<dyn ConversationRepository>,
    messages: Arc<dyn MessageRepository>,
}

impl ListConversationMessagesUseCase {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        messages: Arc<dyn MessageRepository>,
    ) -> Self {
        Self {
            conversations,
            messages,
        }
    }

    /// 参加者であれば会話のメッセージを送信順で返す
    pub async fn execute(
        &self,
        user_id: &UserId,
        conversation_id: &ConversationId,
    ) -> Result<Vec<Message>, ConversationUseCaseError> {
        load_as_participant(self.conversations.as_ref(), user_id, conversation_id).await?;
        Ok(self.messages.list_by_conversation(conversation_id).await?)
    }
}
