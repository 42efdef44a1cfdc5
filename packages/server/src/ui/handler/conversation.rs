//! Conversation endpoints.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::{ConversationId, UserId},
    infrastructure::dto::http::{
        ConversationDto, CreateConversationRequest, MessageDto, SearchQuery,
        UpdateConversationRequest,
    },
    ui::{
        error::{ApiError, NOT_FOUND},
        extractor::{ApiJson, ApiQuery, CurrentUser},
        state::AppState,
    },
    usecase::{
        ConversationUseCaseError, CreateConversationUseCase, DeleteConversationUseCase,
        GetConversationUseCase, ListConversationMessagesUseCase, ListConversationsUseCase,
        UpdateConversationUseCase,
    },
};

const MESSAGES_PERMISSION_DENIED: &str = "You do not have permission to access these messages.";
const CONVERSATION_NOT_FOUND: &str = "Conversation not found";

/// A malformed id can never match a conversation
fn parse_conversation_id(raw: String) -> Result<ConversationId, ApiError> {
    ConversationId::new(raw).map_err(|_| ApiError::not_found(NOT_FOUND))
}

fn parse_participant_ids(raw: Vec<String>) -> Result<Vec<UserId>, ApiError> {
    raw.into_iter()
        .map(|id| UserId::new(id).map_err(ApiError::from))
        .collect()
}

/// `GET /api/conversations`
pub async fn list_conversations(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Json<Vec<ConversationDto>>, ApiError> {
    let usecase = ListConversationsUseCase::new(
        state.conversation_repository.clone(),
        state.user_repository.clone(),
    );
    let details = usecase.execute(&user.id, query.search.as_deref()).await?;
    Ok(Json(details.iter().map(ConversationDto::from).collect()))
}

/// `POST /api/conversations`
pub async fn create_conversation(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ApiJson(body): ApiJson<CreateConversationRequest>,
) -> Result<(StatusCode, Json<ConversationDto>), ApiError> {
    let participant_ids = parse_participant_ids(body.participant_ids)?;

    let usecase = CreateConversationUseCase::new(
        state.conversation_repository.clone(),
        state.user_repository.clone(),
    );
    let detail = usecase.execute(&user.id, participant_ids).await?;
    Ok((StatusCode::CREATED, Json(ConversationDto::from(&detail))))
}

/// `GET /api/conversations/{conversation_id}`
pub async fn get_conversation(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(conversation_id): Path<String>,
) -> Result<Json<ConversationDto>, ApiError> {
    let conversation_id = parse_conversation_id(conversation_id)?;

    let usecase = GetConversationUseCase::new(
        state.conversation_repository.clone(),
        state.user_repository.clone(),
    );
    let detail = usecase.execute(&user.id, &conversation_id).await?;
    Ok(Json(ConversationDto::from(&detail)))
}

/// `PUT`/`PATCH /api/conversations/{conversation_id}`
pub async fn update_conversation(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(conversation_id): Path<String>,
    ApiJson(body): ApiJson<UpdateConversationRequest>,
) -> Result<Json<ConversationDto>, ApiError> {
    let conversation_id = parse_conversation_id(conversation_id)?;
    let participant_ids = parse_participant_ids(body.participant_ids)?;

    let usecase = UpdateConversationUseCase::new(
        state.conversation_repository.clone(),
        state.user_repository.clone(),
    );
    let detail = usecase
        .execute(&user.id, &conversation_id, participant_ids)
        .await?;
    Ok(Json(ConversationDto::from(&detail)))
}

/// `DELETE /api/conversations/{conversation_id}`
pub async fn delete_conversation(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(conversation_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let conversation_id = parse_conversation_id(conversation_id)?;

    let usecase = DeleteConversationUseCase::new(
        state.conversation_repository.clone(),
        state.message_repository.clone(),
    );
    usecase.execute(&user.id, &conversation_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/conversations/{conversation_id}/messages`
///
/// Answers with its own detail texts instead of the generic ones.
pub async fn list_conversation_messages(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(conversation_id): Path<String>,
) -> Result<Json<Vec<MessageDto>>, ApiError> {
    let conversation_id = ConversationId::new(conversation_id)
        .map_err(|_| ApiError::not_found(CONVERSATION_NOT_FOUND))?;

    let usecase = ListConversationMessagesUseCase::new(
        state.conversation_repository.clone(),
        state.message_repository.clone(),
    );
    let messages = usecase
        .execute(&user.id, &conversation_id)
        .await
        .map_err(|e| match e {
            ConversationUseCaseError::NotFound(_) => ApiError::not_found(CONVERSATION_NOT_FOUND),
            ConversationUseCaseError::PermissionDenied => {
                ApiError::forbidden(MESSAGES_PERMISSION_DENIED)
            }
            other => ApiError::from(other),
        })?;
    Ok(Json(messages.iter().map(MessageDto::from).collect()))
}
