//! Message endpoints.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::{ConversationId, MessageBody, MessageId, UserId},
    infrastructure::dto::http::{
        CreateMessageRequest, MessageDto, MessageListQuery, UpdateMessageRequest,
    },
    ui::{
        error::{ApiError, NOT_FOUND},
        extractor::{ApiJson, ApiQuery, CurrentUser},
        state::AppState,
    },
    usecase::{
        CreateMessageUseCase, DeleteMessageUseCase, GetMessageUseCase, ListMessagesUseCase,
        MessageFilter, MessageUseCaseError, UpdateMessageUseCase,
    },
};

const DELETE_PERMISSION_DENIED: &str = "You do not have permission to delete this message.";
const MESSAGE_NOT_FOUND: &str = "Message not found.";

fn parse_message_id(raw: String) -> Result<MessageId, ApiError> {
    MessageId::new(raw).map_err(|_| ApiError::not_found(NOT_FOUND))
}

/// Empty query values are treated as absent
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// `GET /api/messages`
///
/// Filters: `conversation_id`, `sender`, `search`. A filter id that is not
/// well-formed matches nothing.
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ApiQuery(query): ApiQuery<MessageListQuery>,
) -> Result<Json<Vec<MessageDto>>, ApiError> {
    let conversation_id = match non_empty(query.conversation_id).map(ConversationId::new) {
        Some(Ok(id)) => Some(id),
        Some(Err(_)) => return Ok(Json(Vec::new())),
        None => None,
    };
    let sender_id = match non_empty(query.sender).map(UserId::new) {
        Some(Ok(id)) => Some(id),
        Some(Err(_)) => return Ok(Json(Vec::new())),
        None => None,
    };

    let usecase = ListMessagesUseCase::new(
        state.conversation_repository.clone(),
        state.message_repository.clone(),
        state.user_repository.clone(),
    );
    let messages = usecase
        .execute(
            &user.id,
            MessageFilter {
                conversation_id,
                sender_id,
                search: non_empty(query.search),
            },
        )
        .await?;
    Ok(Json(messages.iter().map(MessageDto::from).collect()))
}

/// `POST /api/messages`
pub async fn create_message(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ApiJson(body): ApiJson<CreateMessageRequest>,
) -> Result<(StatusCode, Json<MessageDto>), ApiError> {
    let conversation_id = ConversationId::new(body.conversation_id)?;
    let message_body = MessageBody::new(body.message_body)?;

    let usecase = CreateMessageUseCase::new(
        state.conversation_repository.clone(),
        state.message_repository.clone(),
    );
    let message = usecase
        .execute(&user.id, &conversation_id, message_body)
        .await?;
    Ok((StatusCode::CREATED, Json(MessageDto::from(&message))))
}

/// `GET /api/messages/{message_id}`
pub async fn get_message(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(message_id): Path<String>,
) -> Result<Json<MessageDto>, ApiError> {
    let message_id = parse_message_id(message_id)?;

    let usecase = GetMessageUseCase::new(
        state.conversation_repository.clone(),
        state.message_repository.clone(),
    );
    let message = usecase.execute(&user.id, &message_id).await?;
    Ok(Json(MessageDto::from(&message)))
}

/// `PUT`/`PATCH /api/messages/{message_id}`
pub async fn update_message(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(message_id): Path<String>,
    ApiJson(body): ApiJson<UpdateMessageRequest>,
) -> Result<Json<MessageDto>, ApiError> {
    let message_id = parse_message_id(message_id)?;
    let message_body = MessageBody::new(body.message_body)?;

    let usecase = UpdateMessageUseCase::new(
        state.conversation_repository.clone(),
        state.message_repository.clone(),
    );
    let message = usecase
        .execute(&user.id, &message_id, message_body)
        .await?;
    Ok(Json(MessageDto::from(&message)))
}

/// `DELETE /api/messages/{message_id}`
///
/// Re-checks participation and answers with its own detail texts.
pub async fn delete_message(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(message_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let message_id =
        MessageId::new(message_id).map_err(|_| ApiError::not_found(MESSAGE_NOT_FOUND))?;

    let usecase = DeleteMessageUseCase::new(
        state.conversation_repository.clone(),
        state.message_repository.clone(),
    );
    usecase
        .execute(&user.id, &message_id)
        .await
        .map_err(|e| match e {
            MessageUseCaseError::NotFound(_) => ApiError::not_found(MESSAGE_NOT_FOUND),
            MessageUseCaseError::PermissionDenied => ApiError::forbidden(DELETE_PERMISSION_DENIED),
            other => ApiError::from(other),
        })?;
    Ok(StatusCode::NO_CONTENT)
}
