//! User registration and token endpoints.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    domain::{Email, PersonName, Username},
    infrastructure::dto::http::{
        RegisterUserRequest, RegisterUserResponse, TokenResponse, UserDto,
    },
    ui::{
        error::ApiError,
        extractor::{ApiJson, CurrentUser},
        state::AppState,
    },
    usecase::{NewUser, RefreshTokenUseCase, RegisterUserUseCase},
};

/// `POST /api/users`
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<RegisterUserRequest>,
) -> Result<(StatusCode, Json<RegisterUserResponse>), ApiError> {
    // Convert String -> Value Objects (Domain Model)
    let new_user = NewUser {
        username: Username::new(body.username)?,
        email: Email::new(body.email)?,
        first_name: PersonName::new(body.first_name)?,
        last_name: PersonName::new(body.last_name)?,
    };

    let usecase = RegisterUserUseCase::new(state.user_repository.clone());
    let (user, token) = usecase.execute(new_user).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterUserResponse {
            user: UserDto::from(&user),
            token: token.as_str().to_string(),
        }),
    ))
}

/// `GET /api/users/me`
pub async fn current_user(CurrentUser(user): CurrentUser) -> Json<UserDto> {
    Json(UserDto::from(&user))
}

/// `POST /api/token/refresh/`
pub async fn refresh_token(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<TokenResponse>, ApiError> {
    let usecase = RefreshTokenUseCase::new(state.user_repository.clone());
    let token = usecase.execute(&user.id).await?;
    Ok(Json(TokenResponse {
        token: token.as_str().to_string(),
    }))
}
