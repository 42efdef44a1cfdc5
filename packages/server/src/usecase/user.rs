//! UseCase: ユーザー登録・認証・トークン更新
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RegisterUserUseCase / AuthenticateUseCase / RefreshTokenUseCase
//!
//! ### なぜこのテストが必要か
//! - 保護された API はすべて、トークンからユーザーを解決できることが前提
//! - トークン更新後に古いトークンが無効になることを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：登録してトークンで認証できる
//! - 異常系：ユーザー名の重複、不明なトークン、Repository の障害

use std::sync::Arc;

use kaiwa_shared::time::get_timestamp_millis;

use crate::domain::{
    AccessToken, AccessTokenFactory, Email, PersonName, RepositoryError, Timestamp, User,
    UserId, UserIdFactory, UserRepository, Username,
};

use super::error::{AuthError, RegisterUserError};

/// 登録するユーザーの入力（検証済みの Value Object）
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub email: Email,
    pub first_name: PersonName,
    pub last_name: PersonName,
}

/// ユーザー登録のユースケース
pub struct RegisterUserUseCase {
    repository: Arc<dyn UserRepository>,
}

impl RegisterUserUseCase {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// ユーザーを登録し、最初のアクセストークンを発行する
    pub async fn execute(&self, new_user: NewUser) -> Result<(User, AccessToken), RegisterUserError> {
        let user = User::new(
            UserIdFactory::generate(),
            new_user.username,
            new_user.email,
            new_user.first_name,
            new_user.last_name,
            Timestamp::new(get_timestamp_millis()),
        );
        let token = AccessTokenFactory::issue();

        self.repository
            .insert(user.clone(), token.clone())
            .await
            .map_err(|e| match e {
                RepositoryError::UsernameTaken(name) => RegisterUserError::UsernameTaken(name),
                other => RegisterUserError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok((user, token))
    }
}

/// トークンからユーザーを解決するユースケース
pub struct AuthenticateUseCase {
    repository: Arc<dyn UserRepository>,
}

impl AuthenticateUseCase {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, token: &AccessToken) -> Result<User, AuthError> {
        self.repository
            .find_by_token(token)
            .await?
            .ok_or(AuthError::InvalidToken)
    }
}

/// アクセストークンを再発行するユースケース
pub struct RefreshTokenUseCase {
    repository: Arc<dyn UserRepository>,
}

impl RefreshTokenUseCase {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// 新しいトークンを発行し、古いトークンを無効化する
    pub async fn execute(&self, user_id: &UserId) -> Result<AccessToken, AuthError> {
        let token = AccessTokenFactory::issue();
        self.repository
            .replace_token(user_id, token.clone())
            .await
            .map_err(|e| match e {
                RepositoryError::UserNotFound(_) => AuthError::InvalidToken,
                other => AuthError::Repository(other),
            })?;
        tracing::debug!(user_id = %user_id, "Access token rotated");
        Ok(token)
    }
}
