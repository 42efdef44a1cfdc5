//! InMemory User Repository 実装
//!
//! ユーザー本体と、トークン ⇔ ユーザーの対応表を同じロックの下で保持します。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{AccessToken, RepositoryError, User, UserId, UserRepository};

#[derive(Default)]
struct UserStore {
    users: HashMap<UserId, User>,
    /// token -> owner
    tokens: HashMap<AccessToken, UserId>,
    /// owner -> current token
    current_tokens: HashMap<UserId, AccessToken>,
}

/// インメモリ User Repository 実装
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: Arc<Mutex<UserStore>>,
}

impl InMemoryUserRepository {
    /// 新しい InMemoryUserRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User, token: AccessToken) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().await;
        if store.users.values().any(|u| u.username == user.username) {
            return Err(RepositoryError::UsernameTaken(
                user.username.as_str().to_string(),
            ));
        }

        store.tokens.insert(token.clone(), user.id.clone());
        store.current_tokens.insert(user.id.clone(), token);
        store.users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let store = self.store.lock().await;
        Ok(store.users.get(id).cloned())
    }

    async fn find_by_token(&self, token: &AccessToken) -> Result<Option<User>, RepositoryError> {
        let store = self.store.lock().await;
        Ok(store
            .tokens
            .get(token)
            .and_then(|user_id| store.users.get(user_id))
            .cloned())
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, RepositoryError> {
        let store = self.store.lock().await;
        Ok(ids
            .iter()
            .filter_map(|id| store.users.get(id).cloned())
            .collect())
    }

    async fn replace_token(
        &self,
        id: &UserId,
        token: AccessToken,
    ) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().await;
        if !store.users.contains_key(id) {
            return Err(RepositoryError::UserNotFound(id.as_str().to_string()));
        }

        if let Some(previous) = store.current_tokens.insert(id.clone(), token.clone()) {
            store.tokens.remove(&previous);
        }
        store.tokens.insert(token, id.clone());
        Ok(())
    }
}
