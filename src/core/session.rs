use crate::domain::model::{AuthResponse, UserRole};
use crate::utils::error::{PeerPayError, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    /// Empty when only a bearer token was configured.
    pub user_id: String,
    pub name: Option<String>,
    pub role: Option<UserRole>,
    pub token: String,
}

/// 目前登入的使用者。只有登入/登出會寫入，其他地方只讀
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<Option<CurrentUser>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session restored from a stored token (CLI flags or config file).
    pub fn with_token(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(CurrentUser {
                user_id: user_id.into(),
                name: None,
                role: None,
                token: token.into(),
            }))),
        }
    }

    /// Session that authenticates requests but has no known user id.
    pub fn with_bearer(token: impl Into<String>) -> Self {
        Self::with_token(String::new(), token)
    }

    pub async fn sign_in(&self, auth: &AuthResponse) {
        let mut current = self.inner.write().await;
        *current = Some(CurrentUser {
            user_id: auth.user.id.clone(),
            name: Some(auth.user.name.clone()),
            role: Some(auth.user.role),
            token: auth.token.clone(),
        });
        tracing::info!("Signed in as {} ({})", auth.user.email, auth.user.id);
    }

    pub async fn sign_out(&self) {
        let mut current = self.inner.write().await;
        if let Some(user) = current.take() {
            tracing::info!("Signed out {}", user.user_id);
        }
    }

    pub async fn current(&self) -> Option<CurrentUser> {
        self.inner.read().await.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.inner
            .read()
            .await
            .as_ref()
            .map(|user| user.token.clone())
            .filter(|token| !token.is_empty())
    }

    pub async fn user_id(&self) -> Result<String> {
        self.inner
            .read()
            .await
            .as_ref()
            .map(|user| user.user_id.clone())
            .filter(|user_id| !user_id.is_empty())
            .ok_or(PeerPayError::NoSession)
    }

    pub async fn is_signed_in(&self) -> bool {
        self.inner.read().await.is_some()
    }
}
