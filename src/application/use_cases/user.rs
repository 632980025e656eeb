use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;
use tracing::instrument;

use crate::{
    app_error::{AppError, AppResult},
    validators::{MIN_PASSWORD_LEN, is_valid_email, is_valid_password},
};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub created_at: Option<NaiveDateTime>,
}

/// Stored login material. Never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: i64,
    pub password_hash: String,
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn create(&self, email: &str, password_hash: &str) -> AppResult<UserProfile>;
    async fn get_by_id(&self, id: i64) -> AppResult<Option<UserProfile>>;
    async fn get_credentials_by_email(&self, email: &str) -> AppResult<Option<UserCredentials>>;
}

/// One-way password hashing. `verify` returns `Ok(false)` on mismatch and only
/// errors when the stored hash itself is unreadable.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> AppResult<String>;
    fn verify(&self, password: &str, hash: &str) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct UserUseCases {
    repo: Arc<dyn UserRepo>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserUseCases {
    pub fn new(repo: Arc<dyn UserRepo>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repo, hasher }
    }

    #[instrument(skip(self, password))]
    pub async fn register(&self, email: &str, password: &str) -> AppResult<UserProfile> {
        if !is_valid_email(email) {
            return Err(AppError::InvalidInput("Invalid email format".into()));
        }
        if !is_valid_password(password) {
            return Err(AppError::InvalidInput(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let email = normalize_email(email);
        let password_hash = self.hasher.hash(password)?;
        let user = self.repo.create(&email, &password_hash).await?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    pub async fn get_user(&self, id: i64) -> AppResult<UserProfile> {
        self.repo.get_by_id(id).await?.ok_or(AppError::NotFound)
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
