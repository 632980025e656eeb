use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::instrument;

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::auth::{AuthResult, UnauthenticatedReason},
    jwt::{DecodeError, TokenCodec},
    use_cases::user::{PasswordHasher, UserRepo, normalize_email},
};

/// Set of tokens that must never authenticate again.
///
/// `expires_at` is the token's natural expiry when it could be read; records
/// past it can be purged because the verifier rejects the token anyway.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Revoking an already revoked token is a no-op.
    async fn revoke(&self, token: &str, expires_at: Option<OffsetDateTime>) -> AppResult<()>;
    async fn is_revoked(&self, token: &str) -> AppResult<bool>;
    async fn purge_expired(&self, now: OffsetDateTime) -> AppResult<u64>;
}

/// Turns a presented bearer token into an [`AuthResult`].
///
/// Every token input yields a result. The only `Err` is a revocation store
/// failure, which says nothing about the token itself.
#[derive(Clone)]
pub struct Verifier {
    codec: Arc<TokenCodec>,
    revocations: Arc<dyn RevocationStore>,
}

impl Verifier {
    pub fn new(codec: Arc<TokenCodec>, revocations: Arc<dyn RevocationStore>) -> Self {
        Self { codec, revocations }
    }

    pub async fn verify(&self, token: &str) -> AppResult<AuthResult> {
        self.verify_at(token, OffsetDateTime::now_utc()).await
    }

    pub async fn verify_at(&self, token: &str, now: OffsetDateTime) -> AppResult<AuthResult> {
        // Cheap lookup first; a revoked token is rejected before signature work.
        if self.revocations.is_revoked(token).await? {
            return Ok(AuthResult::unauthenticated(UnauthenticatedReason::Revoked));
        }

        let claims = match self.codec.decode(token) {
            Ok(claims) => claims,
            Err(DecodeError::Invalid) => {
                return Ok(AuthResult::unauthenticated(UnauthenticatedReason::Invalid));
            }
        };

        if now.unix_timestamp() >= claims.exp {
            return Ok(AuthResult::unauthenticated(UnauthenticatedReason::Expired));
        }

        match claims.user_id {
            Some(subject_id) if subject_id != 0 => Ok(AuthResult::Authenticated { subject_id }),
            _ => Ok(AuthResult::unauthenticated(
                UnauthenticatedReason::MissingSubject,
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

#[derive(Clone)]
pub struct SessionUseCases {
    users: Arc<dyn UserRepo>,
    hasher: Arc<dyn PasswordHasher>,
    codec: Arc<TokenCodec>,
    revocations: Arc<dyn RevocationStore>,
    verifier: Verifier,
}

impl SessionUseCases {
    pub fn new(
        users: Arc<dyn UserRepo>,
        hasher: Arc<dyn PasswordHasher>,
        codec: Arc<TokenCodec>,
        revocations: Arc<dyn RevocationStore>,
    ) -> Self {
        let verifier = Verifier::new(codec.clone(), revocations.clone());
        Self {
            users,
            hasher,
            codec,
            revocations,
            verifier,
        }
    }

    pub fn verifier(&self) -> &Verifier {
        &self.verifier
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> AppResult<IssuedToken> {
        let email = normalize_email(email);
        let credentials = self
            .users
            .get_credentials_by_email(&email)
            .await?
            .ok_or(AppError::NotFound)?;

        if !self.hasher.verify(password, &credentials.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        let access_token = self.codec.issue(credentials.id)?;
        tracing::info!(user_id = credentials.id, "Access token issued");

        Ok(IssuedToken {
            access_token,
            token_type: "Bearer",
            expires_in: self.codec.ttl().whole_seconds(),
        })
    }

    #[instrument(skip(self, token))]
    pub async fn logout(&self, token: &str) -> AppResult<()> {
        let expires_at = self
            .codec
            .decode(token)
            .ok()
            .and_then(|claims| OffsetDateTime::from_unix_timestamp(claims.exp).ok());

        self.revocations.revoke(token, expires_at).await?;
        tracing::info!("Access token revoked");
        Ok(())
    }

    pub async fn verify(&self, token: &str) -> AppResult<AuthResult> {
        self.verifier.verify(token).await
    }

    #[instrument(skip(self))]
    pub async fn purge_expired_revocations(&self) -> AppResult<u64> {
        let purged = self
            .revocations
            .purge_expired(OffsetDateTime::now_utc())
            .await?;
        if purged > 0 {
            tracing::info!(purged, "Purged expired revocation records");
        }
        Ok(purged)
    }
}
