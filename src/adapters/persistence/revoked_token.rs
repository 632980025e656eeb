use async_trait::async_trait;
use chrono::{DateTime, Utc};
use time::OffsetDateTime;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    jwt::fingerprint,
    use_cases::session::RevocationStore,
};

fn to_chrono(at: OffsetDateTime) -> AppResult<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(at.unix_timestamp(), 0)
        .ok_or_else(|| AppError::Internal(format!("timestamp out of range: {at}")))
}

#[async_trait]
impl RevocationStore for PostgresPersistence {
    async fn revoke(&self, token: &str, expires_at: Option<OffsetDateTime>) -> AppResult<()> {
        let expires_at = expires_at.map(to_chrono).transpose()?;

        sqlx::query(
            r#"INSERT INTO revoked_tokens (token_hash, expires_at)
               VALUES ($1, $2)
               ON CONFLICT (token_hash) DO NOTHING"#,
        )
        .bind(fingerprint(token))
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> AppResult<bool> {
        let revoked: bool = sqlx::query_scalar(
            r#"SELECT EXISTS (SELECT 1 FROM revoked_tokens WHERE token_hash = $1)"#,
        )
        .bind(fingerprint(token))
        .fetch_one(&self.pool)
        .await?;

        Ok(revoked)
    }

    async fn purge_expired(&self, now: OffsetDateTime) -> AppResult<u64> {
        let result = sqlx::query(
            r#"DELETE FROM revoked_tokens WHERE expires_at IS NOT NULL AND expires_at <= $1"#,
        )
        .bind(to_chrono(now)?)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
