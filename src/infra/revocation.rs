use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};
use time::OffsetDateTime;

use super::InfraError;
use crate::{
    app_error::{AppError, AppResult},
    jwt::fingerprint,
    use_cases::session::RevocationStore,
};

/// Redis-backed revocation set. Each record expires with the token it revokes,
/// so there is nothing left to purge.
#[derive(Clone)]
pub struct RedisRevocationStore {
    manager: ConnectionManager,
}

impl RedisRevocationStore {
    pub async fn new(redis_url: &str) -> Result<Self, InfraError> {
        let client = redis::Client::open(redis_url).map_err(InfraError::RedisConnection)?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(InfraError::RedisConnection)?;
        Ok(Self { manager })
    }

    fn key(token: &str) -> String {
        format!("revoked:{}", fingerprint(token))
    }
}

/// Seconds a record must live to outlast its token. The remaining lifetime is
/// rounded up and padded by one second, since Redis counts whole seconds from
/// `now` while the verifier compares against `exp` itself.
fn record_ttl_secs(expires_at: OffsetDateTime, now: OffsetDateTime) -> u64 {
    let remaining = expires_at - now;
    let mut secs = remaining.whole_seconds();
    if remaining.subsec_nanoseconds() > 0 {
        secs += 1;
    }
    secs.max(0) as u64 + 1
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn revoke(&self, token: &str, expires_at: Option<OffsetDateTime>) -> AppResult<()> {
        let mut conn = self.manager.clone();
        let now = OffsetDateTime::now_utc();

        // NX keeps the first record; revoking again changes nothing.
        let mut cmd = redis::cmd("SET");
        cmd.arg(Self::key(token))
            .arg(now.unix_timestamp())
            .arg("NX");
        if let Some(expires_at) = expires_at {
            cmd.arg("EX").arg(record_ttl_secs(expires_at, now));
        }

        let _: Option<String> = cmd
            .query_async(&mut conn)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> AppResult<bool> {
        let mut conn = self.manager.clone();
        conn.exists(Self::key(token))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))
    }

    async fn purge_expired(&self, _now: OffsetDateTime) -> AppResult<u64> {
        Ok(0)
    }
}
