use std::net::SocketAddr;
use std::str::FromStr;

use axum::http::HeaderValue;
use env_helpers::get_env_default;
use secrecy::SecretString;
use time::Duration;

use crate::{
    application::jwt::{TokenConfig, parse_hmac_algorithm},
    infra::error::InfraError,
};

pub const DEFAULT_ACCESS_TOKEN_TTL_MINUTES: i64 = 30;
/// Ten years.
pub const MAX_ACCESS_TOKEN_TTL_MINUTES: i64 = 10 * 365 * 24 * 60;

/// Where revoked tokens are recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevocationBackend {
    Postgres,
    Redis,
}

impl FromStr for RevocationBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" => Ok(RevocationBackend::Postgres),
            "redis" => Ok(RevocationBackend::Redis),
            other => Err(format!("unknown revocation backend '{other}'")),
        }
    }
}

pub struct AppConfig {
    pub token: TokenConfig,
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub cors_origin: HeaderValue,
    pub revocation_backend: RevocationBackend,
    pub redis_url: String,
    /// How often expired revocation records are purged.
    pub revocation_purge_interval_secs: u64,
    pub log_file: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, InfraError> {
        let token = token_config(|key| std::env::var(key).ok())?;

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| InfraError::ConfigMissing { var: "DATABASE_URL" })?;

        let bind_addr: SocketAddr =
            get_env_default("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3001)));
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .map_err(|_| InfraError::ConfigInvalid {
                    var: "CORS_ORIGIN",
                    reason: "not a valid header value".into(),
                })?;
        let revocation_backend: RevocationBackend =
            get_env_default("REVOCATION_BACKEND", String::from("postgres"))
                .parse()
                .map_err(|reason| InfraError::ConfigInvalid {
                    var: "REVOCATION_BACKEND",
                    reason,
                })?;
        let redis_url: String = get_env_default("REDIS_URL", "redis://127.0.0.1:6379".to_string());
        let revocation_purge_interval_secs: u64 =
            get_env_default("REVOCATION_PURGE_INTERVAL_SECS", 3600);
        let log_file: String = get_env_default("LOG_FILE", "app.log".to_string());

        Ok(Self {
            token,
            database_url,
            bind_addr,
            cors_origin,
            revocation_backend,
            redis_url,
            revocation_purge_interval_secs,
            log_file,
        })
    }
}

/// Reads the signing key, algorithm and access-token TTL.
///
/// A missing or empty `JWT_SECRET` is fatal. `ACCESS_TOKEN_TTL_MINUTES=0` is
/// accepted and yields tokens that are already expired when received; the
/// warning for it is logged from setup, once tracing is installed.
pub fn token_config(lookup: impl Fn(&str) -> Option<String>) -> Result<TokenConfig, InfraError> {
    let secret = lookup("JWT_SECRET")
        .filter(|s| !s.trim().is_empty())
        .ok_or(InfraError::ConfigMissing { var: "JWT_SECRET" })?;

    let algorithm_name = lookup("JWT_ALGORITHM").unwrap_or_else(|| "HS256".to_string());
    let algorithm =
        parse_hmac_algorithm(&algorithm_name).ok_or_else(|| InfraError::ConfigInvalid {
            var: "JWT_ALGORITHM",
            reason: format!("'{algorithm_name}' is not one of HS256, HS384, HS512"),
        })?;

    let ttl_minutes = match lookup("ACCESS_TOKEN_TTL_MINUTES") {
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|m| (0..=MAX_ACCESS_TOKEN_TTL_MINUTES).contains(m))
            .ok_or_else(|| InfraError::ConfigInvalid {
                var: "ACCESS_TOKEN_TTL_MINUTES",
                reason: format!(
                    "'{raw}' is not an integer between 0 and {MAX_ACCESS_TOKEN_TTL_MINUTES}"
                ),
            })?,
        None => DEFAULT_ACCESS_TOKEN_TTL_MINUTES,
    };

    Ok(TokenConfig {
        secret: SecretString::new(secret.into()),
        algorithm,
        access_token_ttl: Duration::minutes(ttl_minutes),
    })
}
