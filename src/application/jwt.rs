use std::str::FromStr;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};

/// Signing configuration for access tokens. Built once at startup and handed to the codec.
#[derive(Clone)]
pub struct TokenConfig {
    pub secret: SecretString,
    pub algorithm: Algorithm,
    pub access_token_ttl: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Invalid token")]
    Invalid,
}

/// Issues and decodes signed access tokens.
///
/// Decoding checks signature and structure only. Whether a token is still
/// within its lifetime is decided by the verifier.
#[derive(Clone)]
pub struct TokenCodec {
    algorithm: Algorithm,
    ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(config: &TokenConfig) -> Self {
        let secret = config.secret.expose_secret().as_bytes();

        let mut validation = Validation::new(config.algorithm);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            algorithm: config.algorithm,
            ttl: config.access_token_ttl,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, subject_id: i64) -> AppResult<String> {
        self.issue_at(subject_id, OffsetDateTime::now_utc())
    }

    pub fn issue_at(&self, subject_id: i64, now: OffsetDateTime) -> AppResult<String> {
        let iat = now.unix_timestamp();
        let exp = iat
            .checked_add(self.ttl.whole_seconds())
            .ok_or_else(|| AppError::Internal("token expiry out of range".into()))?;
        let claims = TokenClaims {
            user_id: Some(subject_id),
            exp,
            iat,
            jti: Some(Uuid::new_v4().to_string()),
        };
        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(e.to_string()))
    }

    pub fn decode(&self, token: &str) -> Result<TokenClaims, DecodeError> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token decode failed");
                DecodeError::Invalid
            })
    }
}

/// Parses a signing algorithm name, accepting only the shared-secret (HMAC) family.
pub fn parse_hmac_algorithm(name: &str) -> Option<Algorithm> {
    match Algorithm::from_str(name.trim()) {
        Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => Some(alg),
        _ => None,
    }
}

/// SHA-256 hex fingerprint of a raw token; the key revocation records are stored under.
pub fn fingerprint(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
