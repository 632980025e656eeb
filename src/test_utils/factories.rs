//! Test data factories with sensible defaults.
//!
//! Use the closure parameter to override specific fields as needed.

use time::Duration;

use crate::application::{jwt::TokenConfig, use_cases::post::NewPost};

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-0123456789abcdef";

/// Create a new-post payload with sensible defaults.
pub fn create_test_new_post(overrides: impl FnOnce(&mut NewPost)) -> NewPost {
    let mut post = NewPost {
        title: "My First Post".to_string(),
        content: "Excited...".to_string(),
        published: true,
    };
    overrides(&mut post);
    post
}

/// Create a token config signed with [`TEST_JWT_SECRET`] and a 30 minute TTL.
pub fn create_test_token_config(overrides: impl FnOnce(&mut TokenConfig)) -> TokenConfig {
    let mut config = TokenConfig {
        secret: secrecy::SecretString::new(TEST_JWT_SECRET.into()),
        algorithm: jsonwebtoken::Algorithm::HS256,
        access_token_ttl: Duration::minutes(30),
    };
    overrides(&mut config);
    config
}
