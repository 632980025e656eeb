//! Test app state builder for HTTP-level integration testing.
//!
//! `TestAppStateBuilder` wires a complete `AppState` over in-memory ports and
//! hands back the mocks so tests can inspect or pre-seed them.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use time::Duration;

use crate::{
    adapters::http::app_state::AppState,
    application::{
        jwt::{TokenCodec, TokenConfig},
        use_cases::{
            post::PostUseCases, session::SessionUseCases, user::UserUseCases,
            vote::VoteUseCases,
        },
    },
    infra::config::{AppConfig, RevocationBackend},
    test_utils::{
        InMemoryPostRepo, InMemoryRevocationStore, InMemoryUserRepo, InMemoryVoteRepo,
        PlainPasswordHasher, create_test_token_config,
    },
};

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Everything a route test needs: the state plus handles on its in-memory ports.
pub struct TestApp {
    pub state: AppState,
    pub codec: Arc<TokenCodec>,
    pub revocations: Arc<InMemoryRevocationStore>,
    pub posts: Arc<InMemoryPostRepo>,
}

impl TestApp {
    /// Registers `email` with [`TEST_PASSWORD`] and returns `(user_id, access_token)`.
    pub async fn register_and_login(&self, email: &str) -> (i64, String) {
        let user = self
            .state
            .user_use_cases
            .register(email, TEST_PASSWORD)
            .await
            .unwrap();
        let issued = self
            .state
            .session_use_cases
            .login(email, TEST_PASSWORD)
            .await
            .unwrap();
        (user.id, issued.access_token)
    }
}

/// Builder for creating `AppState` with in-memory mocks for testing.
///
/// # Example
///
/// ```ignore
/// let app = TestAppStateBuilder::new()
///     .with_token_ttl(Duration::minutes(10))
///     .build();
/// let (user_id, token) = app.register_and_login("user@example.com").await;
/// ```
pub struct TestAppStateBuilder {
    token: TokenConfig,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            token: create_test_token_config(|_| {}),
        }
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token.access_token_ttl = ttl;
        self
    }

    pub fn build(self) -> TestApp {
        let codec = Arc::new(TokenCodec::new(&self.token));
        let users = Arc::new(InMemoryUserRepo::new());
        let hasher = Arc::new(PlainPasswordHasher);
        let revocations = Arc::new(InMemoryRevocationStore::new());
        let posts = Arc::new(InMemoryPostRepo::new());
        let votes = Arc::new(InMemoryVoteRepo::new(posts.clone()));

        let config = AppConfig {
            token: self.token,
            database_url: "postgres://unused".to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            cors_origin: HeaderValue::from_static("http://localhost:3000"),
            revocation_backend: RevocationBackend::Postgres,
            redis_url: "redis://unused".to_string(),
            revocation_purge_interval_secs: 3600,
            log_file: "test.log".to_string(),
        };

        let state = AppState {
            config: Arc::new(config),
            session_use_cases: Arc::new(SessionUseCases::new(
                users.clone(),
                hasher.clone(),
                codec.clone(),
                revocations.clone(),
            )),
            user_use_cases: Arc::new(UserUseCases::new(users, hasher)),
            post_use_cases: Arc::new(PostUseCases::new(posts.clone())),
            vote_use_cases: Arc::new(VoteUseCases::new(votes, posts.clone())),
        };

        TestApp {
            state,
            codec,
            revocations,
            posts,
        }
    }
}
