use std::fs::File;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::http::app_state::AppState,
    application::jwt::{TokenCodec, TokenConfig},
    infra::{
        InfraError,
        config::{AppConfig, RevocationBackend},
        password::Argon2PasswordHasher,
        postgres_persistence,
        revocation::RedisRevocationStore,
    },
    use_cases::{
        post::{PostRepo, PostUseCases},
        session::{RevocationStore, SessionUseCases},
        user::{PasswordHasher, UserRepo, UserUseCases},
        vote::{VoteRepo, VoteUseCases},
    },
};

pub async fn init_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    warn_on_zero_ttl(&config.token);

    let postgres_arc = Arc::new(postgres_persistence(&config.database_url).await?);

    let revocations: Arc<dyn RevocationStore> = match config.revocation_backend {
        RevocationBackend::Postgres => postgres_arc.clone() as Arc<dyn RevocationStore>,
        RevocationBackend::Redis => Arc::new(RedisRevocationStore::new(&config.redis_url).await?),
    };
    tracing::info!(backend = ?config.revocation_backend, "Revocation store ready");

    let codec = Arc::new(TokenCodec::new(&config.token));
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher);

    let session_use_cases = SessionUseCases::new(
        postgres_arc.clone() as Arc<dyn UserRepo>,
        hasher.clone(),
        codec,
        revocations,
    );
    let user_use_cases = UserUseCases::new(postgres_arc.clone() as Arc<dyn UserRepo>, hasher);
    let post_use_cases = PostUseCases::new(postgres_arc.clone() as Arc<dyn PostRepo>);
    let vote_use_cases = VoteUseCases::new(
        postgres_arc.clone() as Arc<dyn VoteRepo>,
        postgres_arc as Arc<dyn PostRepo>,
    );

    Ok(AppState {
        config: Arc::new(config),
        session_use_cases: Arc::new(session_use_cases),
        user_use_cases: Arc::new(user_use_cases),
        post_use_cases: Arc::new(post_use_cases),
        vote_use_cases: Arc::new(vote_use_cases),
    })
}

/// Runs after `init_tracing` so the warning reaches the configured layers.
fn warn_on_zero_ttl(token: &TokenConfig) {
    if token.access_token_ttl.is_zero() {
        tracing::warn!("ACCESS_TOKEN_TTL_MINUTES is 0; every issued token is already expired");
    }
}

/// Pretty console output plus structured JSON lines in `log_file`.
pub fn init_tracing(log_file: &str) -> Result<(), InfraError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "postboard=debug,tower_http=debug".into());

    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    let file = File::create(log_file).map_err(InfraError::LogFile)?;
    let json_layer = fmt::layer()
        .json()
        .with_writer(file)
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();

    Ok(())
}
