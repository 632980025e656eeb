use std::net::SocketAddr;
use std::time::Duration;

use dotenvy::dotenv;
use tracing::info;

use postboard::{
    adapters::http::app_state::AppState,
    infra::{
        app::create_app,
        config::AppConfig,
        setup::{init_app_state, init_tracing},
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(&config.log_file)?;

    let app_state = init_app_state(config).await?;

    // Read bind address from config before moving app_state
    let bind_addr = app_state.config.bind_addr;

    spawn_revocation_purge(app_state.clone());

    let app = create_app(app_state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("Backend listening at {}", &listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn spawn_revocation_purge(app_state: AppState) {
    let purge_every = app_state.config.revocation_purge_interval_secs.max(1);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(purge_every));
        loop {
            interval.tick().await;
            if let Err(err) = app_state
                .session_use_cases
                .purge_expired_revocations()
                .await
            {
                tracing::error!(error = ?err, "revocation purge failed");
            }
        }
    });
}
