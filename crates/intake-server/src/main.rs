use anyhow::{Context, Result};
use intake_server::activity::JsonLinesActivityLog;
use intake_server::store::JsonFileStore;
use intake_server::{app, AppConfig, AppState};
use intake_validation::ValidationConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("intake_server=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::load_default().unwrap_or_else(|e| {
        warn!("Failed to load config: {:#}, using defaults", e);
        AppConfig::default()
    });

    if ValidationConfig::install(config.validation.clone()).is_err() {
        warn!("validation config already installed, keeping the existing one");
    }

    info!(
        submissions = ?config.storage.submissions_dir,
        logs = ?config.storage.logs_dir,
        "storage configured"
    );

    let store = JsonFileStore::new(&config.storage.submissions_dir, config.storage.bcrypt_cost);
    let activity = JsonLinesActivityLog::new(&config.storage.logs_dir);
    let state = AppState::new(Arc::new(store), Arc::new(activity), Arc::new(config.clone()));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running at http://{}", addr);

    axum::serve(
        listener,
        app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server error")?;

    Ok(())
}
