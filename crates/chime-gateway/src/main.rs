use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

mod app;
mod http;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chime_gateway=info,tower_http=debug".into()),
        )
        .init();

    // load config: CHIME_CONFIG env > ~/.chime/chime.toml
    let config_path = std::env::var("CHIME_CONFIG").ok();
    let config = chime_core::ChimeConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
        warn!("Config load failed ({}), using defaults", e);
        chime_core::ChimeConfig::default()
    });

    let bind = config.gateway.bind.clone();
    let port = config.gateway.port;

    // mail settings document, created with defaults on first run
    let store = chime_core::SettingsStore::new(&config.mail.settings_path);
    let mail_settings = store.load()?;
    info!(
        path = %store.path().display(),
        enabled = mail_settings.notification_enabled,
        "mail settings loaded"
    );
    let settings = chime_core::SharedMailSettings::new(mail_settings);

    let state = Arc::new(app::AppState::new(config, settings, store));
    let router = app::build_router(state);

    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
    info!("Chime gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
