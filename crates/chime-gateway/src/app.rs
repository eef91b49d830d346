use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};

use chime_core::{ChimeConfig, SettingsStore, SharedMailSettings};
use chime_mailer::SendOptions;

/// Central shared state, passed as `Arc<AppState>` to all Axum handlers.
pub struct AppState {
    pub config: ChimeConfig,
    /// Live mail settings; replaced wholesale by the settings endpoints.
    pub settings: SharedMailSettings,
    /// Persists the settings document across restarts.
    pub store: SettingsStore,
}

impl AppState {
    pub fn new(config: ChimeConfig, settings: SharedMailSettings, store: SettingsStore) -> Self {
        Self {
            config,
            settings,
            store,
        }
    }

    /// Send limits from process config, applied to every mailer the
    /// handlers build.
    pub fn send_options(&self) -> SendOptions {
        SendOptions {
            timeout: Duration::from_millis(self.config.reminders.send_timeout_ms),
            retries: self.config.reminders.send_retries,
        }
    }
}

/// Assemble the full Axum router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(crate::http::health::health_handler))
        .route("/reminders/check", post(crate::http::check::check_handler))
        .route(
            "/settings/mail",
            get(crate::http::settings::get_settings_handler)
                .put(crate::http::settings::put_settings_handler),
        )
        .route("/mail/test", post(crate::http::test_mail::test_mail_handler))
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}
