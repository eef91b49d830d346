//! Mail settings endpoints, GET and PUT /settings/mail.
//!
//! GET returns a redacted view; the password never leaves the process.
//! PUT replaces the whole document, persists it, and answers with the
//! updated view.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

use chime_core::MailSettings;

use crate::app::AppState;

#[derive(Serialize)]
pub struct MailSettingsView {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub sender_email: String,
    pub notification_enabled: bool,
    pub has_password: bool,
}

impl From<&MailSettings> for MailSettingsView {
    fn from(settings: &MailSettings) -> Self {
        Self {
            smtp_server: settings.smtp_server.clone(),
            smtp_port: settings.smtp_port,
            sender_email: settings.sender_email.clone(),
            notification_enabled: settings.notification_enabled,
            has_password: !settings.sender_password.is_empty(),
        }
    }
}

#[derive(Serialize)]
pub struct SettingsError {
    pub error: String,
}

/// GET /settings/mail: the current settings, password redacted.
pub async fn get_settings_handler(State(state): State<Arc<AppState>>) -> Json<MailSettingsView> {
    Json(MailSettingsView::from(&state.settings.snapshot()))
}

/// PUT /settings/mail: replace and persist the settings document.
pub async fn put_settings_handler(
    State(state): State<Arc<AppState>>,
    Json(settings): Json<MailSettings>,
) -> Result<Json<MailSettingsView>, (StatusCode, Json<SettingsError>)> {
    // Persist and publish as one serialized step; a failed write leaves the
    // live settings untouched.
    if let Err(e) = state.settings.replace_and_save(settings.clone(), &state.store) {
        error!(error = %e, "failed to persist mail settings");
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SettingsError {
                error: format!("Failed to persist settings: {}", e),
            }),
        ));
    }

    info!(
        enabled = settings.notification_enabled,
        smtp_server = %settings.smtp_server,
        "mail settings updated"
    );

    Ok(Json(MailSettingsView::from(&settings)))
}
