//! Test-mail endpoint, POST /mail/test.
//!
//! Sends a fixed message through the live mailer so operators can verify
//! their SMTP settings without waiting for a real reminder.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

use chime_mailer::{MailError, Mailer, SmtpMailer};

use crate::app::AppState;

const TEST_SUBJECT: &str = "Test Notification - Chime";

const TEST_BODY: &str = "<html>\n\
    <body>\n\
    <h2>Test Notification Successful!</h2>\n\
    <p>This is a test email from your Chime reminder service.</p>\n\
    <p>Your notification system is working correctly.</p>\n\
    <p>You will receive reminders for:</p>\n\
    <ul>\n\
    <li>Upcoming classes</li>\n\
    <li>Assignment deadlines</li>\n\
    <li>Exam schedules</li>\n\
    </ul>\n\
    </body>\n\
    </html>\n";

#[derive(Deserialize)]
pub struct TestMailRequest {
    pub recipient: String,
}

#[derive(Serialize)]
pub struct TestMailError {
    pub error: String,
}

/// POST /mail/test: send the fixed test message to `recipient`.
///
/// 409 when notifications are disabled, 400 on a bad address, 500 when the
/// relay rejects the message or the attempt times out.
pub async fn test_mail_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TestMailRequest>,
) -> Result<Json<Value>, (StatusCode, Json<TestMailError>)> {
    let mailer = SmtpMailer::new(state.settings.snapshot(), state.send_options());

    match mailer.send(&request.recipient, TEST_SUBJECT, TEST_BODY).await {
        Ok(()) => Ok(Json(json!({ "sent": true }))),
        Err(e) => {
            let status = match &e {
                MailError::Disabled => StatusCode::CONFLICT,
                MailError::InvalidAddress(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            warn!(recipient = %request.recipient, error = %e, "test mail failed");
            Err((status, Json(TestMailError { error: e.to_string() })))
        }
    }
}
