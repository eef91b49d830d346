//! Manual reminder check endpoint, POST /reminders/check.
//!
//! The upstream timetable app posts its candidate records here. The gateway
//! classifies them against the lookahead window, mails the due subset, and
//! returns per-batch counts.
//!
//! Request: `{ "candidates": [...], "lookahead_hours": 24 }` with the hours
//! optional (default comes from `[reminders] lookahead_hours`).
//! Response: `{ "checked_count", "due_count", "sent_count", "message" }`.

use axum::{extract::State, Json};
use chrono::{Duration, Local};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use chime_core::config::DEFAULT_LOOKAHEAD_HOURS;
use chime_core::ReminderCandidate;
use chime_mailer::SmtpMailer;
use chime_reminders::{dispatch_all, filter, CandidateOutcome};

use crate::app::AppState;

#[derive(Deserialize)]
pub struct CheckRequest {
    pub candidates: Vec<ReminderCandidate>,
    /// Overrides the configured window for this request only.
    pub lookahead_hours: Option<i64>,
}

#[derive(Serialize)]
pub struct CheckResponse {
    pub checked_count: usize,
    pub due_count: usize,
    pub sent_count: usize,
    pub message: String,
}

/// Classify, mail, and summarize. Always answers with a summary; per-item
/// problems are logged and reflected in the counts, never turned into an
/// HTTP error.
pub async fn check_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CheckRequest>,
) -> Json<CheckResponse> {
    let (hours, window) = resolve_window(
        request.lookahead_hours,
        state.config.reminders.lookahead_hours,
    );
    let now = Local::now().naive_local();

    let outcomes = filter::evaluate(&request.candidates, window, now);

    let mut due = Vec::new();
    for (candidate, outcome) in request.candidates.iter().zip(&outcomes) {
        match outcome {
            CandidateOutcome::Included(notification) => due.push(notification.clone()),
            CandidateOutcome::Unparseable => {
                warn!(
                    title = %candidate.title,
                    occurs_at = %candidate.occurs_at,
                    "candidate timestamp did not parse, skipping"
                );
            }
            CandidateOutcome::OutOfWindow => {}
        }
    }

    let mailer = SmtpMailer::new(state.settings.snapshot(), state.send_options());
    let report = dispatch_all(&due, &mailer).await;

    let sent = report.sent_count();
    info!(
        checked = request.candidates.len(),
        due = due.len(),
        sent,
        lookahead_hours = hours,
        "reminder check complete"
    );

    Json(CheckResponse {
        checked_count: request.candidates.len(),
        due_count: due.len(),
        sent_count: sent,
        message: format!("Sent {} notification(s)", sent),
    })
}

/// Hour count and window actually used for a check.
///
/// Chrono cannot represent absurdly large hour counts, so an out-of-range
/// value falls back rather than aborting the request: request value first,
/// then the configured window, then the built-in default.
fn resolve_window(requested: Option<i64>, configured: i64) -> (i64, Duration) {
    if let Some(hours) = requested {
        match Duration::try_hours(hours) {
            Some(window) => return (hours, window),
            None => warn!(
                lookahead_hours = hours,
                "requested lookahead out of range, using configured window"
            ),
        }
    }
    match Duration::try_hours(configured) {
        Some(window) => (configured, window),
        None => {
            warn!(
                lookahead_hours = configured,
                "configured lookahead out of range, using built-in default"
            );
            (
                DEFAULT_LOOKAHEAD_HOURS,
                Duration::hours(DEFAULT_LOOKAHEAD_HOURS),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chime_core::{ChimeConfig, MailSettings, SettingsStore, SharedMailSettings};

    fn state() -> Arc<AppState> {
        let store = SettingsStore::new(
            std::env::temp_dir().join(format!("chime-check-{}.json", std::process::id())),
        );
        Arc::new(AppState::new(
            ChimeConfig::default(),
            SharedMailSettings::new(MailSettings::default()),
            store,
        ))
    }

    #[tokio::test]
    async fn oversized_lookahead_still_answers_with_a_summary() {
        let request = CheckRequest {
            candidates: Vec::new(),
            lookahead_hours: Some(i64::MAX),
        };

        let Json(response) = check_handler(State(state()), Json(request)).await;

        assert_eq!(response.checked_count, 0);
        assert_eq!(response.due_count, 0);
        assert_eq!(response.sent_count, 0);
        assert_eq!(response.message, "Sent 0 notification(s)");
    }

    #[test]
    fn window_resolution_falls_back_in_order() {
        let (hours, window) = resolve_window(Some(48), 24);
        assert_eq!(hours, 48);
        assert_eq!(window, Duration::hours(48));

        let (hours, window) = resolve_window(Some(i64::MAX), 24);
        assert_eq!(hours, 24);
        assert_eq!(window, Duration::hours(24));

        let (hours, _) = resolve_window(None, 24);
        assert_eq!(hours, 24);

        let (hours, window) = resolve_window(None, i64::MAX);
        assert_eq!(hours, DEFAULT_LOOKAHEAD_HOURS);
        assert_eq!(window, Duration::hours(DEFAULT_LOOKAHEAD_HOURS));

        let (hours, _) = resolve_window(Some(i64::MIN), i64::MAX);
        assert_eq!(hours, DEFAULT_LOOKAHEAD_HOURS);
    }
}
