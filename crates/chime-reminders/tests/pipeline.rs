//! End-to-end check cycle: classify a candidate batch against a lookahead
//! window, then dispatch the due subset through a fake mailer.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime};

use chime_core::ReminderCandidate;
use chime_mailer::{MailError, Mailer};
use chime_reminders::{dispatch_all, select_due, DeliveryOutcome, TIMESTAMP_FORMAT};

struct RecordingMailer {
    disabled: bool,
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingMailer {
    fn sending() -> Self {
        Self {
            disabled: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    fn disabled() -> Self {
        Self {
            disabled: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        _body_html: &str,
    ) -> Result<(), MailError> {
        if self.disabled {
            return Err(MailError::Disabled);
        }
        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_string(), subject.to_string()));
        Ok(())
    }
}

fn candidate(title: &str, occurs_at: &str) -> ReminderCandidate {
    ReminderCandidate {
        title: title.to_string(),
        occurs_at: occurs_at.to_string(),
        details: String::new(),
        recipient: "student@example.com".to_string(),
    }
}

/// A morning's worth of records around `now = 2024-01-01 10:00:00`: one
/// already past, one due this evening, one just past tomorrow's window edge,
/// one starting right now.
fn mixed_batch() -> Vec<ReminderCandidate> {
    vec![
        candidate("Breakfast briefing", "2024-01-01 09:00:00"),
        candidate("Evening review", "2024-01-01 20:00:00"),
        candidate("Offsite planning", "2024-01-02 11:00:00"),
        candidate("Standup", "2024-01-01 10:00:00"),
    ]
}

fn ten_am() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2024-01-01 10:00:00", TIMESTAMP_FORMAT).unwrap()
}

#[tokio::test]
async fn due_items_within_a_day_are_selected_and_sent() {
    let due = select_due(&mixed_batch(), Duration::hours(24), ten_am());

    let titles: Vec<&str> = due.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["Evening review"]);

    let mailer = RecordingMailer::sending();
    let report = dispatch_all(&due, &mailer).await;

    assert_eq!(report.sent_count(), 1);
    assert_eq!(report.attempted(), 1);
    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "student@example.com");
    assert_eq!(sent[0].1, "Reminder: Evening review");
}

#[tokio::test]
async fn disabled_mailer_reports_disabled_not_failed() {
    let due = select_due(&mixed_batch(), Duration::hours(24), ten_am());
    assert!(!due.is_empty());

    let mailer = RecordingMailer::disabled();
    let report = dispatch_all(&due, &mailer).await;

    assert_eq!(report.sent_count(), 0);
    for outcome in &report.outcomes {
        assert_eq!(*outcome, DeliveryOutcome::Disabled);
        assert!(!matches!(outcome, DeliveryOutcome::Failed { .. }));
    }
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn widening_the_window_picks_up_the_later_item() {
    let due = select_due(&mixed_batch(), Duration::hours(26), ten_am());

    let titles: Vec<&str> = due.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["Evening review", "Offsite planning"]);
}
