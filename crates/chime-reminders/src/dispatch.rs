//! Sequential, best-effort delivery of due notifications.

use chime_core::Notification;
use chime_mailer::{MailError, Mailer};
use tracing::{debug, info, warn};

use crate::render;

/// What happened to one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The mailer accepted the message.
    Sent,
    /// The mailer is switched off; nothing was attempted for this item.
    Disabled,
    /// The send failed; `reason` is the mailer's own description.
    Failed { reason: String },
}

/// Per-batch delivery record: one outcome per input notification, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub outcomes: Vec<DeliveryOutcome>,
}

impl DispatchReport {
    /// Number of notifications the mailer accepted.
    pub fn sent_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, DeliveryOutcome::Sent))
            .count()
    }

    /// Number of notifications handed to the dispatcher.
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }
}

/// Render and deliver every notification through `mailer`, sequentially and
/// in input order.
///
/// Best-effort: a failed send is recorded and the loop moves on, so one bad
/// recipient or a transport hiccup never costs the rest of the batch. This
/// function does not return an error; per-item diagnostics land in the
/// report and the log stream.
pub async fn dispatch_all(notifications: &[Notification], mailer: &dyn Mailer) -> DispatchReport {
    let mut outcomes = Vec::with_capacity(notifications.len());

    for notification in notifications {
        let subject = render::subject(notification);
        let body = render::body_html(notification);

        match mailer.send(&notification.recipient, &subject, &body).await {
            Ok(()) => {
                info!(
                    mailer = mailer.name(),
                    recipient = %notification.recipient,
                    title = %notification.title,
                    "notification sent"
                );
                outcomes.push(DeliveryOutcome::Sent);
            }
            Err(MailError::Disabled) => {
                debug!(title = %notification.title, "notifications disabled, skipping");
                outcomes.push(DeliveryOutcome::Disabled);
            }
            Err(e) => {
                warn!(
                    mailer = mailer.name(),
                    recipient = %notification.recipient,
                    title = %notification.title,
                    error = %e,
                    "notification delivery failed"
                );
                outcomes.push(DeliveryOutcome::Failed {
                    reason: e.to_string(),
                });
            }
        }
    }

    DispatchReport { outcomes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chime_core::ReminderCandidate;
    use std::sync::Mutex;

    /// Pops one scripted result per call and records what it was asked to send.
    struct ScriptedMailer {
        script: Mutex<Vec<Result<(), MailError>>>,
        calls: Mutex<Vec<(String, String, String)>>,
    }

    impl ScriptedMailer {
        fn new(script: Vec<Result<(), MailError>>) -> Self {
            Self {
                // Reversed so pop() yields results in scripted order.
                script: Mutex::new(script.into_iter().rev().collect()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(String, String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Mailer for ScriptedMailer {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn send(
            &self,
            recipient: &str,
            subject: &str,
            body_html: &str,
        ) -> Result<(), MailError> {
            self.calls.lock().unwrap().push((
                recipient.to_string(),
                subject.to_string(),
                body_html.to_string(),
            ));
            self.script.lock().unwrap().pop().unwrap_or(Ok(()))
        }
    }

    fn notification(title: &str) -> Notification {
        Notification::from_candidate(&ReminderCandidate {
            title: title.to_string(),
            occurs_at: "2024-01-01 18:30:00".to_string(),
            details: "bring notes".to_string(),
            recipient: "user@example.com".to_string(),
        })
    }

    #[tokio::test]
    async fn failure_mid_batch_does_not_stop_later_sends() {
        let mailer = ScriptedMailer::new(vec![
            Ok(()),
            Err(MailError::Transport("connection reset".to_string())),
            Ok(()),
            Ok(()),
            Ok(()),
        ]);
        let batch: Vec<Notification> =
            (1..=5).map(|i| notification(&format!("Item {i}"))).collect();

        let report = dispatch_all(&batch, &mailer).await;

        assert_eq!(report.attempted(), 5);
        assert_eq!(report.sent_count(), 4);
        assert!(matches!(report.outcomes[0], DeliveryOutcome::Sent));
        assert!(matches!(report.outcomes[1], DeliveryOutcome::Failed { .. }));
        assert!(matches!(report.outcomes[2], DeliveryOutcome::Sent));
        assert!(matches!(report.outcomes[3], DeliveryOutcome::Sent));
        assert!(matches!(report.outcomes[4], DeliveryOutcome::Sent));
        // Every item was still attempted.
        assert_eq!(mailer.calls().len(), 5);
    }

    #[tokio::test]
    async fn failed_outcome_carries_the_mailer_reason() {
        let mailer = ScriptedMailer::new(vec![Err(MailError::Timeout { ms: 10_000 })]);
        let report = dispatch_all(&[notification("Slow relay")], &mailer).await;

        match &report.outcomes[0] {
            DeliveryOutcome::Failed { reason } => assert!(reason.contains("10000ms")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn disabled_mailer_yields_disabled_outcomes_not_failures() {
        let mailer = ScriptedMailer::new(vec![
            Err(MailError::Disabled),
            Err(MailError::Disabled),
            Err(MailError::Disabled),
        ]);
        let batch: Vec<Notification> =
            (1..=3).map(|i| notification(&format!("Item {i}"))).collect();

        let report = dispatch_all(&batch, &mailer).await;

        assert_eq!(report.sent_count(), 0);
        assert_eq!(report.attempted(), 3);
        for outcome in &report.outcomes {
            assert_eq!(*outcome, DeliveryOutcome::Disabled);
        }
    }

    #[tokio::test]
    async fn rendered_subject_and_body_reach_the_mailer() {
        let mailer = ScriptedMailer::new(vec![Ok(())]);
        let report = dispatch_all(&[notification("Math lecture")], &mailer).await;

        assert_eq!(report.sent_count(), 1);
        let calls = mailer.calls();
        let (recipient, subject, body) = &calls[0];
        assert_eq!(recipient, "user@example.com");
        assert_eq!(subject, "Reminder: Math lecture");
        assert!(body.contains("<strong>Math lecture</strong>"));
        assert!(body.contains("bring notes"));
    }

    #[tokio::test]
    async fn empty_batch_yields_empty_report() {
        let mailer = ScriptedMailer::new(Vec::new());
        let report = dispatch_all(&[], &mailer).await;
        assert_eq!(report.attempted(), 0);
        assert_eq!(report.sent_count(), 0);
        assert!(mailer.calls().is_empty());
    }
}
