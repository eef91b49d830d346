use async_trait::async_trait;

use crate::error::MailError;

/// Outbound mail capability injected into the dispatch pipeline.
///
/// Implementations must be `Send + Sync` so one instance can serve
/// concurrent gateway requests.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Stable lowercase identifier for this sender (e.g. `"smtp"`).
    fn name(&self) -> &str;

    /// Deliver one message to `recipient`.
    ///
    /// Takes `&self` so callers can share a single mailer across tasks.
    /// Every failure is contained to [`MailError`]; no transport error type
    /// crosses this boundary.
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        body_html: &str,
    ) -> Result<(), MailError>;
}
