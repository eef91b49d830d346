//! SMTP delivery over a STARTTLS relay.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, warn};

use chime_core::MailSettings;

use crate::error::MailError;
use crate::mailer::Mailer;

/// Pause between a failed attempt and its retry.
const RETRY_DELAY: Duration = Duration::from_millis(250);

/// Per-send limits applied by [`SmtpMailer`].
#[derive(Debug, Clone, Copy)]
pub struct SendOptions {
    /// Upper bound on one SMTP attempt, connection setup included.
    pub timeout: Duration,
    /// Extra attempts after a transport failure or timeout. Zero means one
    /// attempt total.
    pub retries: u32,
}

impl Default for SendOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            retries: 0,
        }
    }
}

/// [`Mailer`] backed by an SMTP relay speaking STARTTLS.
///
/// Construction never fails; address and transport validation happen per
/// send, so a misconfigured mailer degrades to per-message errors instead of
/// taking down whoever holds it.
pub struct SmtpMailer {
    settings: MailSettings,
    options: SendOptions,
}

impl SmtpMailer {
    pub fn new(settings: MailSettings, options: SendOptions) -> Self {
        Self { settings, options }
    }

    /// One relay session per send, matching how sessions are scoped upstream.
    fn build_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.settings.smtp_server)
                .map_err(|e| MailError::Transport(e.to_string()))?
                .port(self.settings.smtp_port);
        if !self.settings.sender_email.is_empty() && !self.settings.sender_password.is_empty() {
            builder = builder.credentials(Credentials::new(
                self.settings.sender_email.clone(),
                self.settings.sender_password.clone(),
            ));
        }
        Ok(builder.build())
    }

    async fn attempt(&self, message: Message) -> Result<(), MailError> {
        let transport = self.build_transport()?;
        match tokio::time::timeout(self.options.timeout, transport.send(message)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(MailError::Transport(e.to_string())),
            Err(_) => Err(MailError::Timeout {
                ms: self.options.timeout.as_millis() as u64,
            }),
        }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    fn name(&self) -> &str {
        "smtp"
    }

    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        body_html: &str,
    ) -> Result<(), MailError> {
        // The enabled gate comes first: a disabled mailer must not parse
        // addresses, build transports, or open connections.
        if !self.settings.notification_enabled {
            return Err(MailError::Disabled);
        }

        let to: Mailbox = recipient
            .parse()
            .map_err(|_| MailError::InvalidAddress(recipient.to_string()))?;
        let from: Mailbox = self
            .settings
            .sender_email
            .parse()
            .map_err(|_| MailError::InvalidAddress(self.settings.sender_email.clone()))?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(body_html.to_string())
            .map_err(|e| MailError::Build(e.to_string()))?;

        let mut attempts_left = self.options.retries;
        loop {
            match self.attempt(message.clone()).await {
                Ok(()) => {
                    debug!(recipient = %recipient, "message accepted by relay");
                    return Ok(());
                }
                Err(e @ (MailError::Transport(_) | MailError::Timeout { .. }))
                    if attempts_left > 0 =>
                {
                    attempts_left -= 1;
                    warn!(
                        recipient = %recipient,
                        error = %e,
                        attempts_left,
                        "send attempt failed, retrying"
                    );
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
