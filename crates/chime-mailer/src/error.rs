use thiserror::Error;

/// Errors that can occur while delivering a single message.
#[derive(Debug, Error)]
pub enum MailError {
    /// Sending is switched off in the mail settings.
    #[error("Notifications are disabled")]
    Disabled,

    /// The sender or recipient did not parse as a mailbox.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// The message itself could not be assembled.
    #[error("Failed to build message: {0}")]
    Build(String),

    /// The SMTP conversation failed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A send attempt exceeded its allowed time budget.
    #[error("Send timed out after {ms}ms")]
    Timeout { ms: u64 },
}
