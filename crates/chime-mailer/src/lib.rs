pub mod error;
pub mod mailer;
pub mod smtp;

pub use error::MailError;
pub use mailer::Mailer;
pub use smtp::{SendOptions, SmtpMailer};
