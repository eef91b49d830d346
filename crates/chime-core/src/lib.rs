//! Shared foundation for the chime workspace: reminder domain types, process
//! configuration, and the persisted mail-settings document.

pub mod config;
pub mod error;
pub mod reminder;
pub mod settings;

pub use config::ChimeConfig;
pub use error::{ChimeError, Result};
pub use reminder::{Notification, NotificationKind, ReminderCandidate};
pub use settings::{MailSettings, SettingsStore, SharedMailSettings};
