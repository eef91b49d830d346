//! Reminder domain types shared between the filter/dispatch pipeline and
//! the gateway's HTTP surface.

use serde::{Deserialize, Serialize};

/// A schedule or task record that might warrant a reminder.
///
/// Candidates are assembled fresh on every check cycle by the upstream caller
/// (the timetable application reading its own rows). They carry no identity
/// beyond their fields: two checks over the same logical event produce two
/// independent, equal-by-value candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderCandidate {
    /// Display name of the event or task.
    pub title: String,
    /// Point in time the candidate refers to, as a `YYYY-MM-DD HH:MM:SS`
    /// literal. The filter parses it; unparseable values are classified per
    /// candidate instead of failing the batch.
    pub occurs_at: String,
    /// Free-text description.
    #[serde(default)]
    pub details: String,
    /// Destination address. May be empty, meaning "do not send": the mailer
    /// rejects an empty recipient before any transport work happens.
    #[serde(default)]
    pub recipient: String,
}

/// Category tag carried by every notification.
///
/// Only `Schedule` exists today. New kinds (task deadlines, exam countdowns)
/// extend this enum without touching the filter contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Schedule,
}

/// The send-ready representation of a candidate that passed the due-window
/// filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    /// The original timestamp literal, rendered verbatim in the message body.
    pub occurs_at: String,
    pub details: String,
    pub recipient: String,
}

impl Notification {
    /// Derive the notification for `candidate`: a 1:1 field copy tagged
    /// [`NotificationKind::Schedule`].
    pub fn from_candidate(candidate: &ReminderCandidate) -> Self {
        Self {
            kind: NotificationKind::Schedule,
            title: candidate.title.clone(),
            occurs_at: candidate.occurs_at.clone(),
            details: candidate.details.clone(),
            recipient: candidate.recipient.clone(),
        }
    }
}
