//! Due-window classification of reminder candidates.

use chime_core::{Notification, ReminderCandidate};
use chrono::{Duration, NaiveDateTime};

/// Wire format for candidate timestamps (e.g. `2024-01-01 18:30:00`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Classification of one candidate against the lookahead window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateOutcome {
    /// Due: strictly after `now` and no later than `now + window`.
    Included(Notification),
    /// Parsed fine but not due (past, exactly `now`, or beyond the window).
    OutOfWindow,
    /// The `occurs_at` literal did not parse. Excluded, never fatal.
    Unparseable,
}

/// Classify every candidate in `candidates`.
///
/// The result is index-aligned 1:1 with the input, so callers can report
/// exactly which records were malformed or out of range. Pure: `now` always
/// comes from the caller, which keeps the gateway the only place that reads
/// the wall clock.
pub fn evaluate(
    candidates: &[ReminderCandidate],
    window: Duration,
    now: NaiveDateTime,
) -> Vec<CandidateOutcome> {
    candidates
        .iter()
        .map(|candidate| {
            match NaiveDateTime::parse_from_str(&candidate.occurs_at, TIMESTAMP_FORMAT) {
                Ok(occurs_at) => {
                    let until = occurs_at - now;
                    // Lower bound exclusive, upper bound inclusive: an item
                    // at exactly `now` is already starting, not upcoming.
                    if Duration::zero() < until && until <= window {
                        CandidateOutcome::Included(Notification::from_candidate(candidate))
                    } else {
                        CandidateOutcome::OutOfWindow
                    }
                }
                Err(_) => CandidateOutcome::Unparseable,
            }
        })
        .collect()
}

/// The due notifications in input order.
///
/// Thin wrapper over [`evaluate`] for callers that only want the selected
/// subset, not the per-candidate classification.
pub fn select_due(
    candidates: &[ReminderCandidate],
    window: Duration,
    now: NaiveDateTime,
) -> Vec<Notification> {
    evaluate(candidates, window, now)
        .into_iter()
        .filter_map(|outcome| match outcome {
            CandidateOutcome::Included(notification) => Some(notification),
            _ => None,
        })
        .collect()
}
