//! `chime-reminders`: due-window filtering and mail dispatch for upcoming
//! timetable items.
//!
//! # Overview
//!
//! A check cycle runs two stages, both driven by the caller:
//!
//! 1. [`filter::evaluate`] classifies every candidate against a lookahead
//!    window anchored at a caller-supplied `now`.
//! 2. [`dispatch::dispatch_all`] renders each due notification and hands it
//!    to an injected [`Mailer`](chime_mailer::Mailer), recording one delivery
//!    outcome per notification.
//!
//! # Candidate classification
//!
//! | Outcome       | Meaning                                             |
//! |---------------|-----------------------------------------------------|
//! | `Included`    | Parsed, and strictly inside `(now, now + window]`   |
//! | `OutOfWindow` | Parsed, but past, exactly `now`, or beyond the window |
//! | `Unparseable` | Timestamp literal did not match [`filter::TIMESTAMP_FORMAT`] |

pub mod dispatch;
pub mod filter;
pub mod render;

pub use dispatch::{dispatch_all, DeliveryOutcome, DispatchReport};
pub use filter::{evaluate, select_due, CandidateOutcome, TIMESTAMP_FORMAT};
