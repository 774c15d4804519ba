//! Reminder clock: pure comparison of reminder instants against "now".
//!
//! # Responsibility
//! - Decide whether a reminder instant has passed at evaluation time.
//! - Render reminder instants for display (12-hour wall-clock time).
//!
//! # Invariants
//! - Comparison is stateless and recomputed per call; nothing is cached, so
//!   display state may flip between two successive renders.
//! - Formatting is presentation-only and never feeds back into comparison.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

/// Returns whether `reminder` is strictly earlier than `now`.
///
/// Equal instants have not passed. Pure; the wall clock never appears here,
/// which is what makes the passed/pending flip testable.
pub fn has_passed_at(reminder: &DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now > *reminder
}

/// Returns whether `reminder` lies in the past at this very call.
///
/// Monotonic for a fixed reminder: once true it stays true, because wall
/// clock time only moves forward between evaluations.
pub fn has_passed(reminder: &DateTime<Utc>) -> bool {
    has_passed_at(reminder, Utc::now())
}

/// Formats a reminder instant as local wall-clock time for list display.
///
/// Renders `hh:mm:ss AM|PM` in the viewer's local zone, matching the
/// 12-hour convention the host list view shows next to each todo.
pub fn format_reminder(reminder: &DateTime<Utc>) -> String {
    format_time_of_day(&reminder.with_timezone(&Local))
}

/// Zone-generic 12-hour rendering used by [`format_reminder`].
///
/// Split out so display formatting stays testable with fixed offsets
/// instead of the host machine's local zone.
pub fn format_time_of_day<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%I:%M:%S %p").to_string()
}
