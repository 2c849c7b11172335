//! Warranty window and human-readable identifier schemes.
//!
//! Warranty ids and repair ticket numbers share one convention:
//! `{PREFIX}-{YYYY}-{MM}-{NNNN}` with a 4-digit sequence scoped to the
//! year-month bucket. The sequence itself comes from an atomic counter in
//! the database; this module only formats and parses.

use chrono::{Datelike, Duration};

use crate::types::Timestamp;

/// Warranty window length. The expiry date shown to customers is computed
/// from this, so it is the single source of truth for the 90-day guarantee.
pub const WARRANTY_DAYS: i64 = 90;

/// Prefix for warranty identifiers (`WTY-2026-08-0001`).
pub const WARRANTY_ID_PREFIX: &str = "WTY";

/// Prefix for repair ticket numbers (`RT-2026-08-0001`).
pub const TICKET_PREFIX: &str = "RT";

/// Compute the warranty expiry from its issuance time.
pub fn expiry_from(issued_at: Timestamp) -> Timestamp {
    issued_at + Duration::days(WARRANTY_DAYS)
}

/// Year-month bucket key used to scope sequence counters, e.g. `"2026-08"`.
pub fn month_bucket(at: Timestamp) -> String {
    format!("{:04}-{:02}", at.year(), at.month())
}

/// Format a sequential identifier: `{prefix}-{YYYY}-{MM}-{NNNN}`.
///
/// # Examples
///
/// ```
/// use chrono::TimeZone;
/// use fixdesk_core::warranty::{sequential_id, WARRANTY_ID_PREFIX};
///
/// let at = chrono::Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
/// assert_eq!(sequential_id(WARRANTY_ID_PREFIX, at, 7), "WTY-2026-08-0007");
/// ```
pub fn sequential_id(prefix: &str, at: Timestamp, sequence: i64) -> String {
    format!("{prefix}-{:04}-{:02}-{sequence:04}", at.year(), at.month())
}

/// Parse the trailing sequence number out of a sequential identifier.
///
/// Returns `None` when the id does not follow the
/// `{prefix}-{YYYY}-{MM}-{NNNN}` shape.
pub fn parse_sequence(id: &str) -> Option<i64> {
    let seq = id.rsplit('-').next()?;
    if seq.len() != 4 {
        return None;
    }
    seq.parse().ok()
}

/// Expiry date in the `DD/MM/YYYY` form shown in pickup messages.
pub fn format_expiry_date(expires_at: Timestamp) -> String {
    expires_at.format("%d/%m/%Y").to_string()
}
