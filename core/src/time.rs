//! Time related utils.

use chrono::Utc;

/// DateTime is the UTC date time used across appsign.
pub type DateTime = chrono::DateTime<Utc>;

/// Create a new DateTime with the current time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Seconds since the unix epoch, as used by `oauth_timestamp`.
pub fn unix_timestamp(time: DateTime) -> i64 {
    time.timestamp()
}

/// Parse a unix timestamp in seconds.
pub fn from_unix_timestamp(secs: i64) -> crate::Result<DateTime> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| {
        crate::Error::unexpected(format!("timestamp {secs} is out of range"))
    })
}
