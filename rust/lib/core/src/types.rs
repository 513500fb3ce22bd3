use chrono::{DateTime, Duration, Utc};

/// Generate a new random ID (UUIDv4, no dashes).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Current UTC time.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Next modification timestamp for a record last touched at `previous`.
///
/// Returns the current time, or one microsecond past `previous` when the
/// clock has not moved beyond it. Successive modifications of one record
/// therefore always carry strictly increasing timestamps.
pub fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let current = now();
    if current > previous {
        current
    } else {
        previous + Duration::microseconds(1)
    }
}
