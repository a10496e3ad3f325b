use chrono::{DateTime, Utc};

/// Wall-clock time in microseconds since the Unix epoch.
///
/// Producer timestamps (`grpc_recv_us`) are on the same scale, so the two can
/// be subtracted directly. Skew between the hosts shows up as a negative delta.
pub fn now_micros() -> i64 {
    Utc::now().timestamp_micros()
}

/// Converts a microsecond timestamp back into a UTC datetime for display.
pub fn from_micros(us: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_micros(us)
}
