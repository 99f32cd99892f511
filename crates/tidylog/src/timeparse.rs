use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

/// Unix timestamps above this are taken as milliseconds, not seconds.
const MILLIS_THRESHOLD: i64 = 1_000_000_000_000;

/// Recognize a timestamp in a decoded JSON value.
///
/// Strings go through the ordered format ladder of [`parse_str`]; numbers
/// are Unix timestamps (integers above `MILLIS_THRESHOLD` are milliseconds,
/// floats carry fractional seconds). First match wins; `None` means the
/// value is not a recognized encoding.
pub fn parse_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_str(s),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return from_unix(i);
            }
            n.as_f64().and_then(from_unix_secs_f64)
        }
        _ => None,
    }
}

/// Recognize a timestamp string, trying progressively looser formats:
/// RFC 3339, RFC 2822, `%Y-%m-%d %H:%M:%S%.f` (naive, assumed UTC), then
/// a string of digits as a Unix timestamp.
pub fn parse_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(i) = s.parse::<i64>() {
        return from_unix(i);
    }
    None
}

fn from_unix(ts: i64) -> Option<DateTime<Utc>> {
    if ts > MILLIS_THRESHOLD {
        DateTime::from_timestamp_millis(ts)
    } else {
        DateTime::from_timestamp(ts, 0)
    }
}

fn from_unix_secs_f64(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.trunc() as i64;
    if whole > MILLIS_THRESHOLD {
        return DateTime::from_timestamp_millis(whole);
    }
    let nanos = (secs.fract().abs() * 1e9) as u32;
    DateTime::from_timestamp(whole, nanos)
}
