use serde_json::Value;

/// Fractional distance from an integer below which a float renders as one.
const INTEGER_TOLERANCE: f64 = 0.000_001;

/// Floats at or above this magnitude always render in float form.
const INTEGER_MAGNITUDE_LIMIT: f64 = 1e9;

/// Convert a decoded value of unknown runtime type into its canonical
/// display string.
///
/// Strings are quoted so a reader can tell `count=3` from `name="3"` at a
/// glance; numbers and everything else are not. Floats close enough to an
/// integer (and small enough for the integer form to be exact) render
/// without a fractional part.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return i.to_string();
            }
            if let Some(u) = n.as_u64() {
                return u.to_string();
            }
            let f = n.as_f64().unwrap_or(0.0);
            if (f - f.floor()) < INTEGER_TOLERANCE && f.abs() < INTEGER_MAGNITUDE_LIMIT {
                format!("{}", f as i64)
            } else {
                format!("{}", f)
            }
        }
        Value::String(s) => format!("{:?}", s),
        // Bool, null, nested objects and arrays: generic stringification
        // (compact JSON)
        other => other.to_string(),
    }
}
