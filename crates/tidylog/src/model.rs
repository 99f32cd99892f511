use std::collections::HashMap;

use chrono::{DateTime, Utc};

/// Placeholder level label used when a line carries no level field.
pub const LEVEL_ABSENT: &str = "???";

/// One parsed log record, owned by the handler that accepted the line.
///
/// Valid only until the handler's next `clear`: rendering snapshots
/// `fields` into the handler's previous-fields map and resets the entry.
///
/// The keys hoisted into `level`, `time` and `message` during parsing
/// (`level`/`lvl`, `time`/`ts`/`timestamp`, `msg`/`message`) are removed
/// from the raw field set and never appear in `fields`.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Short level label; `LEVEL_ABSENT` when the line had none.
    pub level: String,

    /// Entry timestamp; `UNIX_EPOCH` when the line had none.
    pub time: DateTime<Utc>,

    /// Main log message. `None` is a distinct, renderable state, not an
    /// empty string.
    pub message: Option<String>,

    /// Remaining structured fields, coerced to display strings. Keys are
    /// unique; insertion order is irrelevant (rendering re-sorts).
    pub fields: HashMap<String, String>,
}

impl Entry {
    pub fn new() -> Self {
        Self {
            level: LEVEL_ABSENT.to_string(),
            time: DateTime::UNIX_EPOCH,
            message: None,
            fields: HashMap::new(),
        }
    }

    /// Reset to the idle state, handing the current fields back to the
    /// caller for use as the next change-suppression snapshot.
    pub fn reset(&mut self) -> HashMap<String, String> {
        self.level.clear();
        self.level.push_str(LEVEL_ABSENT);
        self.time = DateTime::UNIX_EPOCH;
        self.message = None;
        std::mem::take(&mut self.fields)
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_is_idle() {
        let entry = Entry::new();
        assert_eq!(entry.level, LEVEL_ABSENT);
        assert_eq!(entry.time, DateTime::UNIX_EPOCH);
        assert!(entry.message.is_none());
        assert!(entry.fields.is_empty());
    }

    #[test]
    fn test_reset_hands_back_fields() {
        let mut entry = Entry::new();
        entry.level = "info".to_string();
        entry.message = Some("hello".to_string());
        entry.fields.insert("a".to_string(), "1".to_string());

        let snapshot = entry.reset();

        assert_eq!(snapshot.get("a").map(String::as_str), Some("1"));
        assert_eq!(entry.level, LEVEL_ABSENT);
        assert!(entry.message.is_none());
        assert!(entry.fields.is_empty());
    }
}
