use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use super::{FormatHandler, LEVEL_KEYS, MESSAGE_KEYS, TIME_KEYS};
use crate::coerce::display_value;
use crate::model::Entry;
use crate::options::RenderOptions;
use crate::render::render_entry;
use crate::timeparse;

/// Byte patterns the pre-filter looks for before any decode is attempted.
const TIME_MARKERS: [&[u8]; 3] = [b"\"time\":", b"\"ts\":", b"\"timestamp\":"];

/// Handler for JSON-object log lines (logrus/zap/slog style).
pub struct JsonHandler {
    opts: Arc<RenderOptions>,
    entry: Entry,
    /// Fields of the previous successful render, for change suppression.
    last: HashMap<String, String>,
}

impl JsonHandler {
    pub fn new(opts: Arc<RenderOptions>) -> Self {
        Self {
            opts,
            entry: Entry::new(),
            last: HashMap::new(),
        }
    }
}

impl FormatHandler for JsonHandler {
    fn name(&self) -> &'static str {
        "json"
    }

    fn can_accept(&self, line: &[u8]) -> bool {
        TIME_MARKERS
            .iter()
            .any(|marker| contains_subslice(line, marker))
    }

    fn accept(&mut self, line: &[u8]) -> bool {
        let mut raw = match serde_json::from_slice::<Value>(line) {
            Ok(Value::Object(map)) => map,
            _ => return false,
        };

        // First time alias found wins; a present-but-unrecognized value
        // rejects the whole line, an absent alias leaves the epoch default.
        let mut time = None;
        for key in TIME_KEYS {
            if let Some(value) = raw.remove(key) {
                match timeparse::parse_value(&value) {
                    Some(t) => time = Some(t),
                    None => return false,
                }
                break;
            }
        }

        let mut message = None;
        for key in MESSAGE_KEYS {
            // Only string-typed messages are hoisted; anything else stays
            // a regular field
            if matches!(raw.get(key), Some(Value::String(_))) {
                if let Some(Value::String(s)) = raw.remove(key) {
                    message = Some(s);
                }
                break;
            }
        }

        let mut level = None;
        for key in LEVEL_KEYS {
            if matches!(raw.get(key), Some(Value::String(_))) {
                if let Some(Value::String(s)) = raw.remove(key) {
                    level = Some(s);
                }
                break;
            }
        }

        // Commit only now that the line is fully recognized
        if let Some(t) = time {
            self.entry.time = t;
        }
        self.entry.message = message;
        if let Some(l) = level {
            self.entry.level = l;
        }
        for (key, value) in raw {
            self.entry.fields.insert(key, display_value(&value));
        }
        true
    }

    fn render(&mut self, suppress_unchanged: bool) -> Vec<u8> {
        let out = render_entry(&self.entry, &self.last, &self.opts, suppress_unchanged);
        self.last = self.entry.reset();
        out
    }
}

fn contains_subslice(haystack: &[u8], needle: &[u8]) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window == needle)
}
