use std::collections::HashMap;
use std::sync::Arc;

use super::{FormatHandler, LEVEL_KEYS, MESSAGE_KEYS, TIME_KEYS};
use crate::model::Entry;
use crate::options::RenderOptions;
use crate::render::render_entry;
use crate::timeparse;

/// Handler for logfmt `key=value` log lines (popular in Go services).
///
/// Structural sibling of the JSON handler: same hoisting rules, same
/// rendering, but values are kept verbatim since logfmt values are untyped
/// text.
pub struct LogfmtHandler {
    opts: Arc<RenderOptions>,
    entry: Entry,
    last: HashMap<String, String>,
}

impl LogfmtHandler {
    pub fn new(opts: Arc<RenderOptions>) -> Self {
        Self {
            opts,
            entry: Entry::new(),
            last: HashMap::new(),
        }
    }
}

impl FormatHandler for LogfmtHandler {
    fn name(&self) -> &'static str {
        "logfmt"
    }

    fn can_accept(&self, line: &[u8]) -> bool {
        line.contains(&b'=')
    }

    fn accept(&mut self, line: &[u8]) -> bool {
        let text = match std::str::from_utf8(line) {
            Ok(t) => t.trim(),
            Err(_) => return false,
        };

        let mut pairs: Vec<(String, String)> = Vec::new();
        for (key, value) in parse_pairs(text) {
            pairs.push((key, value));
        }
        if pairs.is_empty() {
            return false;
        }

        let mut time = None;
        for alias in TIME_KEYS {
            if let Some(pos) = pairs.iter().position(|(k, _)| k == alias) {
                let (_, value) = pairs.remove(pos);
                match timeparse::parse_str(&value) {
                    Some(t) => time = Some(t),
                    None => return false,
                }
                break;
            }
        }

        let mut message = None;
        for alias in MESSAGE_KEYS {
            if let Some(pos) = pairs.iter().position(|(k, _)| k == alias) {
                message = Some(pairs.remove(pos).1);
                break;
            }
        }

        let mut level = None;
        for alias in LEVEL_KEYS {
            if let Some(pos) = pairs.iter().position(|(k, _)| k == alias) {
                level = Some(pairs.remove(pos).1);
                break;
            }
        }

        if let Some(t) = time {
            self.entry.time = t;
        }
        self.entry.message = message;
        if let Some(l) = level {
            self.entry.level = l;
        }
        for (key, value) in pairs {
            self.entry.fields.insert(key, value);
        }
        true
    }

    fn render(&mut self, suppress_unchanged: bool) -> Vec<u8> {
        let out = render_entry(&self.entry, &self.last, &self.opts, suppress_unchanged);
        self.last = self.entry.reset();
        out
    }
}

/// Scan `key=value` pairs out of a line.
///
/// Bare tokens without `=` are skipped. Values may be double-quoted, with
/// backslash escapes; unquoted values run to the next whitespace.
fn parse_pairs(text: &str) -> impl Iterator<Item = (String, String)> + '_ {
    let mut chars = text.chars().peekable();

    std::iter::from_fn(move || {
        loop {
            while chars.peek().map_or(false, |c| c.is_whitespace()) {
                chars.next();
            }
            chars.peek()?;

            let mut key = String::new();
            while let Some(&c) = chars.peek() {
                if c == '=' || c.is_whitespace() {
                    break;
                }
                key.push(c);
                chars.next();
            }

            if key.is_empty() {
                // Leading '=' with no key; drop the char and resync
                chars.next();
                continue;
            }

            if chars.peek() != Some(&'=') {
                // Bare token, not a pair
                continue;
            }
            chars.next();

            let value = if chars.peek() == Some(&'"') {
                chars.next();
                let mut val = String::new();
                let mut escaped = false;
                for c in chars.by_ref() {
                    if escaped {
                        val.push(c);
                        escaped = false;
                    } else if c == '\\' {
                        escaped = true;
                    } else if c == '"' {
                        break;
                    } else {
                        val.push(c);
                    }
                }
                val
            } else {
                let mut val = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() {
                        break;
                    }
                    val.push(c);
                    chars.next();
                }
                val
            };

            return Some((key, value));
        }
    })
}
