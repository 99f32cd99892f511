use std::collections::HashMap;
use std::fmt::Write as _;

use crate::color::{align_columns, level_style, paint, style_for, Role};
use crate::model::Entry;
use crate::options::RenderOptions;

/// Placeholder rendered when a line carried no message. Distinct from an
/// empty-string message, which renders as nothing.
pub const ABSENT_MESSAGE: &str = "<no msg>";

/// Marker appended to truncated field values.
pub const ELLIPSIS: &str = "...";

/// Maximum characters of the level label shown in the level column.
const LEVEL_WIDTH: usize = 4;

/// Render one parsed entry to output bytes.
///
/// `last` is the previous-fields snapshot of the handler that owns the
/// entry; it is consulted only when `suppress_unchanged` is set. The fixed
/// column order is time, bracketed level abbreviation, message, then the
/// sorted key=value pairs.
pub fn render_entry(
    entry: &Entry,
    last: &HashMap<String, String>,
    opts: &RenderOptions,
    suppress_unchanged: bool,
) -> Vec<u8> {
    let message = match &entry.message {
        Some(m) => paint(style_for(Role::Message, opts.light_bg), m),
        None => paint(style_for(Role::MessageAbsent, opts.light_bg), ABSENT_MESSAGE),
    };

    // Abbreviation always happens; color selection separately falls back
    // to the unknown style for unmapped labels.
    let abbrev: String = entry.level.to_uppercase().chars().take(LEVEL_WIDTH).collect();
    let level = paint(level_style(&entry.level), &abbrev);

    let time = paint(style_for(Role::Time, opts.light_bg), &format_time(entry, opts));

    let mut tokens = Vec::with_capacity(entry.fields.len() + 1);
    tokens.push(format!("{} |{}| {}", time, level, message));
    tokens.extend(join_kvs(entry, last, opts, suppress_unchanged));

    align_columns(&tokens).into_bytes()
}

fn format_time(entry: &Entry, opts: &RenderOptions) -> String {
    let mut text = String::new();
    if write!(&mut text, "{}", entry.time.format(&opts.time_format)).is_err() {
        // Unusable user pattern; fall back rather than fail the line
        return entry.time.to_rfc3339();
    }
    text
}

/// Filter, order and colorize the entry's fields as `key=value` tokens.
///
/// Ordering is two-phase on the plain (pre-color) strings: lexicographic
/// ascending, then, when enabled, a stability-preserving sort by ascending
/// length so short fields come first with deterministic ties.
fn join_kvs(
    entry: &Entry,
    last: &HashMap<String, String>,
    opts: &RenderOptions,
    suppress_unchanged: bool,
) -> Vec<String> {
    let mut kvs: Vec<(String, &str, String)> = Vec::with_capacity(entry.fields.len());

    for (key, value) in &entry.fields {
        if !opts.should_show_key(key) {
            continue;
        }
        if suppress_unchanged
            && !opts.should_show_unchanged(key)
            && last.get(key) == Some(value)
        {
            continue;
        }

        let shown = truncate(value, opts);
        kvs.push((format!("{}={}", key, shown), key.as_str(), shown));
    }

    kvs.sort_by(|a, b| a.0.cmp(&b.0));
    if opts.sort_longest {
        kvs.sort_by_key(|kv| kv.0.chars().count());
    }

    kvs.into_iter()
        .map(|(_, key, value)| {
            format!(
                "{}={}",
                paint(style_for(Role::Key, opts.light_bg), key),
                paint(style_for(Role::Value, opts.light_bg), &value),
            )
        })
        .collect()
}

/// Truncation applies to the value only, never the key, and happens before
/// coloring.
fn truncate(value: &str, opts: &RenderOptions) -> String {
    if opts.truncates && value.chars().count() > opts.truncate_length {
        let mut out: String = value.chars().take(opts.truncate_length).collect();
        out.push_str(ELLIPSIS);
        out
    } else {
        value.to_string()
    }
}
