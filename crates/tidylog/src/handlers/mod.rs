pub mod json;
pub mod logfmt;

pub use json::JsonHandler;
pub use logfmt::LogfmtHandler;

/// A stateful per-dialect recognizer, parser and renderer.
///
/// The dispatcher drives one handler instance per dialect through a
/// two-state cycle: idle (no entry buffered) and populated (entry buffered,
/// awaiting render).
pub trait FormatHandler: Send {
    /// Dialect name, for diagnostics only.
    fn name(&self) -> &'static str;

    /// Cheap pre-filter: may this handler own the line? Must not attempt a
    /// full structural parse; most lines in a real stream belong to some
    /// other dialect.
    fn can_accept(&self, line: &[u8]) -> bool;

    /// Full parse into the handler's buffered entry. Returns `false` (not
    /// an error) when the line turns out not to be this dialect after all;
    /// in that case the handler's state is left untouched.
    fn accept(&mut self, line: &[u8]) -> bool;

    /// Render the buffered entry, then snapshot its fields for change
    /// suppression and reset to idle. Callable even when level, time or
    /// message are absent; those render as their placeholders.
    fn render(&mut self, suppress_unchanged: bool) -> Vec<u8>;
}

/// Timestamp field aliases, in extraction priority order.
pub(crate) const TIME_KEYS: [&str; 3] = ["time", "ts", "timestamp"];

/// Message field aliases, in extraction priority order.
pub(crate) const MESSAGE_KEYS: [&str; 2] = ["msg", "message"];

/// Level field aliases, in extraction priority order.
pub(crate) const LEVEL_KEYS: [&str; 2] = ["level", "lvl"];
