use std::sync::Arc;

use crate::handlers::{FormatHandler, JsonHandler, LogfmtHandler};
use crate::options::{ConfigError, RenderOptions};
use crate::MAX_LINE_SIZE;

/// Routes each line to the dialect handler that recognizes it, or passes
/// it through verbatim when none does.
///
/// The handler that most recently accepted a line is tried first on the
/// next one, since consecutive lines usually come from the same logger.
/// The sticky preference is only updated on success.
pub struct Dispatcher {
    handlers: Vec<Box<dyn FormatHandler>>,
    sticky: Option<usize>,
    suppress_unchanged: bool,
}

impl Dispatcher {
    /// Build a dispatcher with the standard handler set (JSON first, then
    /// logfmt). Fails fast on contradictory options, before any line is
    /// processed.
    pub fn new(opts: RenderOptions) -> Result<Self, ConfigError> {
        opts.validate()?;
        let suppress_unchanged = opts.skip_unchanged;
        let opts = Arc::new(opts);
        let handlers: Vec<Box<dyn FormatHandler>> = vec![
            Box::new(JsonHandler::new(Arc::clone(&opts))),
            Box::new(LogfmtHandler::new(Arc::clone(&opts))),
        ];
        Ok(Self {
            handlers,
            sticky: None,
            suppress_unchanged,
        })
    }

    /// Process one raw line into output bytes. Never fails: a line no
    /// handler accepts comes back unmodified.
    pub fn process(&mut self, line: &[u8]) -> Vec<u8> {
        // Oversized lines are not worth offering to any handler
        if line.len() > MAX_LINE_SIZE {
            return line.to_vec();
        }

        if let Some(i) = self.sticky {
            let handler = &mut self.handlers[i];
            if handler.can_accept(line) && handler.accept(line) {
                return handler.render(self.suppress_unchanged);
            }
        }

        for i in 0..self.handlers.len() {
            if Some(i) == self.sticky {
                continue; // already tried
            }
            let handler = &mut self.handlers[i];
            if handler.can_accept(line) && handler.accept(line) {
                self.sticky = Some(i);
                return handler.render(self.suppress_unchanged);
            }
        }

        line.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(RenderOptions::default()).unwrap()
    }

    #[test]
    fn test_conflicting_options_rejected_up_front() {
        let mut opts = RenderOptions::default();
        opts.skip.insert("a".to_string());
        opts.keep.insert("b".to_string());
        assert!(matches!(
            Dispatcher::new(opts),
            Err(ConfigError::SkipKeepConflict)
        ));
    }

    #[test]
    fn test_unrecognized_line_passes_through_byte_for_byte() {
        let mut d = dispatcher();
        let line = b"not json at all";
        assert_eq!(d.process(line), line.to_vec());
        assert!(d.sticky.is_none());
    }

    #[test]
    fn test_json_line_is_rendered() {
        let mut d = dispatcher();
        let out = d.process(br#"{"ts":1700000000,"level":"info","msg":"hello"}"#);
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("INFO"), "got: {}", out);
        assert!(out.contains("hello"), "got: {}", out);
        assert_eq!(d.sticky, Some(0));
    }

    #[test]
    fn test_logfmt_line_is_rendered() {
        let mut d = dispatcher();
        let out = d.process(b"ts=1700000000 level=warn msg=careful");
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("WARN"), "got: {}", out);
        assert!(out.contains("careful"), "got: {}", out);
        assert_eq!(d.sticky, Some(1));
    }

    #[test]
    fn test_sticky_switches_between_dialects() {
        let mut d = dispatcher();
        d.process(br#"{"ts":1700000000,"msg":"json line"}"#);
        assert_eq!(d.sticky, Some(0));

        d.process(b"ts=1700000000 msg=logfmt-line");
        assert_eq!(d.sticky, Some(1));

        // Passthrough leaves the sticky preference alone
        d.process(b"plain text");
        assert_eq!(d.sticky, Some(1));
    }

    #[test]
    fn test_json_prefilter_marker_but_invalid_falls_through() {
        let mut d = dispatcher();
        // Passes the JSON pre-filter, fails the decode, has no '=' either:
        // must come back verbatim
        let line = br#"almost "time": but not json"#;
        assert_eq!(d.process(line), line.to_vec());
    }

    #[test]
    fn test_oversized_line_passes_through() {
        let mut d = dispatcher();
        let mut line = br#"{"ts":1700000000,"big":""#.to_vec();
        line.extend(std::iter::repeat(b'x').take(MAX_LINE_SIZE + 1));
        line.extend_from_slice(b"\"}");
        assert_eq!(d.process(&line), line);
    }

    #[test]
    fn test_suppression_end_to_end() {
        colored::control::set_override(false);
        let mut d = dispatcher();
        let _ = d.process(br#"{"ts":1700000000,"a":"1","b":"2"}"#);
        let out = d.process(br#"{"ts":1700000001,"a":"1","b":"3"}"#);
        let out = String::from_utf8(out).unwrap();

        assert!(!out.contains("a="), "got: {}", out);
        assert!(out.contains("b="), "got: {}", out);
    }
}
