/// Color and layout helpers shared by all dialect handlers.
///
/// Palette policy is kept out of the rendering logic: `style_for` and
/// `level_style` are pure `(role, background) -> Style` functions, and
/// `paint` is a pure `(style, text) -> styled text` function. Column
/// alignment is a stateless post-pass over the tokens of one rendered line.
use colored::{Color, Colorize};

/// Column width used by `align_columns` tab-stop emulation.
pub const TAB_WIDTH: usize = 8;

/// Output roles that carry their own color, independent of the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Time,
    Message,
    MessageAbsent,
    Key,
    Value,
}

/// A resolved style token: optional foreground and background colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl Style {
    pub const PLAIN: Style = Style { fg: None, bg: None };

    pub const fn fg(color: Color) -> Style {
        Style {
            fg: Some(color),
            bg: None,
        }
    }
}

/// Resolve the style for an output role under the given background mode.
pub fn style_for(role: Role, light_bg: bool) -> Style {
    match role {
        Role::Time | Role::Message => Style::PLAIN,
        Role::MessageAbsent => {
            if light_bg {
                Style::fg(Color::BrightBlack)
            } else {
                Style::fg(Color::BrightWhite)
            }
        }
        Role::Key => Style::fg(Color::Yellow),
        Role::Value => Style::fg(Color::BrightBlue),
    }
}

/// Resolve the style for a level label.
///
/// Only the exact lowercase labels below are mapped; anything else,
/// including the absent-level sentinel, gets the unknown style.
pub fn level_style(level: &str) -> Style {
    match level {
        "debug" => Style::fg(Color::Cyan),
        "info" => Style::fg(Color::Green),
        "warn" | "warning" => Style::fg(Color::Yellow),
        "error" => Style::fg(Color::Red),
        "fatal" | "panic" => Style {
            fg: Some(Color::BrightWhite),
            bg: Some(Color::BrightRed),
        },
        _ => Style::fg(Color::BrightBlack),
    }
}

/// Apply a style token to text.
pub fn paint(style: Style, text: &str) -> String {
    if style.fg.is_none() && style.bg.is_none() {
        return text.to_string();
    }
    let mut styled = text.normal();
    if let Some(fg) = style.fg {
        styled = styled.color(fg);
    }
    if let Some(bg) = style.bg {
        styled = styled.on_color(bg);
    }
    styled.to_string()
}

/// Count the characters a terminal will actually display, skipping ANSI
/// CSI sequences (`ESC [ ... <final byte 0x40-0x7E>`).
pub fn visible_width(s: &str) -> usize {
    let mut width = 0;
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if chars.next() == Some('[') {
                for terminator in chars.by_ref() {
                    if ('\x40'..='\x7e').contains(&terminator) {
                        break;
                    }
                }
            }
            continue;
        }
        width += 1;
    }
    width
}

/// Join one line's tokens, padding every token except the last with spaces
/// to the next `TAB_WIDTH` stop so consecutive lines align in a
/// fixed-width terminal. Widths are computed on visible characters, so
/// colored tokens align with plain ones.
pub fn align_columns(tokens: &[String]) -> String {
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        out.push_str(token);
        if i + 1 < tokens.len() {
            let width = visible_width(token);
            let pad = TAB_WIDTH - (width % TAB_WIDTH);
            for _ in 0..pad {
                out.push(' ');
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_style_known_labels() {
        assert_eq!(level_style("debug"), Style::fg(Color::Cyan));
        assert_eq!(level_style("info"), Style::fg(Color::Green));
        assert_eq!(level_style("warn"), Style::fg(Color::Yellow));
        assert_eq!(level_style("warning"), Style::fg(Color::Yellow));
        assert_eq!(level_style("error"), Style::fg(Color::Red));
        assert_eq!(level_style("fatal"), level_style("panic"));
    }

    #[test]
    fn test_level_style_unknown_labels() {
        let unknown = Style::fg(Color::BrightBlack);
        assert_eq!(level_style("???"), unknown);
        assert_eq!(level_style("INFO"), unknown); // exact match only
        assert_eq!(level_style("trace"), unknown);
    }

    #[test]
    fn test_message_absent_style_follows_background() {
        assert_ne!(
            style_for(Role::MessageAbsent, true),
            style_for(Role::MessageAbsent, false)
        );
    }

    #[test]
    fn test_paint_plain_style_is_identity() {
        assert_eq!(paint(Style::PLAIN, "hello"), "hello");
    }

    #[test]
    fn test_paint_colored_roundtrips_visible_width() {
        // Holds whether or not colored decides to emit escapes here
        let painted = paint(Style::fg(Color::Red), "abc");
        assert_eq!(visible_width(&painted), 3);
    }

    #[test]
    fn test_visible_width_skips_csi_sequences() {
        assert_eq!(visible_width("\x1b[32mHello\x1b[0m World"), 11);
        assert_eq!(visible_width("plain"), 5);
        assert_eq!(visible_width(""), 0);
        assert_eq!(visible_width("\x1b[0m\x1b[32m"), 0);
    }

    #[test]
    fn test_align_columns_pads_to_tab_stops() {
        let tokens = vec!["ab".to_string(), "cd".to_string(), "ef".to_string()];
        // 2 visible chars -> padded to the 8-column stop
        assert_eq!(align_columns(&tokens), "ab      cd      ef");
    }

    #[test]
    fn test_align_columns_full_width_token_gets_next_stop() {
        let tokens = vec!["12345678".to_string(), "x".to_string()];
        assert_eq!(align_columns(&tokens), "12345678        x");
    }

    #[test]
    fn test_align_columns_single_token_unpadded() {
        let tokens = vec!["only".to_string()];
        assert_eq!(align_columns(&tokens), "only");
    }
}
