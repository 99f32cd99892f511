use std::collections::HashSet;

use thiserror::Error;

/// Default truncation threshold for long field values.
pub const DEFAULT_TRUNCATE_LENGTH: usize = 100;

/// Default output time format (`Jan  2 15:04:05` style).
pub const DEFAULT_TIME_FORMAT: &str = "%b %e %H:%M:%S";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("skip keys and keep keys are mutually exclusive")]
    SkipKeepConflict,
}

/// Immutable rendering configuration, resolved once per run and shared by
/// every handler. Validated before any line is processed.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Field keys hidden from output. Mutually exclusive with `keep`.
    pub skip: HashSet<String>,
    /// When non-empty, the only field keys shown in output.
    pub keep: HashSet<String>,
    /// After the lexicographic sort, stable-sort key=value pairs by
    /// ascending length so short fields come first.
    pub sort_longest: bool,
    /// Hide fields whose value is unchanged from the previous entry.
    pub skip_unchanged: bool,
    /// Truncate field values longer than `truncate_length`.
    pub truncates: bool,
    pub truncate_length: usize,
    /// Palette for terminals with a light background.
    pub light_bg: bool,
    /// chrono format pattern for the time column.
    pub time_format: String,
}

impl RenderOptions {
    /// Fail fast on contradictory configuration (spec: checked before the
    /// first line, never per line).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.skip.is_empty() && !self.keep.is_empty() {
            return Err(ConfigError::SkipKeepConflict);
        }
        Ok(())
    }

    /// Visibility policy: a configured keep-set shows only its members;
    /// otherwise a configured skip-set hides its members; otherwise
    /// everything is shown.
    pub fn should_show_key(&self, key: &str) -> bool {
        if !self.keep.is_empty() {
            return self.keep.contains(key);
        }
        if !self.skip.is_empty() {
            return !self.skip.contains(key);
        }
        true
    }

    /// Keep-set membership overrides change suppression.
    pub fn should_show_unchanged(&self, key: &str) -> bool {
        self.keep.contains(key)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            skip: HashSet::new(),
            keep: HashSet::new(),
            sort_longest: true,
            skip_unchanged: true,
            truncates: false,
            truncate_length: DEFAULT_TRUNCATE_LENGTH,
            light_bg: false,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(keys: &[&str]) -> HashSet<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(RenderOptions::default().validate().is_ok());
    }

    #[test]
    fn test_skip_keep_conflict_rejected() {
        let opts = RenderOptions {
            skip: keys(&["a"]),
            keep: keys(&["b"]),
            ..Default::default()
        };
        assert!(matches!(
            opts.validate(),
            Err(ConfigError::SkipKeepConflict)
        ));
    }

    #[test]
    fn test_keep_set_shows_only_members() {
        let opts = RenderOptions {
            keep: keys(&["a"]),
            ..Default::default()
        };
        assert!(opts.should_show_key("a"));
        assert!(!opts.should_show_key("b"));
    }

    #[test]
    fn test_skip_set_hides_members() {
        let opts = RenderOptions {
            skip: keys(&["a"]),
            ..Default::default()
        };
        assert!(!opts.should_show_key("a"));
        assert!(opts.should_show_key("b"));
    }

    #[test]
    fn test_no_sets_shows_everything() {
        let opts = RenderOptions::default();
        assert!(opts.should_show_key("anything"));
    }

    #[test]
    fn test_keep_membership_overrides_suppression() {
        let opts = RenderOptions {
            keep: keys(&["a"]),
            ..Default::default()
        };
        assert!(opts.should_show_unchanged("a"));
        assert!(!opts.should_show_unchanged("b"));
    }
}
