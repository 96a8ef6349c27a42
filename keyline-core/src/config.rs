// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! Editor tuning loaded from TOML. The keymap itself is fixed; only widths,
//! the comment prefix, timings and the platform are adjustable.
//!
//! ```toml
//! indent_width = 2
//! comment_prefix = "// "
//! chord_timeout_ms = 2000
//! highlight_delay_ms = 200
//! platform = "mac"
//! ```

use crate::chord::DEFAULT_CHORD_TIMEOUT_MS;
use crate::error::{Error, Result};
use crate::highlight::DEFAULT_HIGHLIGHT_DELAY_MS;
use crate::keys::Platform;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Spaces inserted by Tab and removed by Shift-Tab
    pub indent_width: usize,
    pub comment_prefix: String,
    pub chord_timeout_ms: u64,
    /// Quiet period before an edit burst counts as settled
    pub highlight_delay_ms: u64,
    /// Force the shortcut modifier; detected from the build target when unset
    pub platform: Option<Platform>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            comment_prefix: "// ".to_string(),
            chord_timeout_ms: DEFAULT_CHORD_TIMEOUT_MS,
            highlight_delay_ms: DEFAULT_HIGHLIGHT_DELAY_MS,
            platform: None,
        }
    }
}

impl EditorConfig {
    pub fn from_toml_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.indent_width == 0 {
            return Err(Error::ConfigValue("indent_width must be at least 1".into()));
        }
        if self.comment_prefix.is_empty() {
            return Err(Error::ConfigValue("comment_prefix must not be empty".into()));
        }
        if self.comment_prefix.contains('\n') {
            return Err(Error::ConfigValue(
                "comment_prefix must not contain a newline".into(),
            ));
        }
        Ok(())
    }

    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_else(Platform::detect)
    }

    pub fn chord_timeout(&self) -> Duration {
        Duration::from_millis(self.chord_timeout_ms)
    }

    pub fn highlight_delay(&self) -> Duration {
        Duration::from_millis(self.highlight_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.indent_width, 2);
        assert_eq!(config.comment_prefix, "// ");
        assert_eq!(config.chord_timeout(), Duration::from_millis(2000));
        assert_eq!(config.highlight_delay(), Duration::from_millis(200));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EditorConfig::from_toml_str("chord_timeout_ms = 500\nplatform = \"mac\"").unwrap();
        assert_eq!(config.chord_timeout_ms, 500);
        assert_eq!(config.platform(), Platform::Mac);
        assert_eq!(config.indent_width, 2);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(EditorConfig::from_toml_str("").unwrap(), EditorConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(EditorConfig::from_toml_str("tab_width = 4").is_err());
    }

    #[test]
    fn test_validate_rejects_zero_indent() {
        let config = EditorConfig {
            indent_width: 0,
            ..EditorConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::ConfigValue(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = EditorConfig::load(Path::new("/nonexistent/keyline.toml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
