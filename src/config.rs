//! Site configuration.
//!
//! Handles loading and validating `config.toml`. Everything is
//! optional; a missing file means stock defaults.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [version]
//! code = "kjv"              # Short version code, used in paths and JSON
//! name = "KJV"              # Display name (default: code uppercased)
//!
//! [html]
//! base_url = ""             # Prefix for absolute links, e.g. "https://user.github.io/bible"
//!
//! [favicon]
//! letter = "B"              # Single A-Z glyph
//! background = "#1a1a1a"
//! foreground = "#ffffff"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Pipeline configuration loaded from `config.toml`.
///
/// All fields have defaults; user config files need only override the
/// values they want. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub version: VersionConfig,
    pub html: HtmlConfig,
    pub favicon: FaviconConfig,
}

/// Bible version identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VersionConfig {
    /// Short code used in output paths and JSON (`kjv`, `web`, ...).
    pub code: String,
    /// Display name. Empty means "code uppercased".
    pub name: String,
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self {
            code: "kjv".to_string(),
            name: String::new(),
        }
    }
}

impl VersionConfig {
    /// Display name, falling back to the uppercased code.
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            self.code.to_uppercase()
        } else {
            self.name.clone()
        }
    }
}

/// HTML output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HtmlConfig {
    /// Prefix for absolute links. Empty means root-relative links.
    pub base_url: String,
}

/// Favicon style.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FaviconConfig {
    /// Single A-Z glyph drawn on the icon.
    pub letter: String,
    /// Background color, `#rrggbb`.
    pub background: String,
    /// Glyph color, `#rrggbb`.
    pub foreground: String,
}

impl Default for FaviconConfig {
    fn default() -> Self {
        Self {
            letter: "B".to_string(),
            background: "#1a1a1a".to_string(),
            foreground: "#ffffff".to_string(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version.code.is_empty()
            || !self.version.code.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(ConfigError::Validation(
                "version.code must be non-empty and alphanumeric".into(),
            ));
        }
        let letter = &self.favicon.letter;
        if letter.chars().count() != 1
            || !letter.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        {
            return Err(ConfigError::Validation(
                "favicon.letter must be a single A-Z character".into(),
            ));
        }
        for (key, value) in [
            ("favicon.background", &self.favicon.background),
            ("favicon.foreground", &self.favicon.foreground),
        ] {
            if parse_hex_color(value).is_none() {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a #rrggbb color, got {value:?}"
                )));
            }
        }
        Ok(())
    }
}

/// Parse `#rrggbb` into RGB components.
pub fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}

/// Load config from `path`, using defaults if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let config = if path.exists() {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_file_missing() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config.version.code, "kjv");
        assert_eq!(config.version.display_name(), "KJV");
        assert_eq!(config.favicon.letter, "B");
    }

    #[test]
    fn partial_config_overrides_only_named_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[version]\ncode = \"web\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.version.code, "web");
        assert_eq!(config.version.display_name(), "WEB");
        assert_eq!(config.favicon.background, "#1a1a1a");
    }

    #[test]
    fn explicit_name_wins_over_uppercased_code() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[version]\ncode = \"web\"\nname = \"World English Bible\"\n")
            .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.version.display_name(), "World English Bible");
    }

    #[test]
    fn unknown_keys_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "unknown_key = true\n").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn bad_color_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[favicon]\nbackground = \"dark\"\n").unwrap();

        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn multi_char_letter_rejected() {
        let config = SiteConfig {
            favicon: FaviconConfig {
                letter: "AB".to_string(),
                ..FaviconConfig::default()
            },
            ..SiteConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn hex_color_parsing() {
        assert_eq!(parse_hex_color("#1a1a1a"), Some([0x1a, 0x1a, 0x1a]));
        assert_eq!(parse_hex_color("#FFFFFF"), Some([255, 255, 255]));
        assert_eq!(parse_hex_color("1a1a1a"), None);
        assert_eq!(parse_hex_color("#fff"), None);
    }
}
