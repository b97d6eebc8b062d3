//! Configuration file loading with precedence handling.

use super::keybindings::{KeyBindings, KeyBindingsConfig};
use crate::model::{Color, PresentationStyle};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "VERSECAST_CONFIG";
/// Environment variable overriding the font size fraction.
pub const FONT_SIZE_ENV: &str = "VERSECAST_FONT_SIZE";
/// Environment variable overriding the fixed-title mode.
pub const FIXED_TITLE_ENV: &str = "VERSECAST_FIXED_TITLE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A `[keys]` entry does not describe a key press.
    #[error("Invalid key binding: {0}")]
    InvalidKeyBinding(String),
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/versecast/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Path to the JSON verse library.
    #[serde(default)]
    pub library_path: Option<PathBuf>,

    /// Presentation style overrides.
    #[serde(default)]
    pub style: Option<StyleSection>,

    /// Operator key bindings.
    #[serde(default)]
    pub keys: Option<KeyBindingsConfig>,
}

/// `[style]` section: every presentation style field, all optional.
///
/// ```toml
/// [style]
/// font_size_fraction = 9.5
/// text_color = "#f0f0f0"
/// fixed_title = false
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StyleSection {
    /// Font size as a percentage of viewport height.
    pub font_size_fraction: Option<f64>,
    /// Normal verse text color.
    pub text_color: Option<Color>,
    /// Canvas background.
    pub background_color: Option<Color>,
    /// Highlighted verse background tint.
    pub highlight_background_color: Option<Color>,
    /// Highlighted verse text color.
    pub highlight_text_color: Option<Color>,
    /// Line height multiplier.
    pub line_height_multiplier: Option<f64>,
    /// Pin the title band.
    pub fixed_title: Option<bool>,
    /// Wheel delta multiplier.
    pub scroll_speed: Option<f64>,
}

impl StyleSection {
    fn apply_to(self, style: &mut PresentationStyle) {
        let positive = |value: Option<f64>| value.filter(|v| v.is_finite() && *v > 0.0);
        if let Some(v) = positive(self.font_size_fraction) {
            style.font_size_fraction = v;
        }
        if let Some(v) = self.text_color {
            style.text_color = v;
        }
        if let Some(v) = self.background_color {
            style.background_color = v;
        }
        if let Some(v) = self.highlight_background_color {
            style.highlight_background_color = v;
        }
        if let Some(v) = self.highlight_text_color {
            style.highlight_text_color = v;
        }
        if let Some(v) = positive(self.line_height_multiplier) {
            style.line_height_multiplier = v;
        }
        if let Some(v) = self.fixed_title {
            style.fixed_title = v;
        }
        if let Some(v) = positive(self.scroll_speed) {
            style.scroll_speed = v;
        }
    }
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Verse library, if configured.
    pub library_path: Option<PathBuf>,
    /// Initial presentation style of both surfaces.
    pub style: PresentationStyle,
    /// Operator key bindings.
    pub key_bindings: KeyBindings,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            log_file_path: default_log_path(),
            library_path: None,
            style: PresentationStyle::default(),
            key_bindings: KeyBindings::default(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/versecast/versecast.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("versecast").join("versecast.log")
    } else {
        PathBuf::from("versecast.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    tracing::info!(path = %path.display(), "config file loaded");
    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/versecast/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("versecast").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `VERSECAST_CONFIG` environment variable
/// 3. Default path `~/.config/versecast/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `VERSECAST_FONT_SIZE`: positive number, font size fraction
/// - `VERSECAST_FIXED_TITLE`: `true`/`false`/`1`/`0`
///
/// Unparseable values are ignored with a warning.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(FONT_SIZE_ENV) {
        match raw.trim().parse::<f64>() {
            Ok(size) if size.is_finite() && size > 0.0 => config.style.font_size_fraction = size,
            _ => tracing::warn!(value = %raw, "ignoring invalid {FONT_SIZE_ENV}"),
        }
    }

    if let Ok(raw) = std::env::var(FIXED_TITLE_ENV) {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => config.style.fixed_title = true,
            "false" | "0" => config.style.fixed_title = false,
            _ => tracing::warn!(value = %raw, "ignoring invalid {FIXED_TITLE_ENV}"),
        }
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
/// Non-positive numbers in `[style]` keep their defaults.
///
/// # Errors
///
/// Returns `InvalidKeyBinding` if a `[keys]` entry does not parse.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let mut style = defaults.style;
    if let Some(section) = config.style {
        section.apply_to(&mut style);
    }

    let key_bindings = match config.keys {
        Some(keys) => KeyBindings::from_config(&keys)
            .map_err(|e| ConfigError::InvalidKeyBinding(e.0))?,
        None => defaults.key_bindings,
    };

    Ok(ResolvedConfig {
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        library_path: config.library_path.or(defaults.library_path),
        style,
        key_bindings,
    })
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    library_override: Option<PathBuf>,
    font_size_override: Option<f64>,
) -> ResolvedConfig {
    if let Some(library) = library_override {
        config.library_path = Some(library);
    }

    match font_size_override {
        Some(size) if size.is_finite() && size > 0.0 => config.style.font_size_fraction = size,
        Some(size) => tracing::warn!(size, "ignoring invalid --font-size"),
        None => {}
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
