//! Tests for configuration file loading.

use super::*;
use crate::model::{Color, KeyAction, KeyPress};
use serial_test::serial;
use std::env;
use std::fs;
use std::io;
use std::sync::{Arc, Mutex};

/// RAII guard to ensure environment variable cleanup
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(key: &'static str) -> Self {
        env::remove_var(key);
        Self(key)
    }

    fn set(&self, value: &str) {
        env::set_var(self.0, value);
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

/// Shared buffer a scoped fmt subscriber writes into.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    let text = String::from_utf8_lossy(&logs.0.lock().unwrap()).into_owned();
    (out, text)
}

fn temp_config(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("versecast_{}_{}.toml", name, std::process::id()));
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

#[test]
fn default_config_path_contains_versecast_config_toml() {
    let Some(path) = default_config_path() else {
        return;
    };
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("versecast") && path_str.ends_with("config.toml"),
        "Path should contain 'versecast' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let path = temp_config(
        "valid",
        r##"
library_path = "/srv/verses/kjv.json"

[style]
font_size_fraction = 9.5
text_color = "#f0f0f0"
fixed_title = false

[keys]
next_verse = "Control+Space"
"##,
    );

    let config = load_config_file(&path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(config) for existing file");

    assert_eq!(config.library_path, Some(PathBuf::from("/srv/verses/kjv.json")));
    let style = config.style.expect("style section");
    assert_eq!(style.font_size_fraction, Some(9.5));
    assert_eq!(style.text_color, Some(Color::rgb(0xf0, 0xf0, 0xf0)));
    assert_eq!(style.fixed_title, Some(false));
    assert_eq!(style.scroll_speed, None);
    assert_eq!(
        config.keys.and_then(|k| k.next_verse),
        Some("Control+Space".to_string())
    );

    fs::remove_file(&path).ok();
}

#[test]
fn load_config_file_reports_parse_error_with_path() {
    let path = temp_config("invalid", "[style\nfont_size_fraction = ");

    let result = load_config_file(&path);
    match result {
        Err(ConfigError::ParseError { path: p, .. }) => assert_eq!(p, path),
        other => panic!("Expected ParseError, got {:?}", other),
    }

    fs::remove_file(&path).ok();
}

#[test]
fn bad_color_in_style_is_a_parse_error() {
    let path = temp_config("badcolor", "[style]\ntext_color = \"white\"\n");
    assert!(matches!(
        load_config_file(&path),
        Err(ConfigError::ParseError { .. })
    ));
    fs::remove_file(&path).ok();
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("theme = \"dark\"\n");
    assert!(
        result.is_err(),
        "Should reject TOML with unknown fields due to deny_unknown_fields"
    );

    let result: Result<ConfigFile, _> = toml::from_str("[style]\nfont_colour = \"#ffffff\"\n");
    assert!(result.is_err(), "Unknown style keys are rejected too");
}

#[test]
fn merge_config_none_yields_defaults() {
    assert_eq!(merge_config(None), Ok(ResolvedConfig::default()));
}

#[test]
fn merge_config_applies_style_and_keeps_unset_fields() {
    let config = ConfigFile {
        style: Some(StyleSection {
            font_size_fraction: Some(12.0),
            scroll_speed: Some(1.0),
            ..Default::default()
        }),
        ..Default::default()
    };

    let resolved = merge_config(Some(config)).unwrap();
    let defaults = PresentationStyle::default();
    assert_eq!(resolved.style.font_size_fraction, 12.0);
    assert_eq!(resolved.style.scroll_speed, 1.0);
    assert_eq!(resolved.style.text_color, defaults.text_color);
    assert_eq!(resolved.style.fixed_title, defaults.fixed_title);
}

#[test]
fn merge_config_ignores_non_positive_numbers() {
    let config = ConfigFile {
        style: Some(StyleSection {
            font_size_fraction: Some(0.0),
            line_height_multiplier: Some(-1.0),
            ..Default::default()
        }),
        ..Default::default()
    };

    let resolved = merge_config(Some(config)).unwrap();
    assert_eq!(resolved.style, PresentationStyle::default());
}

#[test]
fn merge_config_builds_key_bindings() {
    let config = ConfigFile {
        keys: Some(KeyBindingsConfig {
            clear_highlight: Some("Backspace".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    };

    let resolved = merge_config(Some(config)).unwrap();
    assert_eq!(
        resolved.key_bindings.get(&KeyPress::plain("Backspace")),
        Some(KeyAction::ClearHighlight)
    );
}

#[test]
fn merge_config_rejects_bad_key_binding() {
    let config = ConfigFile {
        keys: Some(KeyBindingsConfig {
            prev_verse: Some("Turbo+Up".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    };

    assert_eq!(
        merge_config(Some(config)),
        Err(ConfigError::InvalidKeyBinding("Turbo+Up".to_string()))
    );
}

#[test]
#[serial(versecast_env)]
fn env_font_size_overrides_config_file() {
    let guard = EnvGuard::new(FONT_SIZE_ENV);
    guard.set("11");

    let config = ResolvedConfig {
        style: PresentationStyle {
            font_size_fraction: 9.0,
            ..Default::default()
        },
        ..Default::default()
    };
    let config = apply_env_overrides(config);
    assert_eq!(config.style.font_size_fraction, 11.0);
}

#[test]
#[serial(versecast_env)]
fn env_font_size_rejects_garbage() {
    let guard = EnvGuard::new(FONT_SIZE_ENV);

    for raw in ["huge", "-3", "0", "NaN"] {
        guard.set(raw);
        let config = apply_env_overrides(ResolvedConfig::default());
        assert_eq!(
            config.style.font_size_fraction,
            PresentationStyle::default().font_size_fraction,
            "{raw} should be ignored"
        );
    }
}

#[test]
#[serial(versecast_env)]
fn env_fixed_title_accepts_bool_forms() {
    let guard = EnvGuard::new(FIXED_TITLE_ENV);

    guard.set("0");
    assert!(!apply_env_overrides(ResolvedConfig::default()).style.fixed_title);

    guard.set("TRUE");
    let scrolled = ResolvedConfig {
        style: PresentationStyle {
            fixed_title: false,
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(apply_env_overrides(scrolled).style.fixed_title);

    guard.set("maybe");
    assert!(apply_env_overrides(ResolvedConfig::default()).style.fixed_title);
}

#[test]
fn cli_overrides_have_highest_precedence() {
    let config = ResolvedConfig {
        library_path: Some(PathBuf::from("/from/config.json")),
        style: PresentationStyle {
            font_size_fraction: 11.0,
            ..Default::default()
        },
        ..Default::default()
    };

    let config = apply_cli_overrides(config, Some(PathBuf::from("/from/cli.json")), Some(6.5));
    assert_eq!(config.library_path, Some(PathBuf::from("/from/cli.json")));
    assert_eq!(config.style.font_size_fraction, 6.5);
}

#[test]
fn cli_overrides_absent_flags_change_nothing() {
    let config = ResolvedConfig::default();
    assert_eq!(apply_cli_overrides(config.clone(), None, None), config);
    assert_eq!(apply_cli_overrides(config.clone(), None, Some(-2.0)), config);
}

#[test]
fn cli_rejected_font_size_is_logged() {
    let (config, logs) = with_captured_logs(|| {
        apply_cli_overrides(ResolvedConfig::default(), None, Some(0.0))
    });
    assert_eq!(config.style.font_size_fraction, 8.0);
    assert!(logs.contains("WARN"), "got: {logs}");
    assert!(logs.contains("ignoring invalid --font-size"), "got: {logs}");

    let (_, quiet) = with_captured_logs(|| {
        apply_cli_overrides(ResolvedConfig::default(), None, Some(6.0))
    });
    assert!(quiet.is_empty(), "got: {quiet}");
}

#[test]
#[serial(versecast_env)]
fn load_config_with_precedence_prefers_explicit_path() {
    let guard = EnvGuard::new(CONFIG_ENV);
    let env_path = temp_config("env", "library_path = \"/env.json\"\n");
    let cli_path = temp_config("cli", "library_path = \"/cli.json\"\n");
    guard.set(&env_path.to_string_lossy());

    let config = load_config_with_precedence(Some(cli_path.clone()))
        .unwrap()
        .unwrap();
    assert_eq!(config.library_path, Some(PathBuf::from("/cli.json")));

    let config = load_config_with_precedence(None).unwrap().unwrap();
    assert_eq!(config.library_path, Some(PathBuf::from("/env.json")));

    fs::remove_file(&env_path).ok();
    fs::remove_file(&cli_path).ok();
}

#[test]
#[serial(versecast_env)]
fn load_config_with_precedence_missing_env_file_is_none() {
    let guard = EnvGuard::new(CONFIG_ENV);
    guard.set("/nonexistent/versecast/config.toml");

    assert_eq!(load_config_with_precedence(None), Ok(None));
}
