//! Configuration module.
//!
//! Sources merge in order defaults → config file → environment → CLI flags.

pub mod keybindings;
pub mod loader;

pub use keybindings::{KeyBindings, KeyBindingsConfig};
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, ConfigError, ConfigFile,
    ResolvedConfig, StyleSection, CONFIG_ENV, FIXED_TITLE_ENV, FONT_SIZE_ENV,
};
