//! Persistent settings
//!
//! Two files live in the settings directory (`~/.config/anpr-reader` by default):
//! - `config.toml` - read-only application configuration
//! - `preferences.toml` - the theme preference, rewritten on every change

mod config;
mod theme;

pub use config::{AppConfig, SimulationConfig, load_config, CONFIG_FILENAME};
pub use theme::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, Theme, ThemeSettings,
    PREFERENCES_FILENAME,
};

use std::path::PathBuf;

const APP_DIR: &str = "anpr-reader";

/// Default settings directory, falling back to the working directory
pub fn default_settings_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
