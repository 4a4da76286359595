use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const PREFERENCES_FILENAME: &str = "preferences.toml";

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

/// Where the theme preference is kept between sessions
pub trait PreferenceStore {
    /// `None` when nothing has been saved yet
    fn load(&self) -> anyhow::Result<Option<Theme>>;
    fn save(&self, theme: Theme) -> anyhow::Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    theme: Option<Theme>,
}

/// Stores the preference in `preferences.toml` inside a settings directory
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    dir: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(PREFERENCES_FILENAME)
    }

    fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> anyhow::Result<Option<Theme>> {
        let path = self.path();
        if !path.exists() {
            tracing::debug!("No preferences file at {:?}", path);
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {:?}", path))?;
        let prefs: Preferences =
            toml::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(prefs.theme)
    }

    /// Atomic write: temp file, then rename
    fn save(&self, theme: Theme) -> anyhow::Result<()> {
        std::fs::create_dir_all(self.dir())
            .with_context(|| format!("Failed to create {:?}", self.dir()))?;

        let path = self.path();
        let temp_path = self.dir().join(".preferences.toml.tmp");

        let header = "# ANPR Reader user preferences\n\n";
        let content = toml::to_string_pretty(&Preferences { theme: Some(theme) })
            .context("Failed to serialize preferences")?;

        std::fs::write(&temp_path, format!("{}{}", header, content))
            .with_context(|| format!("Failed to write {:?}", temp_path))?;
        std::fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to rename {:?} to {:?}", temp_path, path))?;

        tracing::debug!("Saved preferences to {:?}", path);
        Ok(())
    }
}

/// Keeps the preference in memory only; nothing survives the process
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    value: Mutex<Option<Theme>>,
}

impl MemoryPreferenceStore {
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            value: Mutex::new(Some(theme)),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> anyhow::Result<Option<Theme>> {
        let value = self
            .value
            .lock()
            .map_err(|_| anyhow::anyhow!("preference store lock poisoned"))?;
        Ok(*value)
    }

    fn save(&self, theme: Theme) -> anyhow::Result<()> {
        let mut value = self
            .value
            .lock()
            .map_err(|_| anyhow::anyhow!("preference store lock poisoned"))?;
        *value = Some(theme);
        Ok(())
    }
}

/// The theme preference, scoped to whoever owns this value.
///
/// Read from the store once at construction; changed only through
/// [`set_theme`](Self::set_theme) or [`toggle`](Self::toggle), each of which
/// writes through to the store.
#[derive(Debug)]
pub struct ThemeSettings<S> {
    store: S,
    theme: Theme,
}

impl<S: PreferenceStore> ThemeSettings<S> {
    /// Initialize from the store. A missing or unreadable value gives the default theme.
    pub fn load(store: S) -> Self {
        let theme = match store.load() {
            Ok(Some(theme)) => theme,
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!("Failed to load theme preference: {:#}", e);
                Theme::default()
            }
        };
        tracing::debug!("Theme preference: {}", theme);
        Self { store, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Change the theme and persist it.
    ///
    /// The in-memory value changes even if persisting fails.
    pub fn set_theme(&mut self, theme: Theme) -> anyhow::Result<()> {
        self.theme = theme;
        self.store.save(theme)
    }

    pub fn toggle(&mut self) -> anyhow::Result<Theme> {
        let theme = self.theme.toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
