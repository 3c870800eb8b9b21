//! Display preferences and their TOML persistence.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::PrefsError;
use crate::theme::{Theme, DEFAULT_THEME};

pub const MIN_FONT_SIZE: u32 = 10;
pub const MAX_FONT_SIZE: u32 = 30;
pub const DEFAULT_FONT_SIZE: u32 = 16;

/// Name of the per-directory preferences file.
pub const LOCAL_CONFIG_FILE: &str = "synapse.toml";

/// User display preferences.
///
/// Only `random_order` affects quiz behaviour, and only when a quiz starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Name of a built-in theme.
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
    /// Font size in points, clamped to `MIN_FONT_SIZE..=MAX_FONT_SIZE`.
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    /// Shuffle questions when a quiz starts.
    #[serde(default)]
    pub random_order: bool,
}

fn default_theme_name() -> String {
    DEFAULT_THEME.to_string()
}
fn default_font_size() -> u32 {
    DEFAULT_FONT_SIZE
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme_name: default_theme_name(),
            font_size: default_font_size(),
            random_order: false,
        }
    }
}

impl Preferences {
    /// The selected theme, or the default one if the name is unknown.
    pub fn theme(&self) -> &'static Theme {
        Theme::by_name(&self.theme_name).unwrap_or_else(Theme::default_theme)
    }

    /// Clamp the font size and replace an unknown theme name.
    fn sanitize(&mut self) {
        if Theme::by_name(&self.theme_name).is_none() {
            tracing::warn!("ignoring unknown theme '{}'", self.theme_name);
            self.theme_name = default_theme_name();
        }
        self.font_size = clamp_font_size(self.font_size);
    }
}

pub fn clamp_font_size(size: u32) -> u32 {
    size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "random" => Some(true),
        "0" | "false" | "no" | "off" | "original" => Some(false),
        _ => None,
    }
}

/// Apply `SYNAPSE_THEME`, `SYNAPSE_FONT_SIZE` and `SYNAPSE_RANDOM_ORDER`.
fn apply_env_overrides(prefs: &mut Preferences, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(theme) = lookup("SYNAPSE_THEME") {
        prefs.theme_name = theme;
    }
    if let Some(size) = lookup("SYNAPSE_FONT_SIZE") {
        match size.trim().parse() {
            Ok(size) => prefs.font_size = size,
            Err(_) => tracing::warn!("ignoring SYNAPSE_FONT_SIZE={size}"),
        }
    }
    if let Some(random) = lookup("SYNAPSE_RANDOM_ORDER") {
        match parse_bool(&random) {
            Some(random) => prefs.random_order = random,
            None => tracing::warn!("ignoring SYNAPSE_RANDOM_ORDER={random}"),
        }
    }
}

fn global_config_path() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|h| {
        PathBuf::from(h)
            .join(".config")
            .join("synapse")
            .join("prefs.toml")
    })
}

/// Find the preferences file to read.
///
/// Search order:
/// 1. `synapse.toml` in the current directory
/// 2. `~/.config/synapse/prefs.toml`
pub fn find_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }
    global_config_path().filter(|p| p.exists())
}

fn read_preferences(path: &Path) -> Result<Preferences> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read preferences: {}", path.display()))?;
    let mut prefs = toml::from_str::<Preferences>(&content)
        .with_context(|| format!("failed to parse preferences: {}", path.display()))?;
    prefs.sanitize();
    Ok(prefs)
}

/// Load preferences from well-known paths, then apply env overrides.
pub fn load_preferences() -> Result<Preferences> {
    load_preferences_from(None)
}

/// Load preferences from an explicit path, or search the default locations.
pub fn load_preferences_from(path: Option<&Path>) -> Result<Preferences> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("preferences file not found: {}", p.display()),
        None => find_config_path(),
    };

    let mut prefs = match config_path {
        Some(path) => read_preferences(&path)?,
        None => Preferences::default(),
    };

    apply_env_overrides(&mut prefs, |key| std::env::var(key).ok());
    prefs.sanitize();
    Ok(prefs)
}

/// Preferences bound to the file they are persisted in.
///
/// Every setter writes the file immediately.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
    prefs: Preferences,
}

impl PreferenceStore {
    /// Open the store at `path`, or at the first existing default location.
    ///
    /// A missing file yields default preferences; it is created on the first change.
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => find_config_path()
                .or_else(global_config_path)
                .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE)),
        };

        let prefs = if path.exists() {
            read_preferences(&path)?
        } else {
            Preferences::default()
        };

        Ok(Self { path, prefs })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn set_theme(&mut self, name: &str) -> Result<()> {
        let theme = Theme::by_name(name).ok_or_else(|| PrefsError::UnknownTheme(name.into()))?;
        self.prefs.theme_name = theme.name.to_string();
        self.save()
    }

    /// Store a font size, clamped to the supported range. Returns the stored value.
    pub fn set_font_size(&mut self, size: u32) -> Result<u32> {
        self.prefs.font_size = clamp_font_size(size);
        self.save()?;
        Ok(self.prefs.font_size)
    }

    pub fn set_random_order(&mut self, random_order: bool) -> Result<()> {
        self.prefs.random_order = random_order;
        self.save()
    }

    /// Write the preferences file, creating parent directories.
    pub fn save(&self) -> Result<()> {
        let content =
            toml::to_string_pretty(&self.prefs).context("failed to serialize preferences")?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, content)
            .with_context(|| format!("failed to write preferences to {}", self.path.display()))?;
        tracing::debug!("saved preferences to {}", self.path.display());
        Ok(())
    }
}
