use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::{Theme, ThemeVariant};
use crate::keys::KeyBinding;

/// Runtime configuration for TUI behavior and appearance.
///
/// Holds all user preferences that affect how the TUI behaves. Loaded from
/// `<config_dir>/navstack/config.toml` when present, otherwise built from
/// defaults.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Visual theme (colors, styles)
    pub theme: Theme,

    /// Which palette the theme was built from
    pub variant: ThemeVariant,

    /// Global keybinds mapping action names to key combinations
    pub keybinds: HashMap<String, KeyBinding>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let mut keybinds = HashMap::new();
        keybinds.insert("quit".to_string(), KeyBinding::from_str("Ctrl+C").unwrap());

        Self {
            theme: Theme::new(ThemeVariant::default()),
            variant: ThemeVariant::default(),
            keybinds,
        }
    }
}

/// On-disk shape of the config file.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    theme: Option<String>,
    #[serde(default)]
    keybinds: HashMap<String, String>,
}

impl RuntimeConfig {
    /// Create a config with an explicit theme variant and default keybinds.
    pub fn with_variant(variant: ThemeVariant) -> Self {
        Self {
            theme: Theme::new(variant),
            variant,
            ..Self::default()
        }
    }

    /// Rebuild the theme for a newly detected background.
    pub fn with_detected_background(&self, dark: bool) -> Self {
        let variant = ThemeVariant::from_dark_flag(dark);
        Self {
            theme: Theme::new(variant),
            variant,
            keybinds: self.keybinds.clone(),
        }
    }

    /// Get a keybind by action name, falling back to the built-in default.
    pub fn get_keybind(&self, action: &str) -> Option<KeyBinding> {
        self.keybinds
            .get(action)
            .copied()
            .or_else(|| Self::default().keybinds.get(action).copied())
    }

    /// Default config file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("navstack").join("config.toml"))
    }

    /// Load config from the default location; missing file means defaults.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let file: ConfigFile = toml::from_str(&raw)
            .with_context(|| format!("invalid config at {}", path.display()))?;

        let mut config = Self::default();

        if let Some(theme) = file.theme {
            config.variant = match theme.to_ascii_lowercase().as_str() {
                "dark" => ThemeVariant::Dark,
                "light" => ThemeVariant::Light,
                other => anyhow::bail!("unknown theme '{}' (expected 'dark' or 'light')", other),
            };
            config.theme = Theme::new(config.variant);
        }

        for (action, binding) in file.keybinds {
            let binding = KeyBinding::from_str(&binding)
                .with_context(|| format!("invalid keybind for action '{}'", action))?;
            config.keybinds.insert(action, binding);
        }

        Ok(config)
    }
}
