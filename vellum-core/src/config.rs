//! Vault configuration types.
//!
//! These are the resolved (non-optional) settings consumed by
//! `vellum-vault`. The host editor owns the configuration mechanism; this
//! module only defines the values and a TOML loader for hosts that keep
//! their vault settings in a file.
//!
//! ```toml
//! vault_root = "/home/user/notes"
//! note_extension = ".md"
//! slug_strategy = "kebab-case"
//! search_subdirectories = true
//! capture_section = "Quick Notes"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Filename normalization applied to parsed page names.
///
/// The wire names are `passthrough`, `kebab-case`, and `snake_case`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SlugStrategy {
    /// Page name used verbatim.
    #[default]
    Passthrough,
    /// Lowercase, word runs joined with `-`.
    KebabCase,
    /// Lowercase, word runs joined with `_`.
    #[serde(rename = "snake_case")]
    SnakeCase,
}

/// Resolved vault engine settings (all values filled with defaults).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultSettings {
    /// Vault root: empty (workspace itself), relative to the workspace,
    /// or an absolute local/remote path.
    #[serde(default)]
    pub vault_root: String,
    /// Extension appended to generated note file names, dot included.
    #[serde(default = "default_note_extension")]
    pub note_extension: String,
    #[serde(default)]
    pub slug_strategy: SlugStrategy,
    /// Whether note lookup walks the vault recursively instead of checking
    /// only the flat resolved location.
    #[serde(default)]
    pub search_subdirectories: bool,
    /// Level-2 heading captured lines are inserted under.
    #[serde(default = "default_capture_section")]
    pub capture_section: String,
    /// Initial content for notes created on first capture.
    #[serde(default)]
    pub note_template: String,
}

impl Default for VaultSettings {
    fn default() -> Self {
        Self {
            vault_root: String::new(),
            note_extension: default_note_extension(),
            slug_strategy: SlugStrategy::default(),
            search_subdirectories: false,
            capture_section: default_capture_section(),
            note_template: String::new(),
        }
    }
}

impl VaultSettings {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse settings from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(content)?;
        Ok(settings)
    }

    /// Serialize settings back to TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn default_note_extension() -> String {
    ".md".to_string()
}

fn default_capture_section() -> String {
    "Quick Notes".to_string()
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
