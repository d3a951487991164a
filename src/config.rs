use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    #[serde(default = "default_theme_name")]
    pub theme: String,

    /// Whether the context menu offers 'Copy To' and 'Move To' commands
    #[serde(default = "default_true")]
    pub show_copy_move_menu: bool,

    /// Informational notices the user has dismissed with "don't show again"
    #[serde(default)]
    pub suppressed_notices: BTreeSet<String>,
}

fn default_theme_name() -> String {
    "dark".to_string()
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            show_copy_move_menu: true,
            suppressed_notices: BTreeSet::new(),
        }
    }
}

/// Desktop-wide settings shared with other applications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Whether context menus offer a permanent 'Delete' command
    #[serde(default = "default_false")]
    pub show_delete_command: bool,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            show_delete_command: false,
        }
    }
}

/// Per-service visibility overrides for the context menu.
///
/// A service missing from the map is shown; only explicit user choices are
/// persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceMenuSettings {
    #[serde(default)]
    pub show: BTreeMap<String, bool>,
}

/// Version control integration settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionControlSettings {
    /// Names of the version control plugins to load, in activation order
    #[serde(default)]
    pub enabled_plugins: Vec<String>,
}

impl GeneralSettings {
    pub const FILENAME: &'static str = "config.json";
}

impl GlobalSettings {
    pub const FILENAME: &'static str = "global.json";
}

impl ServiceMenuSettings {
    pub const FILENAME: &'static str = "servicemenu.json";
}

impl VersionControlSettings {
    pub const FILENAME: &'static str = "vcs.json";
}

/// Load a settings group from a JSON file
pub fn load_from_file<T, P>(path: P) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let contents = std::fs::read_to_string(path.as_ref())
        .map_err(|e| ConfigError::IoError(e.to_string()))?;

    serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Save a settings group to a JSON file
pub fn save_to_file<T, P>(value: &T, path: P) -> Result<(), ConfigError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let contents =
        serde_json::to_string_pretty(value).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path.as_ref(), contents).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
