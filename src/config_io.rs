//! Runtime configuration I/O operations.
//!
//! This module contains system directory detection and the settings store
//! that the services page reads from and commits to. It is the only place
//! that touches the settings files on disk.

use crate::config::{
    self, ConfigError, GeneralSettings, GlobalSettings, ServiceMenuSettings,
    VersionControlSettings,
};
use std::path::{Path, PathBuf};

/// Directory paths for settings and service discovery
///
/// Only the top-level `main` function should use `dirs::*` to construct this;
/// all other code should receive it by construction/parameter passing.
///
/// This design ensures:
/// - Tests can use isolated temp directories
/// - Parallel tests don't interfere with each other
/// - No hidden global state dependencies
#[derive(Debug, Clone)]
pub struct DirectoryContext {
    /// Config directory for user settings
    /// e.g., ~/.config/skiff on Linux
    pub config_dir: PathBuf,

    /// Data directory where service menus and plugins are installed
    /// e.g., ~/.local/share/skiff on Linux
    pub data_dir: PathBuf,
}

impl DirectoryContext {
    /// Create a DirectoryContext from the system directories
    /// This should ONLY be called from main()
    pub fn from_system() -> std::io::Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Could not determine config directory",
                )
            })?
            .join("skiff");

        let data_dir = dirs::data_dir()
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Could not determine data directory",
                )
            })?
            .join("skiff");

        Ok(Self {
            config_dir,
            data_dir,
        })
    }

    /// Create a DirectoryContext for testing with a temp directory
    /// All paths point to subdirectories within the provided temp_dir
    pub fn for_testing(temp_dir: &Path) -> Self {
        Self {
            config_dir: temp_dir.join("config"),
            data_dir: temp_dir.join("data"),
        }
    }

    /// Directory holding context-menu service menu desktop entries
    pub fn service_menus_dir(&self) -> PathBuf {
        self.data_dir.join("servicemenus")
    }

    /// Directory holding file-item-action plugin desktop entries
    pub fn file_item_actions_dir(&self) -> PathBuf {
        self.data_dir.join("fileitemactions")
    }

    /// Directory holding version control plugin desktop entries
    pub fn version_control_dir(&self) -> PathBuf {
        self.data_dir.join("vcsplugins")
    }

    pub fn general_settings_path(&self) -> PathBuf {
        self.config_dir.join(GeneralSettings::FILENAME)
    }

    pub fn global_settings_path(&self) -> PathBuf {
        self.config_dir.join(GlobalSettings::FILENAME)
    }

    pub fn service_menu_settings_path(&self) -> PathBuf {
        self.config_dir.join(ServiceMenuSettings::FILENAME)
    }

    pub fn version_control_settings_path(&self) -> PathBuf {
        self.config_dir.join(VersionControlSettings::FILENAME)
    }
}

/// Group-scoped settings store backed by JSON files.
///
/// Reads are served from memory; writes accumulate in memory until an
/// explicit [`SettingsStore::sync`]. Missing files resolve to defaults.
/// Last writer wins between concurrent processes.
#[derive(Debug)]
pub struct SettingsStore {
    dir_context: DirectoryContext,
    general: GeneralSettings,
    global: GlobalSettings,
    service_menu: ServiceMenuSettings,
    version_control: VersionControlSettings,
    dirty: bool,
}

impl SettingsStore {
    /// Open the store, loading every settings group that exists on disk.
    pub fn open(dir_context: DirectoryContext) -> Self {
        let general = load_or_default(&dir_context.general_settings_path());
        let global = load_or_default(&dir_context.global_settings_path());
        let service_menu = load_or_default(&dir_context.service_menu_settings_path());
        let version_control = load_or_default(&dir_context.version_control_settings_path());

        Self {
            dir_context,
            general,
            global,
            service_menu,
            version_control,
            dirty: false,
        }
    }

    pub fn dir_context(&self) -> &DirectoryContext {
        &self.dir_context
    }

    pub fn general(&self) -> &GeneralSettings {
        &self.general
    }

    pub fn global(&self) -> &GlobalSettings {
        &self.global
    }

    pub fn version_control(&self) -> &VersionControlSettings {
        &self.version_control
    }

    /// Persisted visibility for a service, if the user ever chose one
    pub fn service_shown(&self, id: &str) -> Option<bool> {
        self.service_menu.show.get(id).copied()
    }

    pub fn set_service_shown(&mut self, id: &str, shown: bool) {
        self.service_menu.show.insert(id.to_string(), shown);
        self.dirty = true;
    }

    pub fn set_show_delete_command(&mut self, shown: bool) {
        self.global.show_delete_command = shown;
        self.dirty = true;
    }

    pub fn set_show_copy_move_menu(&mut self, shown: bool) {
        self.general.show_copy_move_menu = shown;
        self.dirty = true;
    }

    pub fn set_enabled_vcs_plugins(&mut self, plugins: Vec<String>) {
        self.version_control.enabled_plugins = plugins;
        self.dirty = true;
    }

    pub fn is_notice_suppressed(&self, id: &str) -> bool {
        self.general.suppressed_notices.contains(id)
    }

    pub fn suppress_notice(&mut self, id: &str) {
        self.general.suppressed_notices.insert(id.to_string());
        self.dirty = true;
    }

    /// Flush all groups to disk if anything changed since the last sync.
    pub fn sync(&mut self) -> Result<(), ConfigError> {
        if !self.dirty {
            return Ok(());
        }

        std::fs::create_dir_all(&self.dir_context.config_dir)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        config::save_to_file(&self.general, self.dir_context.general_settings_path())?;
        config::save_to_file(&self.global, self.dir_context.global_settings_path())?;
        config::save_to_file(
            &self.service_menu,
            self.dir_context.service_menu_settings_path(),
        )?;
        config::save_to_file(
            &self.version_control,
            self.dir_context.version_control_settings_path(),
        )?;

        self.dirty = false;
        Ok(())
    }
}

fn load_or_default<T>(path: &Path) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    if !path.exists() {
        return T::default();
    }

    match config::load_from_file(path) {
        Ok(value) => {
            tracing::debug!("Loaded settings from {}", path.display());
            value
        }
        Err(e) => {
            tracing::warn!(
                "Failed to load settings from {}: {}, using defaults",
                path.display(),
                e
            );
            T::default()
        }
    }
}
