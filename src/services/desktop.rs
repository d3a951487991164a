//! Service-menu metadata read from desktop entries.
//!
//! Two shapes of entry exist: service menus, whose `Actions` groups each
//! describe one context-menu item, and plugin entries, where the entry
//! itself describes the plugin. Parsing is delegated to
//! `freedesktop-desktop-entry`; this module only extracts the fields the
//! services page needs.

use freedesktop_desktop_entry::{get_languages_from_env, DesktopEntry};
use std::path::Path;

/// Action name KDE-style service menus use for visual separators
pub const SEPARATOR_ACTION: &str = "_SEPARATOR_";

/// A service menu: optional submenu grouping plus its user-defined actions
#[derive(Debug, Clone)]
pub struct ServiceMenu {
    /// Submenu the actions are grouped under, if the entry declares one
    pub submenu: Option<String>,
    pub actions: Vec<ServiceAction>,
}

/// One user-defined action from a service menu entry
#[derive(Debug, Clone)]
pub struct ServiceAction {
    /// Action name, unique within the entry
    pub name: String,
    /// Localized display text
    pub text: String,
    pub icon: String,
    pub no_display: bool,
    pub separator: bool,
}

/// Identity of a plugin described by a single desktop entry
#[derive(Debug, Clone)]
pub struct PluginInfo {
    pub id: String,
    pub name: String,
    pub icon: String,
}

/// Desktop entry read error
#[derive(Debug)]
pub enum DesktopError {
    Decode(String),
}

impl std::fmt::Display for DesktopError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DesktopError::Decode(msg) => write!(f, "Decode error: {msg}"),
        }
    }
}

impl std::error::Error for DesktopError {}

/// Read a service menu entry: submenu metadata and all declared actions.
///
/// Actions are returned in declaration order, including separators and
/// `NoDisplay` actions; the caller decides what to keep.
pub fn load_service_menu(path: &Path) -> Result<ServiceMenu, DesktopError> {
    let locales = get_languages_from_env();
    let entry = DesktopEntry::from_path(path.to_path_buf(), Some(locales.as_slice()))
        .map_err(|e| DesktopError::Decode(format!("{}: {}", path.display(), e)))?;

    let submenu = entry
        .desktop_entry("X-Submenu")
        .map(str::to_string)
        .filter(|s| !s.is_empty());

    let mut actions = Vec::new();
    let declared = entry
        .desktop_entry("Actions")
        .map(|raw| {
            raw.split(';')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    for name in declared {
        let separator = name == SEPARATOR_ACTION;
        let text = entry
            .action_name(&name, &locales)
            .map(|c| c.into_owned())
            .unwrap_or_else(|| name.clone());
        let icon = entry
            .action_entry(&name, "Icon")
            .unwrap_or_default()
            .to_string();
        let no_display = entry
            .action_entry(&name, "NoDisplay")
            .map(|v| v == "true")
            .unwrap_or(false);

        actions.push(ServiceAction {
            name,
            text,
            icon,
            no_display,
            separator,
        });
    }

    Ok(ServiceMenu { submenu, actions })
}

/// Read the identity of a plugin entry. The id is the file stem, matching
/// how the plugin loader refers to it.
pub fn load_plugin_info(path: &Path) -> Result<PluginInfo, DesktopError> {
    let locales = get_languages_from_env();
    let entry = DesktopEntry::from_path(path.to_path_buf(), Some(locales.as_slice()))
        .map_err(|e| DesktopError::Decode(format!("{}: {}", path.display(), e)))?;

    let id = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = entry
        .name(&locales)
        .map(|c| c.into_owned())
        .unwrap_or_else(|| id.clone());
    let icon = entry.icon().unwrap_or_default().to_string();

    Ok(PluginInfo { id, name, icon })
}
