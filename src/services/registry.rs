//! Service discovery.
//!
//! The services page never scans directories itself; it queries a
//! [`ServiceRegistry`] so tests can substitute a fixed catalog without a
//! desktop environment.

use crate::config_io::DirectoryContext;
use crate::services::desktop;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The plugin categories the settings page enumerates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceCategory {
    /// Generic context-menu service menus
    ContextMenu,
    /// Plugins acting on selected file items
    FileItemAction,
    /// Version control integration plugins
    VersionControl,
}

/// One discovered service or plugin
#[derive(Debug, Clone)]
pub struct ServiceDefinition {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub entry_path: PathBuf,
}

/// Trait for the settings page to enumerate installed services without
/// depending on the discovery mechanism.
pub trait ServiceRegistry {
    /// Discovered entries for a category, in enumeration order.
    /// An unknown or empty category yields an empty list.
    fn query(&self, category: ServiceCategory) -> Vec<ServiceDefinition>;
}

/// Registry backed by per-category directories of desktop entries.
///
/// Enumeration order is the sorted directory listing, so repeated queries
/// are deterministic. Unreadable entries are logged and skipped.
pub struct DesktopEntryRegistry {
    context_menu_dir: PathBuf,
    file_item_actions_dir: PathBuf,
    version_control_dir: PathBuf,
}

impl DesktopEntryRegistry {
    pub fn new(dir_context: &DirectoryContext) -> Self {
        Self {
            context_menu_dir: dir_context.service_menus_dir(),
            file_item_actions_dir: dir_context.file_item_actions_dir(),
            version_control_dir: dir_context.version_control_dir(),
        }
    }

    fn scan(&self, dir: &Path) -> Vec<ServiceDefinition> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(_) => {
                tracing::debug!("No service directory at {}", dir.display());
                return Vec::new();
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().map(|ext| ext == "desktop").unwrap_or(false))
            .collect();
        paths.sort();

        paths
            .into_iter()
            .filter_map(|path| match desktop::load_plugin_info(&path) {
                Ok(info) => Some(ServiceDefinition {
                    id: info.id,
                    name: info.name,
                    icon: info.icon,
                    entry_path: path,
                }),
                Err(e) => {
                    tracing::warn!("Skipping unreadable desktop entry: {}", e);
                    None
                }
            })
            .collect()
    }
}

impl ServiceRegistry for DesktopEntryRegistry {
    fn query(&self, category: ServiceCategory) -> Vec<ServiceDefinition> {
        let dir = match category {
            ServiceCategory::ContextMenu => &self.context_menu_dir,
            ServiceCategory::FileItemAction => &self.file_item_actions_dir,
            ServiceCategory::VersionControl => &self.version_control_dir,
        };
        self.scan(dir)
    }
}

/// A fixed registry for tests and headless environments
#[derive(Default)]
pub struct StaticRegistry {
    categories: HashMap<ServiceCategory, Vec<ServiceDefinition>>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(
        mut self,
        category: ServiceCategory,
        definitions: Vec<ServiceDefinition>,
    ) -> Self {
        self.categories.insert(category, definitions);
        self
    }
}

impl ServiceRegistry for StaticRegistry {
    fn query(&self, category: ServiceCategory) -> Vec<ServiceDefinition> {
        self.categories.get(&category).cloned().unwrap_or_default()
    }
}

/// Shorthand for building fixed definitions in tests
pub fn definition(id: &str, name: &str, icon: &str) -> ServiceDefinition {
    ServiceDefinition {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        entry_path: PathBuf::new(),
    }
}
