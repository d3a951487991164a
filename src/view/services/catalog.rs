//! Builds the service catalog shown by the services page.
//!
//! Three registry passes (service menus, file item actions, version control
//! plugins) followed by the two built-in rows. Deduplication is by row id
//! across all passes.

use super::state::{ServiceKind, ServiceRow};
use crate::config_io::SettingsStore;
use crate::services::desktop;
use crate::services::registry::{ServiceCategory, ServiceRegistry};
use crate::view::controls::ToggleState;

/// Row id of the built-in 'Delete' toggle
pub const BUILTIN_DELETE: &str = "builtin:delete";
/// Row id of the built-in 'Copy To'/'Move To' toggle
pub const BUILTIN_COPY_MOVE: &str = "builtin:copy-move";

/// Id namespace prefix for version control rows, kept so a plugin and a
/// generic service with the same name stay distinct
const VCS_ID_PREFIX: &str = "vcs:";

const VCS_FALLBACK_ICON: &str = "code-class";

/// Build the full row set from the registry and persisted settings.
///
/// Checked state defaults to `true` for services without a persisted choice;
/// version control rows are checked iff their name is in the enabled list.
pub fn build_rows(registry: &dyn ServiceRegistry, store: &SettingsStore) -> Vec<ServiceRow> {
    let mut rows = Vec::new();

    load_service_menus(registry, store, &mut rows);
    load_file_item_actions(registry, store, &mut rows);
    load_version_control(registry, store, &mut rows);

    push_row(
        &mut rows,
        "edit-delete",
        "Delete",
        BUILTIN_DELETE,
        ServiceKind::DeleteToggle,
        store.global().show_delete_command,
    );
    push_row(
        &mut rows,
        "edit-copy",
        "'Copy To' and 'Move To' commands",
        BUILTIN_COPY_MOVE,
        ServiceKind::CopyMoveToggle,
        store.general().show_copy_move_menu,
    );

    rows
}

/// Generic service menus: one row per visible user-defined action
fn load_service_menus(
    registry: &dyn ServiceRegistry,
    store: &SettingsStore,
    rows: &mut Vec<ServiceRow>,
) {
    for def in registry.query(ServiceCategory::ContextMenu) {
        let menu = match desktop::load_service_menu(&def.entry_path) {
            Ok(menu) => menu,
            Err(e) => {
                tracing::warn!("Skipping service menu: {}", e);
                continue;
            }
        };

        for action in &menu.actions {
            if action.no_display || action.separator || is_in_rows(rows, &action.name) {
                continue;
            }

            let label = match &menu.submenu {
                Some(submenu) => format!("{}: {}", submenu, action.text),
                None => action.text.clone(),
            };
            let checked = store.service_shown(&action.name).unwrap_or(true);
            push_row(
                rows,
                &action.icon,
                &label,
                &action.name,
                ServiceKind::Generic,
                checked,
            );
        }
    }
}

/// Plugins acting on file items: one row per plugin
fn load_file_item_actions(
    registry: &dyn ServiceRegistry,
    store: &SettingsStore,
    rows: &mut Vec<ServiceRow>,
) {
    for def in registry.query(ServiceCategory::FileItemAction) {
        if is_in_rows(rows, &def.id) {
            continue;
        }
        let checked = store.service_shown(&def.id).unwrap_or(true);
        push_row(rows, &def.icon, &def.name, &def.id, ServiceKind::Generic, checked);
    }
}

/// Version control plugins: checked iff enabled in the persisted list
fn load_version_control(
    registry: &dyn ServiceRegistry,
    store: &SettingsStore,
    rows: &mut Vec<ServiceRow>,
) {
    let enabled = &store.version_control().enabled_plugins;

    for def in registry.query(ServiceCategory::VersionControl) {
        let id = format!("{VCS_ID_PREFIX}{}", def.id);
        if is_in_rows(rows, &id) {
            continue;
        }
        let icon = if def.icon.is_empty() {
            VCS_FALLBACK_ICON
        } else {
            &def.icon
        };
        let checked = enabled.contains(&def.name);
        push_row(rows, icon, &def.name, &id, ServiceKind::VersionControl, checked);
    }
}

fn is_in_rows(rows: &[ServiceRow], id: &str) -> bool {
    rows.iter().any(|row| row.id == id)
}

fn push_row(
    rows: &mut Vec<ServiceRow>,
    icon: &str,
    label: &str,
    id: &str,
    kind: ServiceKind,
    checked: bool,
) {
    rows.push(ServiceRow {
        id: id.to_string(),
        icon: icon.to_string(),
        kind,
        toggle: ToggleState::new(checked, label),
    });
}
