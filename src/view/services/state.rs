//! Services page state management
//!
//! Tracks the row set, the filtered/sorted projection shown by the list,
//! keyboard focus, and the commit/restore logic.

use super::catalog;
use crate::config::ConfigError;
use crate::config_io::SettingsStore;
use crate::services::registry::ServiceRegistry;
use crate::view::controls::{FocusState, ToggleState};

/// Suppression key of the restart-required notice
pub const VCS_RESTART_NOTICE: &str = "vcs-restart-info";

const RESTART_MESSAGE: &str =
    "skiff must be restarted to apply the updated version control settings.";

/// What a row toggles, stored explicitly instead of being inferred from the
/// row id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    /// A context-menu service or file-item-action plugin
    Generic,
    /// A version control plugin
    VersionControl,
    /// The built-in 'Delete' command
    DeleteToggle,
    /// The built-in 'Copy To'/'Move To' commands
    CopyMoveToggle,
}

/// One checkable row of the services list
#[derive(Debug, Clone)]
pub struct ServiceRow {
    /// Identifier, unique across the whole list
    pub id: String,
    /// Icon name from the desktop entry
    pub icon: String,
    pub kind: ServiceKind,
    pub toggle: ToggleState,
}

impl ServiceRow {
    pub fn label(&self) -> &str {
        &self.toggle.label
    }

    pub fn checked(&self) -> bool {
        self.toggle.checked
    }
}

/// Which part of the page has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPanel {
    /// The search line
    #[default]
    Search,
    /// The services list
    List,
    /// Footer buttons (Restore Defaults/Apply)
    Footer,
}

/// The informational notice overlay
#[derive(Debug, Clone)]
pub struct NoticeState {
    /// Suppression key
    pub id: String,
    pub message: String,
    /// Selected button (0=OK, 1=Don't Show Again)
    pub selected: usize,
}

impl NoticeState {
    fn restart_required() -> Self {
        Self {
            id: VCS_RESTART_NOTICE.to_string(),
            message: RESTART_MESSAGE.to_string(),
            selected: 0,
        }
    }
}

/// The state of the services settings page
#[derive(Debug)]
pub struct ServicesPageState {
    /// All rows, in insertion order
    rows: Vec<ServiceRow>,
    /// Filtered projection: indices into `rows`, sorted by label
    visible: Vec<usize>,
    /// Selected position within `visible`
    pub selected: usize,
    /// First visible row of the list viewport
    pub scroll_offset: usize,
    /// Rows the viewport can show; updated by the renderer
    pub viewport_height: usize,
    /// Current search filter
    pub filter: String,
    /// Which panel currently has keyboard focus
    pub focus_panel: FocusPanel,
    /// Selected footer button index (0=Restore Defaults, 1=Apply)
    pub footer_button_index: usize,
    /// Whether any toggle changed since the last apply
    pub changed: bool,
    /// Notice overlay, when showing
    pub notice: Option<NoticeState>,
    /// Catalog has been loaded once
    initialized: bool,
    /// Enabled version control plugins at load time, sorted by name
    enabled_vcs_plugins: Vec<String>,
}

impl ServicesPageState {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            visible: Vec::new(),
            selected: 0,
            scroll_offset: 0,
            viewport_height: 10,
            filter: String::new(),
            focus_panel: FocusPanel::Search,
            footer_button_index: 1,
            changed: false,
            notice: None,
            initialized: false,
            enabled_vcs_plugins: Vec::new(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// First real display of the page. Loads the catalog exactly once;
    /// subsequent calls are no-ops.
    pub fn show(&mut self, registry: &dyn ServiceRegistry, store: &SettingsStore) {
        if self.initialized {
            return;
        }

        self.load(registry, store);
        self.enabled_vcs_plugins = sorted_by_name(&store.version_control().enabled_plugins);
        self.focus_panel = FocusPanel::Search;
        self.initialized = true;
    }

    /// Rebuild the catalog after the installed services changed.
    /// Keeps the filter; selection and pending toggles are discarded.
    pub fn reload(&mut self, registry: &dyn ServiceRegistry, store: &SettingsStore) {
        if !self.initialized {
            return;
        }
        self.load(registry, store);
        self.changed = false;
    }

    fn load(&mut self, registry: &dyn ServiceRegistry, store: &SettingsStore) {
        self.rows = catalog::build_rows(registry, store);
        self.selected = 0;
        self.scroll_offset = 0;
        self.refresh_projection();
        tracing::info!("Loaded {} context menu services", self.rows.len());
    }

    pub fn rows(&self) -> &[ServiceRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of rows in the filtered projection
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Row at a projection position
    pub fn visible_row(&self, position: usize) -> Option<&ServiceRow> {
        self.visible.get(position).map(|&idx| &self.rows[idx])
    }

    /// Recompute the filtered, label-sorted projection.
    ///
    /// Filtering never mutates the rows; an empty filter shows everything.
    fn refresh_projection(&mut self) {
        let needle = self.filter.to_lowercase();
        self.visible = (0..self.rows.len())
            .filter(|&idx| {
                needle.is_empty() || self.rows[idx].label().to_lowercase().contains(&needle)
            })
            .collect();
        self.visible
            .sort_by_key(|&idx| self.rows[idx].label().to_lowercase());

        if self.selected >= self.visible.len() {
            self.selected = self.visible.len().saturating_sub(1);
        }
        self.ensure_visible();
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.selected = 0;
        self.scroll_offset = 0;
        self.refresh_projection();
    }

    pub fn filter_push_char(&mut self, c: char) {
        self.filter.push(c);
        self.selected = 0;
        self.scroll_offset = 0;
        self.refresh_projection();
    }

    pub fn filter_pop_char(&mut self) {
        self.filter.pop();
        self.refresh_projection();
    }

    /// Move selection up
    pub fn select_prev(&mut self) {
        match self.focus_panel {
            FocusPanel::List => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
                self.ensure_visible();
            }
            FocusPanel::Footer => {
                if self.footer_button_index > 0 {
                    self.footer_button_index -= 1;
                }
            }
            FocusPanel::Search => {}
        }
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        match self.focus_panel {
            FocusPanel::List => {
                if self.selected + 1 < self.visible.len() {
                    self.selected += 1;
                }
                self.ensure_visible();
            }
            FocusPanel::Footer => {
                if self.footer_button_index < 1 {
                    self.footer_button_index += 1;
                }
            }
            FocusPanel::Search => {}
        }
    }

    /// Switch focus: Search -> List -> Footer -> Search
    pub fn toggle_focus(&mut self) {
        self.focus_panel = match self.focus_panel {
            FocusPanel::Search => FocusPanel::List,
            FocusPanel::List => FocusPanel::Footer,
            FocusPanel::Footer => FocusPanel::Search,
        };
        if self.focus_panel == FocusPanel::List {
            self.ensure_visible();
        }
    }

    /// Keep the selected row inside the viewport
    pub fn ensure_visible(&mut self) {
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.viewport_height > 0
            && self.selected >= self.scroll_offset + self.viewport_height
        {
            self.scroll_offset = self.selected + 1 - self.viewport_height;
        }
    }

    /// Scroll up by a given number of rows.
    /// Returns true if the scroll offset changed.
    pub fn scroll_up(&mut self, delta: usize) -> bool {
        let old = self.scroll_offset;
        self.scroll_offset = self.scroll_offset.saturating_sub(delta);
        old != self.scroll_offset
    }

    /// Scroll down by a given number of rows.
    /// Returns true if the scroll offset changed.
    pub fn scroll_down(&mut self, delta: usize) -> bool {
        let old = self.scroll_offset;
        let max = self
            .visible
            .len()
            .saturating_sub(self.viewport_height.max(1));
        self.scroll_offset = (self.scroll_offset + delta).min(max);
        old != self.scroll_offset
    }

    /// Toggle the selected row
    pub fn toggle_selected(&mut self) {
        self.toggle_visible(self.selected);
    }

    /// Toggle the row at a projection position
    pub fn toggle_visible(&mut self, position: usize) {
        if let Some(&idx) = self.visible.get(position) {
            self.rows[idx].toggle.toggle();
            self.changed = true;
        }
    }

    /// Update per-row focus states for rendering
    pub fn update_focus_states(&mut self) {
        let focused_row = if self.focus_panel == FocusPanel::List {
            self.visible.get(self.selected).copied()
        } else {
            None
        };

        for (idx, row) in self.rows.iter_mut().enumerate() {
            row.toggle.focus = if Some(idx) == focused_row {
                FocusState::Focused
            } else {
                FocusState::Normal
            };
        }
    }

    /// Commit the current checked states to the settings store.
    ///
    /// Walks the full row set, never the filtered projection. Returns true
    /// when the restart notice was raised.
    pub fn apply_settings(&mut self, store: &mut SettingsStore) -> Result<bool, ConfigError> {
        if !self.initialized {
            return Ok(false);
        }

        for row in &self.rows {
            match row.kind {
                ServiceKind::Generic => store.set_service_shown(&row.id, row.checked()),
                ServiceKind::DeleteToggle => store.set_show_delete_command(row.checked()),
                ServiceKind::CopyMoveToggle => store.set_show_copy_move_menu(row.checked()),
                ServiceKind::VersionControl => {}
            }
        }

        let enabled = self.checked_vcs_plugins();
        let vcs_changed = enabled != self.enabled_vcs_plugins;
        if vcs_changed {
            store.set_enabled_vcs_plugins(enabled.clone());
            self.enabled_vcs_plugins = enabled;
        }

        store.sync()?;
        self.changed = false;

        if vcs_changed && !store.is_notice_suppressed(VCS_RESTART_NOTICE) {
            tracing::info!("Version control selection changed, restart required");
            self.notice = Some(NoticeState::restart_required());
            return Ok(true);
        }
        Ok(false)
    }

    /// Names of the checked version control plugins, in label-sorted order
    fn checked_vcs_plugins(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .rows
            .iter()
            .filter(|row| row.kind == ServiceKind::VersionControl && row.checked())
            .map(|row| row.label().to_string())
            .collect();
        names.sort_by_key(|name| name.to_lowercase());
        names
    }

    /// Reset every row to its default: generic services on, version control
    /// plugins and the built-in toggles off.
    pub fn restore_defaults(&mut self) {
        for row in &mut self.rows {
            row.toggle.checked = row.kind == ServiceKind::Generic;
        }
        self.changed = true;
    }

    /// Dismiss the notice overlay, optionally suppressing it for good
    pub fn acknowledge_notice(
        &mut self,
        suppress: bool,
        store: &mut SettingsStore,
    ) -> Result<(), ConfigError> {
        if let Some(notice) = self.notice.take() {
            if suppress {
                store.suppress_notice(&notice.id);
                store.sync()?;
            }
        }
        Ok(())
    }
}

impl Default for ServicesPageState {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted_by_name(names: &[String]) -> Vec<String> {
    let mut sorted = names.to_vec();
    sorted.sort_by_key(|name| name.to_lowercase());
    sorted
}
