//! Application shell driving the services settings page.
//!
//! Owns the page state, the settings store and the registry, and routes
//! terminal events to them. Rendering caches the page layout for mouse hit
//! testing.

use crate::config_io::SettingsStore;
use crate::services::registry::ServiceRegistry;
use crate::view::services::{
    render_services_page, FocusPanel, ServicesLayout, ServicesPageState,
};
use crate::view::theme::Theme;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;

pub struct App {
    pub page: ServicesPageState,
    pub store: SettingsStore,
    pub registry: Box<dyn ServiceRegistry>,
    pub theme: Theme,
    pub cached_layout: Option<ServicesLayout>,
    pub should_quit: bool,
}

impl App {
    pub fn new(store: SettingsStore, registry: Box<dyn ServiceRegistry>) -> Self {
        let theme = Theme::from_name(&store.general().theme);
        Self {
            page: ServicesPageState::new(),
            store,
            registry,
            theme,
            cached_layout: None,
            should_quit: false,
        }
    }

    /// The page became visible; loads the catalog on the first call only.
    pub fn show(&mut self) {
        self.page.show(self.registry.as_ref(), &self.store);
    }

    /// Rebuild the catalog after the installed services changed on disk.
    pub fn reload(&mut self) {
        self.page.reload(self.registry.as_ref(), &self.store);
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let layout = render_services_page(frame, area, &mut self.page, &self.theme);
        self.cached_layout = Some(layout);
    }

    /// Handle a terminal event. Returns true when a redraw is needed.
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse_event) => self.handle_services_mouse(mouse_event),
            Event::Resize(_, _) => true,
            _ => false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.page.notice.is_some() {
            return self.handle_notice_key(key);
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return true;
                }
                KeyCode::Char('r') => {
                    self.reload();
                    return true;
                }
                _ => return false,
            }
        }

        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                true
            }
            KeyCode::Tab => {
                self.page.toggle_focus();
                true
            }
            KeyCode::Up => {
                self.page.select_prev();
                true
            }
            KeyCode::Down => {
                if self.page.focus_panel == FocusPanel::Search {
                    self.page.toggle_focus();
                } else {
                    self.page.select_next();
                }
                true
            }
            KeyCode::Enter => match self.page.focus_panel {
                FocusPanel::Search => {
                    self.page.toggle_focus();
                    true
                }
                FocusPanel::List => {
                    self.page.toggle_selected();
                    true
                }
                FocusPanel::Footer => {
                    self.activate_footer_button();
                    true
                }
            },
            KeyCode::Char(' ') if self.page.focus_panel != FocusPanel::Search => {
                match self.page.focus_panel {
                    FocusPanel::List => self.page.toggle_selected(),
                    FocusPanel::Footer => self.activate_footer_button(),
                    FocusPanel::Search => {}
                }
                true
            }
            KeyCode::Char('/') if self.page.focus_panel != FocusPanel::Search => {
                self.page.focus_panel = FocusPanel::Search;
                true
            }
            KeyCode::Backspace if self.page.focus_panel == FocusPanel::Search => {
                self.page.filter_pop_char();
                true
            }
            KeyCode::Char(c) if self.page.focus_panel == FocusPanel::Search => {
                self.page.filter_push_char(c);
                true
            }
            _ => false,
        }
    }

    fn handle_notice_key(&mut self, key: KeyEvent) -> bool {
        let Some(notice) = self.page.notice.as_mut() else {
            return false;
        };
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                notice.selected = 1 - notice.selected;
                true
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let suppress = notice.selected == 1;
                self.acknowledge_notice(suppress);
                true
            }
            KeyCode::Esc => {
                self.acknowledge_notice(false);
                true
            }
            _ => false,
        }
    }

    fn activate_footer_button(&mut self) {
        if self.page.footer_button_index == 0 {
            self.page.restore_defaults();
        } else {
            self.apply();
        }
    }

    /// Commit the page to the settings store
    pub fn apply(&mut self) {
        if let Err(e) = self.page.apply_settings(&mut self.store) {
            tracing::error!("Failed to apply services settings: {}", e);
        }
    }

    pub fn acknowledge_notice(&mut self, suppress: bool) {
        if let Err(e) = self.page.acknowledge_notice(suppress, &mut self.store) {
            tracing::error!("Failed to record notice acknowledgement: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_io::DirectoryContext;
    use crate::services::registry::{definition, ServiceCategory, StaticRegistry};
    use tempfile::TempDir;

    fn test_app() -> (TempDir, App) {
        let temp = TempDir::new().unwrap();
        let store = SettingsStore::open(DirectoryContext::for_testing(temp.path()));
        let registry = StaticRegistry::new()
            .with_category(
                ServiceCategory::FileItemAction,
                vec![definition("share", "Share", "emblem-shared")],
            )
            .with_category(
                ServiceCategory::VersionControl,
                vec![definition("git", "Git", "")],
            );
        let mut app = App::new(store, Box::new(registry));
        app.show();
        (temp, app)
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn press_ctrl(app: &mut App, c: char) -> bool {
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::CONTROL,
        )))
    }

    #[test]
    fn test_escape_quits() {
        let (_temp, mut app) = test_app();
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_typing_filters() {
        let (_temp, mut app) = test_app();
        assert_eq!(app.page.focus_panel, FocusPanel::Search);

        press(&mut app, KeyCode::Char('g'));
        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.page.filter, "gi");
        assert_eq!(app.page.visible_len(), 1);

        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.page.visible_len(), 4);
    }

    #[test]
    fn test_enter_moves_from_search_to_list_and_toggles() {
        let (_temp, mut app) = test_app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.page.focus_panel, FocusPanel::List);

        let before = app.page.visible_row(app.page.selected).unwrap().checked();
        press(&mut app, KeyCode::Char(' '));
        let after = app.page.visible_row(app.page.selected).unwrap().checked();
        assert_eq!(after, !before);
        assert!(app.page.changed);
    }

    #[test]
    fn test_notice_flow_via_keys() {
        let (_temp, mut app) = test_app();
        press(&mut app, KeyCode::Enter); // focus list

        // Check Git (position of "Git" in sorted projection)
        let git_position = (0..app.page.visible_len())
            .find(|&i| app.page.visible_row(i).unwrap().id == "vcs:git")
            .unwrap();
        app.page.selected = git_position;
        press(&mut app, KeyCode::Char(' '));

        // Apply via footer
        app.page.focus_panel = FocusPanel::Footer;
        app.page.footer_button_index = 1;
        press(&mut app, KeyCode::Enter);
        assert!(app.page.notice.is_some());

        // Dismiss with "Don't Show Again"
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        assert!(app.page.notice.is_none());
        assert!(app
            .store
            .is_notice_suppressed(crate::view::services::state::VCS_RESTART_NOTICE));
    }

    #[test]
    fn test_ctrl_r_reloads() {
        let (_temp, mut app) = test_app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char(' ')); // toggle something
        assert!(app.page.changed);

        press_ctrl(&mut app, 'r');
        assert!(!app.page.changed);
        assert_eq!(app.page.row_count(), 4);
    }
}
