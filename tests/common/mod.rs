//! Test harness for driving the services page against a TestBackend.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use skiff_settings::app::App;
use skiff_settings::config_io::{DirectoryContext, SettingsStore};
use skiff_settings::services::registry::DesktopEntryRegistry;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct PageTestHarness {
    pub app: App,
    terminal: Terminal<TestBackend>,
    temp: TempDir,
}

impl PageTestHarness {
    /// Create a harness with the default service fixtures installed.
    pub fn new(width: u16, height: u16) -> std::io::Result<Self> {
        let temp = TempDir::new()?;
        let dir_context = DirectoryContext::for_testing(temp.path());
        install_default_fixtures(&dir_context)?;

        let store = SettingsStore::open(dir_context.clone());
        let registry = DesktopEntryRegistry::new(&dir_context);
        let mut app = App::new(store, Box::new(registry));
        app.show();

        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            app,
            terminal,
            temp,
        })
    }

    pub fn dir_context(&self) -> DirectoryContext {
        DirectoryContext::for_testing(self.temp.path())
    }

    /// Reopen the settings store from disk, bypassing the app's copy.
    pub fn reopen_store(&self) -> SettingsStore {
        SettingsStore::open(self.dir_context())
    }

    pub fn render(&mut self) -> std::io::Result<()> {
        let app = &mut self.app;
        self.terminal.draw(|frame| app.render(frame))?;
        Ok(())
    }

    pub fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> std::io::Result<()> {
        self.app
            .handle_event(Event::Key(KeyEvent::new(code, modifiers)));
        self.render()
    }

    pub fn type_str(&mut self, text: &str) -> std::io::Result<()> {
        for c in text.chars() {
            self.send_key(KeyCode::Char(c), KeyModifiers::NONE)?;
        }
        Ok(())
    }

    pub fn click(&mut self, column: u16, row: u16) -> std::io::Result<()> {
        self.app.handle_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }));
        self.render()
    }

    /// Click the list row currently showing the given label.
    /// Panics if the row is not on screen.
    pub fn click_row_with_label(&mut self, label: &str) -> std::io::Result<()> {
        self.render()?;
        let position = (0..self.app.page.visible_len())
            .find(|&i| self.app.page.visible_row(i).unwrap().label() == label)
            .unwrap_or_else(|| panic!("no visible row labelled {label:?}"));

        let layout = self
            .app
            .cached_layout
            .clone()
            .expect("render before clicking");
        let first = self.app.page.scroll_offset;
        let line = position
            .checked_sub(first)
            .expect("row is scrolled off screen");
        let y = layout.list_area.y + line as u16;
        self.click(layout.list_area.x + 1, y)
    }

    pub fn screen_to_string(&self) -> String {
        let buffer = self.terminal.backend().buffer().clone();
        let mut out = String::new();
        for row in 0..buffer.area.height {
            for col in 0..buffer.area.width {
                out.push_str(buffer[(col, row)].symbol());
            }
            out.push('\n');
        }
        out
    }

    pub fn assert_screen_contains(&self, needle: &str) {
        let screen = self.screen_to_string();
        assert!(
            screen.contains(needle),
            "expected screen to contain {needle:?}\n{screen}"
        );
    }

    pub fn assert_screen_not_contains(&self, needle: &str) {
        let screen = self.screen_to_string();
        assert!(
            !screen.contains(needle),
            "expected screen to not contain {needle:?}\n{screen}"
        );
    }
}

fn install_default_fixtures(dir_context: &DirectoryContext) -> std::io::Result<()> {
    let menus = dir_context.service_menus_dir();
    std::fs::create_dir_all(&menus)?;
    write_fixture(
        &menus.join("terminal.desktop"),
        "[Desktop Entry]\nType=Service\nActions=open-terminal\n\n\
         [Desktop Action open-terminal]\nName=Open Terminal Here\nIcon=utilities-terminal\n",
    )?;
    write_fixture(
        &menus.join("archive.desktop"),
        "[Desktop Entry]\nType=Service\nX-Submenu=Archive\nActions=compress;extract\n\n\
         [Desktop Action compress]\nName=Compress\nIcon=archive-insert\n\n\
         [Desktop Action extract]\nName=Extract Here\nIcon=archive-extract\n",
    )?;

    let actions = dir_context.file_item_actions_dir();
    std::fs::create_dir_all(&actions)?;
    write_fixture(
        &actions.join("share.desktop"),
        "[Desktop Entry]\nType=Service\nName=Share\nIcon=emblem-shared\n",
    )?;

    let vcs = dir_context.version_control_dir();
    std::fs::create_dir_all(&vcs)?;
    write_fixture(
        &vcs.join("git.desktop"),
        "[Desktop Entry]\nType=Service\nName=Git\nIcon=code-class\n",
    )?;
    write_fixture(
        &vcs.join("mercurial.desktop"),
        "[Desktop Entry]\nType=Service\nName=Mercurial\nIcon=code-class\n",
    )?;

    Ok(())
}

pub fn write_fixture(path: &PathBuf, contents: &str) -> std::io::Result<()> {
    std::fs::write(path, contents)
}
