//! E2E tests for the context-menu services page

use crate::common::{write_fixture, PageTestHarness};
use crossterm::event::{KeyCode, KeyModifiers};
use skiff_settings::view::services::ServiceKind;

fn row_checked(harness: &PageTestHarness, label: &str) -> bool {
    harness
        .app
        .page
        .rows()
        .iter()
        .find(|r| r.label() == label)
        .unwrap_or_else(|| panic!("no row labelled {label:?}"))
        .checked()
}

/// Focus the footer (from the list) and press the Apply button
fn apply_from_list(harness: &mut PageTestHarness) {
    harness.send_key(KeyCode::Tab, KeyModifiers::NONE).unwrap();
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();
}

#[test]
fn test_page_lists_services_sorted() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();
    harness.render().unwrap();

    harness.assert_screen_contains("Context Menu Services");
    harness.assert_screen_contains("Open Terminal Here");
    harness.assert_screen_contains("Archive: Compress");
    harness.assert_screen_contains("Archive: Extract Here");
    harness.assert_screen_contains("Share");
    harness.assert_screen_contains("Git");
    harness.assert_screen_contains("Mercurial");
    harness.assert_screen_contains("Delete");
    harness.assert_screen_contains("'Copy To' and 'Move To' commands");

    // Rows are sorted by label: the Archive entries come before Git,
    // Git before Share
    let screen = harness.screen_to_string();
    let archive = screen.find("Archive: Compress").unwrap();
    let git = screen.find("Git").unwrap();
    let share = screen.find("Share").unwrap();
    assert!(archive < git && git < share);
}

#[test]
fn test_search_filters_live() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();
    harness.render().unwrap();

    // Search has focus after load; every keystroke narrows immediately
    harness.type_str("archive").unwrap();
    harness.assert_screen_contains("Archive: Compress");
    harness.assert_screen_not_contains("Git");
    harness.assert_screen_not_contains("Share");

    // Case-insensitive
    for _ in 0.."archive".len() {
        harness
            .send_key(KeyCode::Backspace, KeyModifiers::NONE)
            .unwrap();
    }
    harness.type_str("GIT").unwrap();
    harness.assert_screen_contains("Git");
    harness.assert_screen_not_contains("Mercurial");

    // Empty query shows everything again
    for _ in 0.."GIT".len() {
        harness
            .send_key(KeyCode::Backspace, KeyModifiers::NONE)
            .unwrap();
    }
    harness.assert_screen_contains("Mercurial");
    harness.assert_screen_contains("Share");
}

#[test]
fn test_click_toggles_a_row() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();
    harness.render().unwrap();

    assert!(row_checked(&harness, "Share"));
    harness.click_row_with_label("Share").unwrap();
    assert!(!row_checked(&harness, "Share"));
    harness.assert_screen_contains("(modified)");
}

#[test]
fn test_apply_persists_choices() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();
    harness.render().unwrap();

    harness.click_row_with_label("Share").unwrap();
    harness.click_row_with_label("Delete").unwrap();
    apply_from_list(&mut harness);

    let store = harness.reopen_store();
    assert_eq!(store.service_shown("share"), Some(false));
    assert_eq!(store.service_shown("open-terminal"), Some(true));
    assert_eq!(store.service_shown("compress"), Some(true));
    assert!(store.global().show_delete_command);
    assert!(store.version_control().enabled_plugins.is_empty());
}

#[test]
fn test_restore_defaults_button() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();
    harness.render().unwrap();

    harness.click_row_with_label("Share").unwrap();
    harness.click_row_with_label("Git").unwrap();
    harness.click_row_with_label("Delete").unwrap();

    // Restore Defaults is the left footer button
    let layout = harness.app.cached_layout.clone().unwrap();
    harness
        .click(layout.defaults_button_area.x, layout.defaults_button_area.y)
        .unwrap();

    for row in harness.app.page.rows() {
        match row.kind {
            ServiceKind::Generic => assert!(row.checked(), "{} should be on", row.id),
            _ => assert!(!row.checked(), "{} should be off", row.id),
        }
    }
}

#[test]
fn test_restart_notice_blocks_the_page() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();
    harness.render().unwrap();

    harness.click_row_with_label("Git").unwrap();
    apply_from_list(&mut harness);

    harness.assert_screen_contains("Information");
    harness.assert_screen_contains("restarted");

    // Clicks on the list are consumed while the notice is up
    let share_before = row_checked(&harness, "Share");
    harness.click_row_with_label("Share").unwrap();
    assert_eq!(row_checked(&harness, "Share"), share_before);

    // Plain OK dismisses without suppressing
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();
    harness.assert_screen_not_contains("Information");
    let store = harness.reopen_store();
    assert!(!store.is_notice_suppressed("vcs-restart-info"));
}

#[test]
fn test_restart_notice_suppression() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();
    harness.render().unwrap();

    harness.click_row_with_label("Git").unwrap();
    apply_from_list(&mut harness);
    harness.assert_screen_contains("Information");

    // Choose "Don't Show Again"
    harness.send_key(KeyCode::Right, KeyModifiers::NONE).unwrap();
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();
    harness.assert_screen_not_contains("Information");

    // A further change to the selection stays quiet
    harness.click_row_with_label("Mercurial").unwrap();
    apply_from_list(&mut harness);
    harness.assert_screen_not_contains("Information");

    let store = harness.reopen_store();
    assert!(store.is_notice_suppressed("vcs-restart-info"));
    assert_eq!(
        store.version_control().enabled_plugins,
        vec!["Git", "Mercurial"]
    );
}

#[test]
fn test_reload_picks_up_new_services() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();
    harness.render().unwrap();
    harness.assert_screen_not_contains("Darcs");

    let vcs_dir = harness.dir_context().version_control_dir();
    write_fixture(
        &vcs_dir.join("darcs.desktop"),
        "[Desktop Entry]\nType=Service\nName=Darcs\nIcon=code-class\n",
    )
    .unwrap();

    harness
        .send_key(KeyCode::Char('r'), KeyModifiers::CONTROL)
        .unwrap();
    harness.assert_screen_contains("Darcs");
}

#[test]
fn test_escape_closes_the_page() {
    let mut harness = PageTestHarness::new(80, 24).unwrap();
    harness.render().unwrap();

    assert!(!harness.app.should_quit);
    harness.send_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();
    assert!(harness.app.should_quit);
}
