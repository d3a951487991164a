//! Mouse input handling for the services page.
//!
//! Hit testing runs against the layout cached by the last render.

use crate::app::App;

use super::{FocusPanel, ServicesHit, ServicesLayout};

impl App {
    /// Handle mouse events on the services page.
    /// Returns true when a redraw is needed.
    pub(crate) fn handle_services_mouse(
        &mut self,
        mouse_event: crossterm::event::MouseEvent,
    ) -> bool {
        use crossterm::event::{MouseButton, MouseEventKind};

        let col = mouse_event.column;
        let row = mouse_event.row;

        // The notice overlay consumes everything except clicks on its buttons
        if self.page.notice.is_some() {
            if let MouseEventKind::Down(MouseButton::Left) = mouse_event.kind {
                let hit = self
                    .cached_layout
                    .as_ref()
                    .and_then(|layout: &ServicesLayout| layout.hit_test(col, row));
                match hit {
                    Some(ServicesHit::NoticeOk) => {
                        self.acknowledge_notice(false);
                        return true;
                    }
                    Some(ServicesHit::NoticeDontShowAgain) => {
                        self.acknowledge_notice(true);
                        return true;
                    }
                    _ => {}
                }
            }
            return false;
        }

        match mouse_event.kind {
            MouseEventKind::ScrollUp => {
                return self.page.scroll_up(3);
            }
            MouseEventKind::ScrollDown => {
                return self.page.scroll_down(3);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                // Handle click below
            }
            _ => return false,
        }

        let hit = self
            .cached_layout
            .as_ref()
            .and_then(|layout: &ServicesLayout| layout.hit_test(col, row));

        let Some(hit) = hit else {
            return false;
        };

        match hit {
            ServicesHit::SearchBox => {
                self.page.focus_panel = FocusPanel::Search;
            }
            ServicesHit::Row(position) => {
                self.page.focus_panel = FocusPanel::List;
                self.page.selected = position;
                self.page.toggle_visible(position);
            }
            ServicesHit::DefaultsButton => {
                self.page.restore_defaults();
            }
            ServicesHit::ApplyButton => {
                self.apply();
            }
            ServicesHit::NoticeOk | ServicesHit::NoticeDontShowAgain => {
                // Only reachable while the notice is up, handled above
            }
            ServicesHit::Background => {
                // Click on empty page space - do nothing
            }
        }

        true
    }
}
