//! Layout tracking for the services page, for mouse hit testing.
//!
//! The renderer records where everything landed; input handlers query the
//! cached layout instead of recomputing geometry.

use crate::view::controls::ToggleLayout;
use ratatui::layout::Rect;

/// What a screen position maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServicesHit {
    SearchBox,
    /// A list row, by projection position
    Row(usize),
    DefaultsButton,
    ApplyButton,
    NoticeOk,
    NoticeDontShowAgain,
    Background,
}

/// Screen areas recorded during the last render
#[derive(Debug, Clone, Default)]
pub struct ServicesLayout {
    pub page_area: Rect,
    pub search_area: Rect,
    pub list_area: Rect,
    pub defaults_button_area: Rect,
    pub apply_button_area: Rect,
    pub notice_ok_area: Option<Rect>,
    pub notice_suppress_area: Option<Rect>,
    rows: Vec<(usize, ToggleLayout)>,
}

impl ServicesLayout {
    pub fn new(page_area: Rect) -> Self {
        Self {
            page_area,
            ..Self::default()
        }
    }

    pub fn add_row(&mut self, position: usize, layout: ToggleLayout) {
        self.rows.push((position, layout));
    }

    /// Map a screen position to a page element.
    ///
    /// Notice buttons take priority; when the notice overlay is up the rest
    /// of the page is not reported.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<ServicesHit> {
        if self.notice_ok_area.is_some() || self.notice_suppress_area.is_some() {
            if let Some(area) = self.notice_ok_area {
                if contains(area, x, y) {
                    return Some(ServicesHit::NoticeOk);
                }
            }
            if let Some(area) = self.notice_suppress_area {
                if contains(area, x, y) {
                    return Some(ServicesHit::NoticeDontShowAgain);
                }
            }
            return None;
        }

        if contains(self.search_area, x, y) {
            return Some(ServicesHit::SearchBox);
        }
        for (position, row_layout) in &self.rows {
            if row_layout.contains(x, y) {
                return Some(ServicesHit::Row(*position));
            }
        }
        if contains(self.defaults_button_area, x, y) {
            return Some(ServicesHit::DefaultsButton);
        }
        if contains(self.apply_button_area, x, y) {
            return Some(ServicesHit::ApplyButton);
        }
        if contains(self.page_area, x, y) {
            return Some(ServicesHit::Background);
        }
        None
    }
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}
