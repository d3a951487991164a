//! Color themes for the settings UI

use ratatui::style::Color;

/// Colors used by the settings pages
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub border_fg: Color,
    pub title_fg: Color,
    pub muted_fg: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub checkmark_fg: Color,
    pub search_fg: Color,
    pub button_fg: Color,
    pub button_focused_bg: Color,
    pub button_focused_fg: Color,
    pub notice_bg: Color,
    pub notice_border_fg: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            border_fg: Color::DarkGray,
            title_fg: Color::Cyan,
            muted_fg: Color::DarkGray,
            selection_bg: Color::Rgb(45, 70, 100),
            selection_fg: Color::White,
            checkmark_fg: Color::Green,
            search_fg: Color::Yellow,
            button_fg: Color::Gray,
            button_focused_bg: Color::Rgb(45, 70, 100),
            button_focused_fg: Color::White,
            notice_bg: Color::Rgb(30, 30, 40),
            notice_border_fg: Color::Cyan,
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::Black,
            border_fg: Color::Gray,
            title_fg: Color::Blue,
            muted_fg: Color::Gray,
            selection_bg: Color::Rgb(200, 220, 245),
            selection_fg: Color::Black,
            checkmark_fg: Color::Green,
            search_fg: Color::Blue,
            button_fg: Color::DarkGray,
            button_focused_bg: Color::Rgb(200, 220, 245),
            button_focused_fg: Color::Black,
            notice_bg: Color::Rgb(235, 235, 245),
            notice_border_fg: Color::Blue,
        }
    }

    /// Resolve a theme by its configured name, falling back to dark
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
