//! Toggle (checkbox) rows for checkable lists
//!
//! Renders as: `[x] ∘ Label` (checkbox, icon glyph, label).
//!
//! The control owns its state (`ToggleState`), rendering
//! (`render_toggle_row`) and layout/hit testing (`ToggleLayout`).

use super::FocusState;
use crate::view::theme::Theme;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

/// State for a toggle row
#[derive(Debug, Clone)]
pub struct ToggleState {
    /// Current value
    pub checked: bool,
    /// Label displayed next to the toggle
    pub label: String,
    /// Focus state
    pub focus: FocusState,
}

impl ToggleState {
    /// Create a new toggle state
    pub fn new(checked: bool, label: impl Into<String>) -> Self {
        Self {
            checked,
            label: label.into(),
            focus: FocusState::Normal,
        }
    }

    /// Set the focus state
    pub fn with_focus(mut self, focus: FocusState) -> Self {
        self.focus = focus;
        self
    }

    /// Check if the toggle is enabled
    pub fn is_enabled(&self) -> bool {
        self.focus != FocusState::Disabled
    }

    /// Toggle the value
    pub fn toggle(&mut self) {
        if self.is_enabled() {
            self.checked = !self.checked;
        }
    }
}

/// Colors for the toggle control
#[derive(Debug, Clone, Copy)]
pub struct ToggleColors {
    /// Checkbox bracket color
    pub bracket: Color,
    /// Checkmark color when checked
    pub checkmark: Color,
    /// Icon glyph color
    pub icon: Color,
    /// Label text color
    pub label: Color,
    /// Focused row background
    pub focused_bg: Color,
    /// Focused row foreground
    pub focused_fg: Color,
}

impl Default for ToggleColors {
    fn default() -> Self {
        Self {
            bracket: Color::Gray,
            checkmark: Color::Green,
            icon: Color::DarkGray,
            label: Color::White,
            focused_bg: Color::Blue,
            focused_fg: Color::White,
        }
    }
}

impl ToggleColors {
    /// Create colors from theme
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            bracket: theme.muted_fg,
            checkmark: theme.checkmark_fg,
            icon: theme.muted_fg,
            label: theme.fg,
            focused_bg: theme.selection_bg,
            focused_fg: theme.selection_fg,
        }
    }
}

/// Layout information returned after rendering for hit testing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToggleLayout {
    /// The checkbox area
    pub checkbox_area: Rect,
    /// The full row area including label
    pub full_area: Rect,
}

impl ToggleLayout {
    /// Check if a point is within the clickable area
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.full_area.x
            && x < self.full_area.x + self.full_area.width
            && y >= self.full_area.y
            && y < self.full_area.y + self.full_area.height
    }
}

/// Render one toggle row: checkbox, icon glyph, label.
///
/// The label is truncated to the available width. Returns the layout for
/// hit testing.
pub fn render_toggle_row(
    frame: &mut Frame,
    area: Rect,
    state: &ToggleState,
    glyph: &str,
    colors: &ToggleColors,
) -> ToggleLayout {
    if area.width == 0 || area.height == 0 {
        return ToggleLayout::default();
    }

    let focused = state.focus == FocusState::Focused;
    let row_style = if focused {
        Style::default().fg(colors.focused_fg).bg(colors.focused_bg)
    } else {
        Style::default().fg(colors.label)
    };

    let checkbox = if state.checked { "[x]" } else { "[ ]" };
    let check_style = if state.checked {
        row_style.patch(Style::default().fg(colors.checkmark))
    } else {
        row_style.patch(Style::default().fg(colors.bracket))
    };
    let icon_style = if focused {
        row_style
    } else {
        row_style.patch(Style::default().fg(colors.icon))
    };

    // "[x] ∘ " prefix is 6 cells wide
    let label_budget = area.width.saturating_sub(6) as usize;
    let label = truncate_to_width(&state.label, label_budget);

    let line = Line::from(vec![
        Span::styled(checkbox, check_style),
        Span::styled(" ", row_style),
        Span::styled(glyph.to_string(), icon_style),
        Span::styled(" ", row_style),
        Span::styled(label, row_style),
    ]);
    frame.render_widget(Paragraph::new(line).style(row_style), area);

    ToggleLayout {
        checkbox_area: Rect::new(area.x, area.y, 3.min(area.width), 1),
        full_area: Rect::new(area.x, area.y, area.width, 1),
    }
}

/// Truncate a string to a display width, appending an ellipsis when cut
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.to_string().width();
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
