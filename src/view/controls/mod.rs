//! Reusable UI controls for the settings pages

pub mod toggle;

pub use toggle::{render_toggle_row, ToggleColors, ToggleLayout, ToggleState};

/// Focus state of a control, for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    Normal,
    Focused,
    Disabled,
}
