//! The context-menu services settings page.
//!
//! Split into model state, catalog building, rendering and input, following
//! the layout of the other settings pages.

pub mod catalog;
pub mod layout;
pub mod mouse;
pub mod render;
pub mod state;

pub use layout::{ServicesHit, ServicesLayout};
pub use render::render_services_page;
pub use state::{FocusPanel, NoticeState, ServiceKind, ServiceRow, ServicesPageState};
