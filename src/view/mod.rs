pub mod controls;
pub mod services;
pub mod theme;
