pub mod desktop;
pub mod registry;
pub mod tracing_setup;
