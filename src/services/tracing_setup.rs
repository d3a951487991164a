//! Tracing subscriber setup
//!
//! This module provides shared tracing configuration used by both
//! the main application and tests.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global tracing subscriber with file logging.
///
/// Logging goes to a file rather than the terminal, which is owned by the
/// TUI. Environment-based filtering (RUST_LOG) applies with an INFO default.
///
/// Returns None if the log file could not be created.
pub fn init_global(log_file_path: &Path) -> Option<()> {
    let log_file = File::create(log_file_path).ok()?;
    build_subscriber(log_file).init();
    Some(())
}

/// Build a subscriber writing to the given file.
///
/// This is the core subscriber configuration shared between production and
/// tests.
pub fn build_subscriber(log_file: File) -> impl tracing::Subscriber + Send + Sync {
    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer().with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
}
