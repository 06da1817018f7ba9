// motdstats Library - Public API

// Re-export error types
pub mod error;
pub use error::{MotdError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod platform;
pub mod ui;

// Re-export commonly used types
pub use core::config::Config;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Initialize logging. Only errors reach stderr unless asked for more,
// so the report stays clean when piped into a motd file.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Error
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
