// Core logic: configuration, classification and collection

pub mod config;
pub mod system_info;
pub mod thresholds;

// Re-export commonly used items
pub use config::Config;
pub use system_info::{collect_report, Report, SystemSource};
pub use thresholds::{classify, Classification, Thresholds};
