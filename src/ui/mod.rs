// UI and formatting module

pub mod formatters;
pub mod report_formatters;

// Re-export commonly used items for cleaner imports
pub use formatters::{format_size, format_uptime};
pub use report_formatters::{render_report, RenderOptions};
