use log::warn;

use crate::core::system_info::source::SystemSource;
use crate::core::system_info::types::MetricResult;
use crate::ui::formatters::format_uptime;

pub const LABEL: &str = "Uptime";

pub fn collect(source: &dyn SystemSource) -> MetricResult {
    match source.uptime() {
        Ok(uptime) => {
            let mut metric = MetricResult::info(LABEL, format_uptime(uptime));
            metric.numeric = Some(uptime.as_secs() as f64);
            metric
        }
        Err(e) => {
            warn!("Failed to read uptime: {}", e);
            MetricResult::unknown(LABEL)
        }
    }
}
