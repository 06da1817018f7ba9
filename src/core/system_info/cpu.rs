use log::warn;

use crate::core::system_info::source::SystemSource;
use crate::core::system_info::types::MetricResult;

pub const LABEL: &str = "CPUs";

/// Logical core count
pub fn collect(source: &dyn SystemSource) -> MetricResult {
    match source.cpu_count() {
        Ok(count) if count > 0 => {
            let mut metric = MetricResult::info(LABEL, count.to_string());
            metric.numeric = Some(count as f64);
            metric
        }
        Ok(_) => {
            warn!("The OS reported zero CPUs");
            MetricResult::unknown(LABEL)
        }
        Err(e) => {
            warn!("Failed to read CPU count: {}", e);
            MetricResult::unknown(LABEL)
        }
    }
}
