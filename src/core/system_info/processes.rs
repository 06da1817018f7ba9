use log::warn;

use crate::core::system_info::source::SystemSource;
use crate::core::system_info::types::MetricResult;

pub const LABEL: &str = "Processes";

pub fn collect(source: &dyn SystemSource) -> MetricResult {
    match source.process_names() {
        Ok(names) => {
            let mut metric = MetricResult::info(LABEL, names.len().to_string());
            metric.numeric = Some(names.len() as f64);
            metric
        }
        Err(e) => {
            warn!("Failed to read the process table: {}", e);
            MetricResult::unknown(LABEL)
        }
    }
}
