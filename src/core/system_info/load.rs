use log::warn;

use crate::core::config::ThresholdConfig;
use crate::core::system_info::source::SystemSource;
use crate::core::system_info::types::{LoadAverage, MetricResult};
use crate::core::thresholds::{classify_optional, Classification};

pub const LABEL: &str = "Load";

/// Load averages. The 1-minute value drives the classification; with
/// `per_cpu` the bounds are multiplied by the CPU count first.
pub fn collect(source: &dyn SystemSource, thresholds: &ThresholdConfig) -> MetricResult {
    match source.load_average() {
        Ok(load) => {
            let cpus = if thresholds.load_per_cpu {
                source
                    .cpu_count()
                    .map_err(|e| warn!("Failed to read CPU count for load scaling: {}", e))
                    .ok()
                    .filter(|count| *count > 0)
            } else {
                None
            };
            evaluate(load, cpus, thresholds)
        }
        Err(e) => {
            warn!("Failed to read load average: {}", e);
            MetricResult::unknown(LABEL)
        }
    }
}

pub fn evaluate(load: LoadAverage, cpus: Option<usize>, thresholds: &ThresholdConfig) -> MetricResult {
    let value = format!(
        "{:.2} (1min) / {:.2} (5min) / {:.2} (15min)",
        load.one, load.five, load.fifteen
    );

    let bounds = if thresholds.load_per_cpu {
        cpus.map(|count| thresholds.load.scaled(count as f64))
    } else {
        Some(thresholds.load)
    };

    let classification = match bounds {
        Some(bounds) => classify_optional(Some(load.one), &bounds),
        None => Classification::Unknown,
    };

    MetricResult::classified(LABEL, value, load.one, classification)
}
