use log::warn;

use crate::core::config::ThresholdConfig;
use crate::core::system_info::source::SystemSource;
use crate::core::system_info::types::{MemInfo, MetricResult};
use crate::core::thresholds::{classify, Classification, Thresholds};
use crate::error::{MotdError, Result};

pub const LABEL: &str = "Memory";

/// Memory, swap, buffers, cached and reclaimable rows: used MiB and percent
/// of the respective total.
pub fn collect(source: &dyn SystemSource, thresholds: &ThresholdConfig) -> Vec<MetricResult> {
    match source.meminfo().and_then(|info| evaluate(&info, thresholds)) {
        Ok(rows) => rows,
        Err(e) => {
            warn!("Failed to read memory usage: {}", e);
            vec![MetricResult::unknown(LABEL)]
        }
    }
}

pub fn evaluate(info: &MemInfo, thresholds: &ThresholdConfig) -> Result<Vec<MetricResult>> {
    if info.total_kib == 0 {
        return Err(MotdError::collection("MemTotal is zero"));
    }

    let total = info.total_kib;
    let used = total.saturating_sub(info.free_kib);

    let mut rows = vec![row("Memory", used, total, &thresholds.memory)];

    if info.swap_total_kib == 0 {
        rows.push(MetricResult::info("Swap", format!("{:>6} {:>4}", "---", "---")));
    } else {
        let swap_used = info.swap_total_kib.saturating_sub(info.swap_free_kib);
        rows.push(row("Swap", swap_used, info.swap_total_kib, &thresholds.swap));
    }

    rows.push(row("Buffers", info.buffers_kib, total, &thresholds.memory));
    rows.push(row("Cached", info.cached_kib, total, &thresholds.memory));
    rows.push(row("Reclaimable", info.reclaimable_kib, total, &thresholds.memory));

    Ok(rows)
}

/// Whole percent, truncated
fn percent_of(part_kib: u64, total_kib: u64) -> u64 {
    ((part_kib as u128 * 100) / total_kib as u128) as u64
}

fn row(name: &str, part_kib: u64, total_kib: u64, thresholds: &Thresholds) -> MetricResult {
    let percent = percent_of(part_kib, total_kib);
    let classification: Classification = classify(percent as f64, thresholds);
    MetricResult::classified(
        name,
        format!("{:>6} {:>4}", part_kib / 1024, percent),
        percent as f64,
        classification,
    )
}
