use log::{debug, warn};

use crate::core::config::Config;
use crate::core::system_info::source::SystemSource;
use crate::core::system_info::types::{MetricResult, Partition};
use crate::core::thresholds::{classify, Classification};
use crate::ui::formatters::format_size;

pub const LABEL: &str = "Disks";

/// One result per reported partition, sorted by mount point.
///
/// Partitions in the ignore lists and zero-sized pseudo filesystems are
/// skipped. A failed mount table read yields a single unknown result.
pub fn collect(source: &dyn SystemSource, config: &Config) -> Vec<MetricResult> {
    let mut partitions = match source.partitions() {
        Ok(partitions) => partitions,
        Err(e) => {
            warn!("Failed to read the mount table: {}", e);
            return vec![MetricResult::unknown(LABEL)];
        }
    };

    partitions.retain(|p| {
        let keep = p.total_bytes > 0 && !config.is_partition_ignored(&p.mount_point, &p.fs_type);
        if !keep {
            debug!("Skipping partition {} ({})", p.mount_point, p.fs_type);
        }
        keep
    });
    partitions.sort_by(|a, b| a.mount_point.cmp(&b.mount_point));
    partitions.dedup_by(|a, b| a.mount_point == b.mount_point);

    partitions
        .iter()
        .map(|p| evaluate(p, config))
        .collect()
}

/// Percent of the filesystem in use, rounded up like `df`
pub fn usage_percent(partition: &Partition) -> u64 {
    if partition.total_bytes == 0 {
        return 0;
    }
    let used = partition
        .total_bytes
        .saturating_sub(partition.available_bytes) as u128;
    let total = partition.total_bytes as u128;
    ((used * 100).div_ceil(total)) as u64
}

pub fn evaluate(partition: &Partition, config: &Config) -> MetricResult {
    let percent = usage_percent(partition);
    let thresholds = &config.thresholds;

    let mut classification = classify(percent as f64, &thresholds.disk);
    if let Some(ref disk_free) = thresholds.disk_free {
        let free_mib = partition.available_bytes as f64 / (1024.0 * 1024.0);
        classification = Classification::worst([classification, classify(free_mib, disk_free)]);
    }

    MetricResult::classified(
        partition.mount_point.clone(),
        format!("{:>4} {:>4}", format_size(partition.available_bytes), percent),
        percent as f64,
        classification,
    )
}
