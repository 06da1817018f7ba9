use log::warn;
use std::collections::BTreeSet;

use crate::core::system_info::source::SystemSource;
use crate::core::system_info::types::MetricResult;

pub const LABEL: &str = "Users";

/// Logged-in sessions, with the number of distinct users behind them
pub fn collect(source: &dyn SystemSource) -> MetricResult {
    match source.sessions() {
        Ok(sessions) => {
            let distinct: BTreeSet<&str> = sessions.iter().map(String::as_str).collect();
            let mut metric = MetricResult::info(
                LABEL,
                format!("{} user(s), {} session(s)", distinct.len(), sessions.len()),
            );
            metric.numeric = Some(sessions.len() as f64);
            metric
        }
        Err(e) => {
            warn!("Failed to read logged-in sessions: {}", e);
            MetricResult::unknown(LABEL)
        }
    }
}
