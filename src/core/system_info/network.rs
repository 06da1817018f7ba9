use log::warn;

use crate::core::system_info::source::SystemSource;
use crate::core::system_info::types::{MetricResult, NOT_AVAILABLE};
use crate::core::thresholds::Classification;

pub const LABEL: &str = "IP";

/// Default outbound interface and its IPv4 address, shown as `address/interface`
pub fn collect(source: &dyn SystemSource) -> MetricResult {
    let interface = match source.default_interface() {
        Ok(Some(interface)) => interface,
        Ok(None) => {
            warn!("No default route found");
            return MetricResult::unknown(LABEL);
        }
        Err(e) => {
            warn!("Failed to read the routing table: {}", e);
            return MetricResult::unknown(LABEL);
        }
    };

    let address = source.interface_ipv4(&interface).unwrap_or_else(|e| {
        warn!("Failed to read addresses of {}: {}", interface, e);
        None
    });

    match address {
        Some(address) => MetricResult::info(LABEL, format!("{}/{}", address, interface)),
        None => MetricResult {
            name: LABEL.to_string(),
            value: format!("{}/{}", NOT_AVAILABLE, interface),
            numeric: None,
            classification: Classification::Unknown,
        },
    }
}
