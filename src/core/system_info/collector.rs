use chrono::Local;
use log::{debug, warn};

use crate::core::config::Config;
use crate::core::system_info::source::SystemSource;
use crate::core::system_info::types::Report;
use crate::core::system_info::{
    cpu, load, memory, network, ports, processes, services, storage, uptime, users,
};

/// Hostname shown when the OS does not report one
pub const UNKNOWN_HOST: &str = "Unknown";

/// Run every collector in display order.
///
/// Collectors never fail: an unreadable source turns into an unknown metric
/// and the remaining collectors still run.
pub fn collect_report(source: &dyn SystemSource, config: &Config) -> Report {
    let hostname = source.hostname().unwrap_or_else(|e| {
        warn!("Failed to read hostname: {}", e);
        UNKNOWN_HOST.to_string()
    });

    let network = network::collect(source);
    let users = users::collect(source);
    let processes = processes::collect(source);
    let uptime = uptime::collect(source);
    let load = load::collect(source, &config.thresholds);
    let cpus = cpu::collect(source);
    let disks = storage::collect(source, config);
    let memory = memory::collect(source, &config.thresholds);
    let services = services::collect(source, &config.services);
    let ports = ports::collect(source, &config.ports);

    debug!(
        "Collected {} partition(s), {} service(s), {} port(s)",
        disks.len(),
        services.len(),
        ports.len()
    );

    Report {
        hostname,
        generated_at: Local::now(),
        network,
        users,
        processes,
        uptime,
        load,
        cpus,
        disks,
        memory,
        services,
        ports,
    }
}
