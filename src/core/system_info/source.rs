use std::net::Ipv4Addr;
use std::time::Duration;

use crate::core::system_info::types::{ListeningSocket, LoadAverage, MemInfo, Partition};
use crate::error::Result;

/// Read-only view of the operating system state the collectors need.
///
/// Every method is a point-in-time query. An `Err` means that one source was
/// unreadable; collectors turn it into an `Unknown` metric and move on.
pub trait SystemSource {
    fn hostname(&self) -> Result<String>;

    /// Interface carrying the default route, `None` when there is no default route
    fn default_interface(&self) -> Result<Option<String>>;

    /// First IPv4 address assigned to `interface`
    fn interface_ipv4(&self, interface: &str) -> Result<Option<Ipv4Addr>>;

    /// User name of every logged-in session (one entry per session)
    fn sessions(&self) -> Result<Vec<String>>;

    /// Name of every running process
    fn process_names(&self) -> Result<Vec<String>>;

    fn uptime(&self) -> Result<Duration>;

    fn load_average(&self) -> Result<LoadAverage>;

    /// Logical CPU count
    fn cpu_count(&self) -> Result<usize>;

    fn partitions(&self) -> Result<Vec<Partition>>;

    fn meminfo(&self) -> Result<MemInfo>;

    fn listening_sockets(&self) -> Result<Vec<ListeningSocket>>;

    /// Ask the service manager whether `name` is active.
    ///
    /// Only consulted when no process carries the service name. `Ok(None)`
    /// means no service manager is available.
    fn service_manager_active(&self, name: &str) -> Result<Option<bool>>;
}
