use log::debug;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use sysinfo::{
    CpuRefreshKind, Disks, Networks, ProcessRefreshKind, RefreshKind, System, ThreadKind,
};

use crate::core::system_info::source::SystemSource;
use crate::core::system_info::types::{ListeningSocket, LoadAverage, MemInfo, Partition};
use crate::error::{MotdError, Result};
use crate::platform::sessions;

#[cfg(target_os = "linux")]
use crate::core::system_info::types::Protocol;
#[cfg(target_os = "linux")]
use crate::platform::procfs;

/// Present when systemd is the running init system
#[cfg(target_os = "linux")]
const SYSTEMD_RUNTIME_DIR: &str = "/run/systemd/system";

/// The live operating system
#[derive(Debug, Default)]
pub struct HostSource;

impl HostSource {
    pub fn new() -> Self {
        Self
    }
}

impl SystemSource for HostSource {
    fn hostname(&self) -> Result<String> {
        System::host_name().ok_or_else(|| MotdError::collection("hostname not available"))
    }

    #[cfg(target_os = "linux")]
    fn default_interface(&self) -> Result<Option<String>> {
        let routes = procfs::read(procfs::ROUTE_PATH)?;
        Ok(procfs::parse_default_route(&routes))
    }

    #[cfg(not(target_os = "linux"))]
    fn default_interface(&self) -> Result<Option<String>> {
        Err(MotdError::unsupported("routing table"))
    }

    fn interface_ipv4(&self, interface: &str) -> Result<Option<Ipv4Addr>> {
        let networks = Networks::new_with_refreshed_list();
        let Some(data) = networks.list().get(interface) else {
            debug!("Interface {} not found", interface);
            return Ok(None);
        };

        Ok(data.ip_networks().iter().find_map(|net| match net.addr {
            IpAddr::V4(addr) => Some(addr),
            IpAddr::V6(_) => None,
        }))
    }

    fn sessions(&self) -> Result<Vec<String>> {
        sessions::logged_in_users()
    }

    fn process_names(&self) -> Result<Vec<String>> {
        let refresh = RefreshKind::nothing().with_processes(ProcessRefreshKind::nothing());
        let sys = System::new_with_specifics(refresh);

        let names: Vec<String> = sys
            .processes()
            .values()
            .filter(|p| counts_as_process(p.thread_kind()))
            .map(|p| p.name().to_string_lossy().into_owned())
            .collect();

        if names.is_empty() {
            return Err(MotdError::collection("process table is empty"));
        }
        Ok(names)
    }

    fn uptime(&self) -> Result<Duration> {
        Ok(Duration::from_secs(System::uptime()))
    }

    /// sysinfo reports zeros when `/proc/loadavg` is unreadable, so Linux
    /// reads the file directly.
    #[cfg(target_os = "linux")]
    fn load_average(&self) -> Result<LoadAverage> {
        procfs::parse_loadavg(&procfs::read(procfs::LOADAVG_PATH)?)
    }

    #[cfg(not(target_os = "linux"))]
    fn load_average(&self) -> Result<LoadAverage> {
        if cfg!(windows) {
            return Err(MotdError::unsupported("load average"));
        }
        let load = System::load_average();
        Ok(LoadAverage {
            one: load.one,
            five: load.five,
            fifteen: load.fifteen,
        })
    }

    fn cpu_count(&self) -> Result<usize> {
        let refresh = RefreshKind::nothing().with_cpu(CpuRefreshKind::everything());
        let sys = System::new_with_specifics(refresh);
        match sys.cpus().len() {
            0 => Err(MotdError::collection("no CPU reported")),
            count => Ok(count),
        }
    }

    fn partitions(&self) -> Result<Vec<Partition>> {
        let disks = Disks::new_with_refreshed_list();

        Ok(disks
            .list()
            .iter()
            .map(|disk| Partition {
                mount_point: disk.mount_point().to_string_lossy().into_owned(),
                fs_type: disk.file_system().to_string_lossy().into_owned(),
                total_bytes: disk.total_space(),
                available_bytes: disk.available_space(),
            })
            .collect())
    }

    #[cfg(target_os = "linux")]
    fn meminfo(&self) -> Result<MemInfo> {
        procfs::parse_meminfo(&procfs::read(procfs::MEMINFO_PATH)?)
    }

    #[cfg(not(target_os = "linux"))]
    fn meminfo(&self) -> Result<MemInfo> {
        Err(MotdError::unsupported("meminfo"))
    }

    /// A missing table (no IPv6 in the kernel) just contributes nothing;
    /// only when every table is unreadable is the query a failure.
    #[cfg(target_os = "linux")]
    fn listening_sockets(&self) -> Result<Vec<ListeningSocket>> {
        let mut sockets = Vec::new();
        let mut readable = 0;

        for protocol in Protocol::ALL {
            match procfs::read(procfs::socket_table_path(protocol)) {
                Ok(content) => {
                    readable += 1;
                    sockets.extend(procfs::parse_socket_table(&content, protocol));
                }
                Err(e) => debug!("Skipping {} socket table: {}", protocol, e),
            }
        }

        if readable == 0 {
            return Err(MotdError::collection("no socket table readable"));
        }
        Ok(sockets)
    }

    #[cfg(not(target_os = "linux"))]
    fn listening_sockets(&self) -> Result<Vec<ListeningSocket>> {
        Err(MotdError::unsupported("socket tables"))
    }

    #[cfg(target_os = "linux")]
    fn service_manager_active(&self, name: &str) -> Result<Option<bool>> {
        if !std::path::Path::new(SYSTEMD_RUNTIME_DIR).exists() {
            return Ok(None);
        }
        let Ok(systemctl) = which::which("systemctl") else {
            return Ok(None);
        };

        let status = std::process::Command::new(systemctl)
            .args(["is-active", "--quiet", name])
            .status()?;
        Ok(Some(status.success()))
    }

    #[cfg(not(target_os = "linux"))]
    fn service_manager_active(&self, _name: &str) -> Result<Option<bool>> {
        Ok(None)
    }
}

/// Kernel threads have their own PID and count like `ps -e` does; userland
/// threads are tasks of a process already counted.
fn counts_as_process(kind: Option<ThreadKind>) -> bool {
    !matches!(kind, Some(ThreadKind::Userland))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_count_rule() {
        let table = [
            None,
            None,
            Some(ThreadKind::Kernel),
            Some(ThreadKind::Kernel),
            Some(ThreadKind::Kernel),
            Some(ThreadKind::Userland),
        ];
        let count = table.into_iter().filter(|k| counts_as_process(*k)).count();
        assert_eq!(count, 5);
    }
}
