use std::collections::HashSet;
use std::io::Write;
use std::net::Ipv4Addr;
use std::time::Duration;

use motdstats::core::system_info::{ListeningSocket, LoadAverage, MemInfo, Partition, Protocol};
use motdstats::core::SystemSource;
use motdstats::{MotdError, Result};
use tempfile::NamedTempFile;

pub const GIB: u64 = 1024 * 1024 * 1024;

/// Canned system state. Any query named in `failing` returns an error.
pub struct FakeSource {
    pub hostname: String,
    pub interface: Option<String>,
    pub address: Option<Ipv4Addr>,
    pub sessions: Vec<String>,
    pub processes: Vec<String>,
    pub uptime: Duration,
    pub load: LoadAverage,
    pub cpus: usize,
    pub partitions: Vec<Partition>,
    pub meminfo: MemInfo,
    pub sockets: Vec<ListeningSocket>,
    pub failing: HashSet<&'static str>,
}

impl Default for FakeSource {
    fn default() -> Self {
        Self {
            hostname: "testbox".to_string(),
            interface: Some("eth0".to_string()),
            address: Some(Ipv4Addr::new(192, 168, 1, 10)),
            sessions: vec!["alice".into(), "alice".into(), "bob".into()],
            processes: vec!["systemd".into(), "sshd".into(), "cron".into()],
            uptime: Duration::from_secs(2 * 86_400 + 5 * 3_600 + 60),
            load: LoadAverage {
                one: 0.5,
                five: 0.3,
                fifteen: 0.1,
            },
            cpus: 2,
            partitions: vec![partition("/", 100 * GIB, 55 * GIB)],
            meminfo: MemInfo {
                total_kib: 8 * 1024 * 1024,
                free_kib: 6 * 1024 * 1024,
                swap_total_kib: 0,
                swap_free_kib: 0,
                buffers_kib: 100 * 1024,
                cached_kib: 1024 * 1024,
                reclaimable_kib: 50 * 1024,
            },
            sockets: vec![ListeningSocket {
                protocol: Protocol::Tcp,
                port: 22,
            }],
            failing: HashSet::new(),
        }
    }
}

impl FakeSource {
    pub fn failing(queries: &[&'static str]) -> Self {
        Self {
            failing: queries.iter().copied().collect(),
            ..Self::default()
        }
    }

    fn check(&self, query: &'static str) -> Result<()> {
        if self.failing.contains(query) {
            return Err(MotdError::collection(format!("{} unavailable", query)));
        }
        Ok(())
    }
}

impl SystemSource for FakeSource {
    fn hostname(&self) -> Result<String> {
        self.check("hostname")?;
        Ok(self.hostname.clone())
    }

    fn default_interface(&self) -> Result<Option<String>> {
        self.check("default_interface")?;
        Ok(self.interface.clone())
    }

    fn interface_ipv4(&self, _interface: &str) -> Result<Option<Ipv4Addr>> {
        self.check("interface_ipv4")?;
        Ok(self.address)
    }

    fn sessions(&self) -> Result<Vec<String>> {
        self.check("sessions")?;
        Ok(self.sessions.clone())
    }

    fn process_names(&self) -> Result<Vec<String>> {
        self.check("process_names")?;
        Ok(self.processes.clone())
    }

    fn uptime(&self) -> Result<Duration> {
        self.check("uptime")?;
        Ok(self.uptime)
    }

    fn load_average(&self) -> Result<LoadAverage> {
        self.check("load_average")?;
        Ok(self.load)
    }

    fn cpu_count(&self) -> Result<usize> {
        self.check("cpu_count")?;
        Ok(self.cpus)
    }

    fn partitions(&self) -> Result<Vec<Partition>> {
        self.check("partitions")?;
        Ok(self.partitions.clone())
    }

    fn meminfo(&self) -> Result<MemInfo> {
        self.check("meminfo")?;
        Ok(self.meminfo)
    }

    fn listening_sockets(&self) -> Result<Vec<ListeningSocket>> {
        self.check("listening_sockets")?;
        Ok(self.sockets.clone())
    }

    fn service_manager_active(&self, _name: &str) -> Result<Option<bool>> {
        self.check("service_manager_active")?;
        Ok(None)
    }
}

pub fn partition(mount_point: &str, total_bytes: u64, available_bytes: u64) -> Partition {
    Partition {
        mount_point: mount_point.to_string(),
        fs_type: "ext4".to_string(),
        total_bytes,
        available_bytes,
    }
}

/// Write `content` to a fresh temporary `.ini` file
pub fn config_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".ini")
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
