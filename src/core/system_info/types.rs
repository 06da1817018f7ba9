use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::thresholds::Classification;
use crate::error::MotdError;

/// Value shown when a metric could not be read
pub const NOT_AVAILABLE: &str = "n/a";

/// Socket table a port is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Tcp,
    Tcp6,
    Udp,
    Udp6,
}

impl Protocol {
    pub const ALL: [Protocol; 4] = [Protocol::Tcp, Protocol::Tcp6, Protocol::Udp, Protocol::Udp6];

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::Tcp6 => "tcp6",
            Protocol::Udp => "udp",
            Protocol::Udp6 => "udp6",
        }
    }

    pub fn is_tcp(&self) -> bool {
        matches!(self, Protocol::Tcp | Protocol::Tcp6)
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = MotdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tcp" => Ok(Protocol::Tcp),
            "tcp6" => Ok(Protocol::Tcp6),
            "udp" => Ok(Protocol::Udp),
            "udp6" => Ok(Protocol::Udp6),
            other => Err(MotdError::config(format!(
                "unknown protocol '{}' (expected tcp, tcp6, udp or udp6)",
                other
            ))),
        }
    }
}

/// A configured (protocol, port) pair. Ordered by port first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PortSpec {
    pub port: u16,
    pub protocol: Protocol,
}

impl PortSpec {
    pub fn new(protocol: Protocol, port: u16) -> Self {
        Self { port, protocol }
    }
}

impl std::fmt::Display for PortSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.port, self.protocol)
    }
}

/// Parses `protocol:port`, e.g. `tcp:22` or `udp6:53`
impl FromStr for PortSpec {
    type Err = MotdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (proto, port) = s.trim().split_once(':').ok_or_else(|| {
            MotdError::config(format!("port entry '{}' is not in protocol:port form", s))
        })?;

        let protocol = proto.parse::<Protocol>()?;
        let port = parse_port(port)?;

        Ok(PortSpec::new(protocol, port))
    }
}

pub(crate) fn parse_port(value: &str) -> Result<u16, MotdError> {
    match value.trim().parse::<u16>() {
        Ok(0) | Err(_) => Err(MotdError::config(format!(
            "'{}' is not a valid port number",
            value.trim()
        ))),
        Ok(port) => Ok(port),
    }
}

/// 1, 5 and 15 minute load averages
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadAverage {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

/// A mounted filesystem as reported by the mount table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub mount_point: String,
    pub fs_type: String,
    pub total_bytes: u64,
    pub available_bytes: u64,
}

/// Subset of `/proc/meminfo`, values in KiB
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemInfo {
    pub total_kib: u64,
    pub free_kib: u64,
    pub swap_total_kib: u64,
    pub swap_free_kib: u64,
    pub buffers_kib: u64,
    pub cached_kib: u64,
    pub reclaimable_kib: u64,
}

/// A socket found in the kernel socket tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListeningSocket {
    pub protocol: Protocol,
    pub port: u16,
}

/// One collected metric, ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    pub name: String,
    pub value: String,
    pub numeric: Option<f64>,
    pub classification: Classification,
}

impl MetricResult {
    /// A purely informational metric that is never classified
    pub fn info<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            numeric: None,
            classification: Classification::Ok,
        }
    }

    pub fn classified<N: Into<String>, V: Into<String>>(
        name: N,
        value: V,
        numeric: f64,
        classification: Classification,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            numeric: Some(numeric),
            classification,
        }
    }

    pub fn unknown<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            value: NOT_AVAILABLE.to_string(),
            numeric: None,
            classification: Classification::Unknown,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.classification == Classification::Unknown
    }
}

/// Running state of a configured service. `None` when it could not be determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCheck {
    pub name: String,
    pub active: Option<bool>,
}

impl ServiceCheck {
    pub fn classification(&self) -> Classification {
        match self.active {
            Some(true) => Classification::Ok,
            Some(false) => Classification::Critical,
            None => Classification::Unknown,
        }
    }

    pub fn status(&self) -> &'static str {
        match self.active {
            Some(true) => "running",
            Some(false) => "KO",
            None => NOT_AVAILABLE,
        }
    }
}

/// Listening state of a configured port. `None` when the socket table was unreadable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortCheck {
    pub spec: PortSpec,
    pub listening: Option<bool>,
}

impl PortCheck {
    pub fn classification(&self) -> Classification {
        match self.listening {
            Some(true) => Classification::Ok,
            Some(false) => Classification::Critical,
            None => Classification::Unknown,
        }
    }

    pub fn status(&self) -> &'static str {
        match self.listening {
            Some(true) => "listening",
            Some(false) => "KO",
            None => NOT_AVAILABLE,
        }
    }
}

/// Everything gathered during one run, in collection order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub hostname: String,
    pub generated_at: DateTime<Local>,
    pub network: MetricResult,
    pub users: MetricResult,
    pub processes: MetricResult,
    pub uptime: MetricResult,
    pub load: MetricResult,
    pub cpus: MetricResult,
    pub disks: Vec<MetricResult>,
    pub memory: Vec<MetricResult>,
    pub services: Vec<ServiceCheck>,
    pub ports: Vec<PortCheck>,
}

impl Report {
    /// Summary metrics in display order
    pub fn summary(&self) -> [&MetricResult; 6] {
        [
            &self.network,
            &self.users,
            &self.processes,
            &self.uptime,
            &self.load,
            &self.cpus,
        ]
    }

    pub fn disk_status(&self) -> Classification {
        Classification::worst(self.disks.iter().map(|d| d.classification))
    }

    pub fn memory_status(&self) -> Classification {
        Classification::worst(self.memory.iter().map(|m| m.classification))
    }

    pub fn services_status(&self) -> Classification {
        Classification::worst(
            self.services
                .iter()
                .map(ServiceCheck::classification)
                .chain(self.ports.iter().map(PortCheck::classification)),
        )
    }
}
