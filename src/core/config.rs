//! Typed configuration loaded from an INI file.
//!
//! Every recognized option is listed here with its default. A missing file
//! or a missing key falls back to the default; a malformed value is a fatal
//! configuration error.

use ini::{Ini, ParseOption};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::system_info::types::{parse_port, PortSpec, Protocol};
use crate::core::thresholds::Thresholds;
use crate::error::{MotdError, Result};

/// System-wide configuration file
pub const SYSTEM_CONFIG_PATH: &str = "/etc/motdstats.ini";

pub const DEFAULT_COL_WIDTH: usize = 32;
pub const DEFAULT_MAX_LINES: usize = 15;

/// Narrowest column that still fits a one-character label next to the widest value field
pub const MIN_COL_WIDTH: usize = 16;

/// Pseudo filesystems never worth reporting
pub const DEFAULT_IGNORED_FS_TYPES: [&str; 10] = [
    "tmpfs",
    "devtmpfs",
    "devpts",
    "proc",
    "sysfs",
    "debugfs",
    "squashfs",
    "overlay",
    "efivarfs",
    "swap",
];

/// How the three status blocks are arranged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Side by side, separated by ` | `
    #[default]
    Columns,
    /// One block after another
    Stacked,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayConfig {
    pub col_width: usize,
    pub max_lines: usize,
    /// Widen columns to fill the terminal when stdout is a tty
    pub auto_width: bool,
    pub layout: Layout,
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            col_width: DEFAULT_COL_WIDTH,
            max_lines: DEFAULT_MAX_LINES,
            auto_width: true,
            layout: Layout::Columns,
            color: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdConfig {
    /// Percent used per partition
    pub disk: Thresholds,
    /// MiB free per partition, disabled unless configured
    pub disk_free: Option<Thresholds>,
    /// Percent of physical memory (also buffers, cached, reclaimable)
    pub memory: Thresholds,
    /// Percent of swap used
    pub swap: Thresholds,
    /// 1-minute load average
    pub load: Thresholds,
    /// Multiply the load bounds by the CPU count before comparing.
    ///
    /// Off by default: the bounds are absolute 1-minute load values, so a
    /// two-CPU host at load 3.0 is critical with the stock 1.0 / 2.0 pair.
    /// Set `per_cpu = true` under `[threshold.load]` to treat them as
    /// load per CPU instead.
    pub load_per_cpu: bool,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            disk: Thresholds::higher_is_worse(80.0, 90.0),
            disk_free: None,
            memory: Thresholds::higher_is_worse(80.0, 90.0),
            swap: Thresholds::higher_is_worse(10.0, 20.0),
            load: Thresholds::higher_is_worse(1.0, 2.0),
            load_per_cpu: false,
        }
    }
}

impl ThresholdConfig {
    pub fn validate(&self) -> Result<()> {
        self.disk.validate("threshold.disk")?;
        if let Some(ref disk_free) = self.disk_free {
            disk_free.validate("threshold.disk_free")?;
        }
        self.memory.validate("threshold.memory")?;
        self.swap.validate("threshold.swap")?;
        self.load.validate("threshold.load")?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub display: DisplayConfig,
    pub thresholds: ThresholdConfig,
    /// Service names, sorted and deduplicated
    pub services: Vec<String>,
    /// Ports to check, sorted by port then protocol
    pub ports: Vec<PortSpec>,
    pub ignore_partitions: Vec<String>,
    pub ignore_fs_types: Vec<String>,
    /// File the configuration was read from, `None` when running on defaults
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            thresholds: ThresholdConfig::default(),
            services: Vec::new(),
            ports: Vec::new(),
            ignore_partitions: Vec::new(),
            ignore_fs_types: DEFAULT_IGNORED_FS_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            source: None,
        }
    }
}

impl Config {
    /// Load the configuration.
    ///
    /// With an explicit path only that file is considered. Otherwise the
    /// system file is tried first, then the per-user one. Whichever path is
    /// chosen, a file that does not exist yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let candidates = match explicit {
            Some(path) => vec![path.to_path_buf()],
            None => Self::default_paths(),
        };

        for path in &candidates {
            if let Some(config) = Self::load_file(path)? {
                return Ok(config);
            }
        }

        info!("No configuration file found, using defaults");
        Ok(Config::default())
    }

    /// Candidate locations searched when no path is given
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(SYSTEM_CONFIG_PATH)];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("motdstats").join("motdstats.ini"));
        }
        paths
    }

    /// Read and parse one file. `Ok(None)` when the file does not exist.
    pub fn load_file(path: &Path) -> Result<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Config file {} not found", path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(MotdError::config(format!(
                    "cannot read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let mut config = Self::parse_str(&content, &path.display().to_string())?;
        config.source = Some(path.to_path_buf());
        debug!("Loaded configuration from {}", path.display());
        Ok(Some(config))
    }

    /// Parse INI text. `origin` only appears in error messages.
    pub fn parse_str(content: &str, origin: &str) -> Result<Self> {
        // Indented lines continue the previous value, so lists may span lines
        let options = ParseOption {
            enabled_indented_mutiline_value: true,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(content, options).map_err(|e| MotdError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;

        let mut config = Config::default();
        let mut services = BTreeSet::new();
        let mut ports = BTreeSet::new();

        for (section, props) in ini.iter() {
            let section = section.map(|s| s.trim().to_ascii_lowercase());

            for (key, value) in props.iter() {
                let key = key.trim().to_ascii_lowercase();
                let value = value.trim();

                match section.as_deref() {
                    Some("display") => apply_display(&mut config.display, &key, value)?,
                    Some("threshold") => apply_legacy_threshold(&mut config.thresholds, &key, value)?,
                    Some(name) if name.starts_with("threshold.") => {
                        apply_threshold(&mut config.thresholds, name, &key, value)?
                    }
                    Some("services") => match key.as_str() {
                        "names" | "services_to_monitor" => services.extend(parse_list(value)),
                        _ => warn_unknown(section.as_deref(), &key),
                    },
                    Some("ports") => apply_ports(&mut ports, &key, value)?,
                    Some("ignore_partitions") => match key.as_str() {
                        "mount_points" => config.ignore_partitions.extend(parse_list(value)),
                        _ => warn_unknown(section.as_deref(), &key),
                    },
                    Some("disk") => match key.as_str() {
                        "fs_exclude" => config.ignore_partitions.extend(parse_list(value)),
                        _ => warn_unknown(section.as_deref(), &key),
                    },
                    Some("ignore_fs_types") => match key.as_str() {
                        "types" => config.ignore_fs_types = parse_list(value),
                        _ => warn_unknown(section.as_deref(), &key),
                    },
                    _ => warn_unknown(section.as_deref(), &key),
                }
            }
        }

        config.services = services.into_iter().collect();
        config.ports = ports.into_iter().collect();
        config.ignore_partitions.sort();
        config.ignore_partitions.dedup();

        config.thresholds.validate()?;

        Ok(config)
    }

    pub fn is_partition_ignored(&self, mount_point: &str, fs_type: &str) -> bool {
        self.ignore_partitions.iter().any(|p| p == mount_point)
            || self
                .ignore_fs_types
                .iter()
                .any(|t| t.eq_ignore_ascii_case(fs_type))
    }
}

fn warn_unknown(section: Option<&str>, key: &str) {
    warn!(
        "Ignoring unknown configuration key '{}' in section [{}]",
        key,
        section.unwrap_or("")
    );
}

fn apply_display(display: &mut DisplayConfig, key: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Ok(());
    }

    match key {
        "col_width" => {
            let width = parse_count("display", key, value)?;
            if width < MIN_COL_WIDTH {
                return Err(MotdError::config(format!(
                    "[display] col_width must be at least {}, got {}",
                    MIN_COL_WIDTH, width
                )));
            }
            display.col_width = width;
        }
        "max_lines" | "max_rows" => {
            let lines = parse_count("display", key, value)?;
            if lines == 0 {
                return Err(MotdError::config("[display] max_lines must be at least 1"));
            }
            display.max_lines = lines;
        }
        "auto_width" => display.auto_width = parse_bool("display", key, value)?,
        "color" => display.color = parse_bool("display", key, value)?,
        "layout" => {
            display.layout = match value.to_ascii_lowercase().as_str() {
                "columns" => Layout::Columns,
                "stacked" => Layout::Stacked,
                other => {
                    return Err(MotdError::config(format!(
                        "[display] layout must be 'columns' or 'stacked', got '{}'",
                        other
                    )))
                }
            }
        }
        _ => warn_unknown(Some("display"), key),
    }

    Ok(())
}

/// `[threshold.<metric>]` sections with `warning` / `critical` keys
fn apply_threshold(
    thresholds: &mut ThresholdConfig,
    section: &str,
    key: &str,
    value: &str,
) -> Result<()> {
    if value.is_empty() {
        return Ok(());
    }

    let metric = &section["threshold.".len()..];

    if metric == "load" && key == "per_cpu" {
        thresholds.load_per_cpu = parse_bool(section, key, value)?;
        return Ok(());
    }

    let target = match metric {
        "disk" => &mut thresholds.disk,
        "memory" | "mem" => &mut thresholds.memory,
        "swap" => &mut thresholds.swap,
        "load" => &mut thresholds.load,
        "disk_free" => thresholds
            .disk_free
            .get_or_insert(Thresholds::lower_is_worse(f64::INFINITY, f64::NEG_INFINITY)),
        _ => {
            warn_unknown(Some(section), key);
            return Ok(());
        }
    };

    match key {
        "warning" => target.warning = parse_bound(section, key, value)?,
        "critical" => target.critical = parse_bound(section, key, value)?,
        _ => warn_unknown(Some(section), key),
    }

    Ok(())
}

/// Flat `[threshold]` section: `disk_warning`, `mem_critical`, ...
fn apply_legacy_threshold(thresholds: &mut ThresholdConfig, key: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Ok(());
    }

    let (metric, bound) = match key.rsplit_once('_') {
        Some(pair) => pair,
        None => {
            warn_unknown(Some("threshold"), key);
            return Ok(());
        }
    };

    let target = match metric {
        "disk" => &mut thresholds.disk,
        "mem" | "memory" => &mut thresholds.memory,
        "swap" => &mut thresholds.swap,
        "load" => &mut thresholds.load,
        _ => {
            warn_unknown(Some("threshold"), key);
            return Ok(());
        }
    };

    match bound {
        "warning" => target.warning = parse_bound("threshold", key, value)?,
        "critical" => target.critical = parse_bound("threshold", key, value)?,
        _ => warn_unknown(Some("threshold"), key),
    }

    Ok(())
}

fn apply_ports(ports: &mut BTreeSet<PortSpec>, key: &str, value: &str) -> Result<()> {
    let legacy_protocol = match key {
        "listen" => {
            for entry in parse_list(value) {
                ports.insert(entry.parse::<PortSpec>()?);
            }
            return Ok(());
        }
        "tcp_ports_to_monitor" => Protocol::Tcp,
        "tcp6_ports_to_monitor" => Protocol::Tcp6,
        "udp_ports_to_monitor" => Protocol::Udp,
        "udp6_ports_to_monitor" => Protocol::Udp6,
        _ => {
            warn_unknown(Some("ports"), key);
            return Ok(());
        }
    };

    for entry in parse_list(value) {
        ports.insert(PortSpec::new(legacy_protocol, parse_port(&entry)?));
    }

    Ok(())
}

/// Split a comma- or newline-separated list, dropping blank entries
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bound(section: &str, key: &str, value: &str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(MotdError::invalid_threshold(
            section,
            key,
            format!("'{}' is not a number", value),
        )),
    }
}

fn parse_count(section: &str, key: &str, value: &str) -> Result<usize> {
    value.parse::<usize>().map_err(|_| {
        MotdError::config(format!(
            "[{}] {} must be a positive integer, got '{}'",
            section, key, value
        ))
    })
}

fn parse_bool(section: &str, key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(MotdError::config(format!(
            "[{}] {} must be true or false, got '{}'",
            section, key, value
        ))),
    }
}
