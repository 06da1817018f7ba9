//! Parsers for the `/proc` files the host source reads.
//!
//! Parsing is kept separate from file access so it can be exercised with
//! canned file contents.

use std::fs;
use std::path::Path;

use crate::core::system_info::types::{ListeningSocket, LoadAverage, MemInfo, Protocol};
use crate::error::{MotdError, Result};

pub const ROUTE_PATH: &str = "/proc/net/route";
pub const MEMINFO_PATH: &str = "/proc/meminfo";
pub const LOADAVG_PATH: &str = "/proc/loadavg";

/// TCP_LISTEN in the `st` column
const TCP_LISTEN: &str = "0A";
/// TCP_CLOSE, which is how an unconnected bound UDP socket shows up
const UDP_BOUND: &str = "07";

pub fn read(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| {
        MotdError::collection(format!("cannot read {}: {}", path.display(), e))
    })
}

/// Path of the kernel socket table for `protocol`
pub fn socket_table_path(protocol: Protocol) -> String {
    format!("/proc/net/{}", protocol.as_str())
}

/// Interface of the first route whose destination is `00000000`
pub fn parse_default_route(content: &str) -> Option<String> {
    content.lines().skip(1).find_map(|line| {
        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            [iface, "00000000", ..] => Some(iface.to_string()),
            _ => None,
        }
    })
}

/// Extract the fields the memory collector needs. Values stay in KiB.
pub fn parse_meminfo(content: &str) -> Result<MemInfo> {
    let mut info = MemInfo::default();
    let mut has_total = false;

    for line in content.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let Some(value) = rest.split_whitespace().next().and_then(|v| v.parse::<u64>().ok())
        else {
            continue;
        };

        match key.trim() {
            "MemTotal" => {
                info.total_kib = value;
                has_total = true;
            }
            "MemFree" => info.free_kib = value,
            "SwapTotal" => info.swap_total_kib = value,
            "SwapFree" => info.swap_free_kib = value,
            "Buffers" => info.buffers_kib = value,
            "Cached" => info.cached_kib = value,
            "SReclaimable" => info.reclaimable_kib = value,
            _ => {}
        }
    }

    if !has_total {
        return Err(MotdError::collection("no MemTotal entry in meminfo"));
    }

    Ok(info)
}

/// The three averages at the start of `/proc/loadavg`
pub fn parse_loadavg(content: &str) -> Result<LoadAverage> {
    let values: Vec<f64> = content
        .split_whitespace()
        .take(3)
        .map(|v| v.parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| MotdError::collection(format!("malformed loadavg: {}", e)))?;

    match values.as_slice() {
        &[one, five, fifteen] => Ok(LoadAverage { one, five, fifteen }),
        _ => Err(MotdError::collection("loadavg has fewer than three values")),
    }
}

/// Sockets in one `/proc/net/{tcp,tcp6,udp,udp6}` table that accept
/// traffic: LISTEN for TCP, bound for UDP.
pub fn parse_socket_table(content: &str, protocol: Protocol) -> Vec<ListeningSocket> {
    let wanted_state = if protocol.is_tcp() { TCP_LISTEN } else { UDP_BOUND };

    content
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 4 || fields[3] != wanted_state {
                return None;
            }
            let (_, port_hex) = fields[1].rsplit_once(':')?;
            let port = u16::from_str_radix(port_hex, 16).ok()?;
            Some(ListeningSocket { protocol, port })
        })
        .collect()
}
