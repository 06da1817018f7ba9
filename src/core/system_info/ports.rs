use log::warn;
use std::collections::HashSet;

use crate::core::system_info::source::SystemSource;
use crate::core::system_info::types::{ListeningSocket, PortCheck, PortSpec};

/// Listening state of each configured port
pub fn collect(source: &dyn SystemSource, specs: &[PortSpec]) -> Vec<PortCheck> {
    if specs.is_empty() {
        return Vec::new();
    }

    let listening: Option<HashSet<ListeningSocket>> = match source.listening_sockets() {
        Ok(sockets) => Some(sockets.into_iter().collect()),
        Err(e) => {
            warn!("Failed to read the socket tables: {}", e);
            None
        }
    };

    specs
        .iter()
        .map(|spec| PortCheck {
            spec: *spec,
            listening: listening.as_ref().map(|set| {
                set.contains(&ListeningSocket {
                    protocol: spec.protocol,
                    port: spec.port,
                })
            }),
        })
        .collect()
}
