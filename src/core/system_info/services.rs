use log::{debug, warn};

use crate::core::system_info::source::SystemSource;
use crate::core::system_info::types::ServiceCheck;

/// Running state of each configured service.
///
/// A service is running when a process with exactly its name exists. When
/// none does, the service manager gets the final word if there is one.
pub fn collect(source: &dyn SystemSource, names: &[String]) -> Vec<ServiceCheck> {
    if names.is_empty() {
        return Vec::new();
    }

    let processes = source.process_names().map_err(|e| {
        warn!("Failed to read the process table for service checks: {}", e);
        e
    });

    names
        .iter()
        .map(|name| {
            let by_process = processes
                .as_ref()
                .ok()
                .map(|procs| procs.iter().any(|p| p == name));

            let active = match by_process {
                Some(true) => Some(true),
                _ => match source.service_manager_active(name) {
                    Ok(Some(active)) => {
                        debug!("Service manager reports {} active={}", name, active);
                        Some(active)
                    }
                    Ok(None) => by_process,
                    Err(e) => {
                        warn!("Failed to query the service manager for {}: {}", name, e);
                        by_process
                    }
                },
            };

            ServiceCheck {
                name: name.clone(),
                active,
            }
        })
        .collect()
}
