//! Interface discovery
//!
//! Combines the stanzas of the interfaces file with the interfaces the kernel
//! knows about into the list the user picks from.

use crate::interfaces::{InterfaceName, InterfacesFile};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Where the kernel exposes network interfaces
pub const SYS_CLASS_NET: &str = "/sys/class/net";

/// Interface names under `/sys/class/net`, sorted
pub fn list_system_interfaces() -> Vec<String> {
    list_system_interfaces_in(Path::new(SYS_CLASS_NET))
}

/// Interface names found in `dir`, sorted; empty when it can't be read
pub fn list_system_interfaces_in(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        warn!("Could not read {}", dir.display());
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

/// Interfaces offered for selection
///
/// Stanza names from the file come first in file order, followed by
/// `system` names not already listed. Loopback and names that fail
/// validation are dropped; each name appears once.
pub fn selectable_interfaces(interfaces: &InterfacesFile, system: &[String]) -> Vec<InterfaceName> {
    let mut seen = HashSet::new();
    let mut selectable = Vec::new();

    for name in interfaces.adapter_names().iter().chain(system) {
        if !seen.insert(name.clone()) {
            continue;
        }
        match InterfaceName::new(name.as_str()) {
            Ok(iface) if iface.is_loopback() => {}
            Ok(iface) => selectable.push(iface),
            Err(e) => debug!("Skipping interface: {}", e),
        }
    }

    selectable
}
