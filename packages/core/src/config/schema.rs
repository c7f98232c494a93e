//! Settings schema for ifaces-wizard
//!
//! Defines the structure and defaults for the optional config.json file.
//! Settings are read once at startup and only borrowed afterwards.

use crate::interfaces::StaticParams;
use crate::process::DEFAULT_SHELL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Placeholder replaced by the interface name in command templates
pub const IFACE_PLACEHOLDER: &str = "{iface}";

/// Runtime settings
///
/// Serialized to/from `~/.config/ifaces-wizard/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Interfaces file to edit (default: "/etc/network/interfaces")
    #[serde(default = "default_interfaces_path")]
    pub interfaces_path: PathBuf,

    /// Copy the interfaces file to `<path>.bak` before writing (default: true)
    #[serde(default = "default_backup")]
    pub backup: bool,

    /// Shell used to run commands (default: "/bin/sh")
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Lists interfaces that are currently up, one per line
    #[serde(default = "default_list_command")]
    pub list_command: String,

    /// Brings an interface up; `{iface}` is replaced by its name
    #[serde(default = "default_up_command")]
    pub up_command: String,

    /// Brings an interface down; `{iface}` is replaced by its name
    #[serde(default = "default_down_command")]
    pub down_command: String,

    /// Values offered in the static form when nothing is configured yet
    #[serde(default = "default_static_defaults")]
    pub static_defaults: StaticParams,

    /// Also offer kernel interfaces missing from the interfaces file (default: true)
    #[serde(default = "default_include_system_interfaces")]
    pub include_system_interfaces: bool,

    /// Refuse to run without root privileges (default: false)
    #[serde(default)]
    pub require_root: bool,

    /// Exit 1 on failure and 2 on cancel instead of always 0 (default: false)
    #[serde(default)]
    pub distinct_exit_codes: bool,
}

fn default_interfaces_path() -> PathBuf {
    PathBuf::from("/etc/network/interfaces")
}

fn default_backup() -> bool {
    true
}

fn default_shell() -> String {
    DEFAULT_SHELL.to_string()
}

fn default_list_command() -> String {
    "ip -br link show up".to_string()
}

fn default_up_command() -> String {
    format!("ifup {IFACE_PLACEHOLDER}")
}

fn default_down_command() -> String {
    format!("ifdown {IFACE_PLACEHOLDER}")
}

fn default_static_defaults() -> StaticParams {
    StaticParams::new("192.168.0.100", "255.255.255.0", "192.168.0.2")
}

fn default_include_system_interfaces() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interfaces_path: default_interfaces_path(),
            backup: default_backup(),
            shell: default_shell(),
            list_command: default_list_command(),
            up_command: default_up_command(),
            down_command: default_down_command(),
            static_defaults: default_static_defaults(),
            include_system_interfaces: default_include_system_interfaces(),
            require_root: false,
            distinct_exit_codes: false,
        }
    }
}

impl Settings {
    /// Create Settings with default values
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(
            settings.interfaces_path,
            PathBuf::from("/etc/network/interfaces")
        );
        assert!(settings.backup);
        assert_eq!(settings.shell, "/bin/sh");
        assert_eq!(settings.up_command, "ifup {iface}");
        assert_eq!(settings.down_command, "ifdown {iface}");
        assert_eq!(settings.static_defaults.address, "192.168.0.100");
        assert_eq!(settings.static_defaults.netmask, "255.255.255.0");
        assert_eq!(settings.static_defaults.gateway, "192.168.0.2");
        assert!(!settings.require_root);
        assert!(!settings.distinct_exit_codes);
    }

    #[test]
    fn test_deserialize_with_missing_optional_fields() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_deserialize_overrides() {
        let json = r#"{
            "interfaces_path": "/tmp/interfaces",
            "backup": false,
            "static_defaults": {"address": "10.0.0.2", "netmask": "255.0.0.0", "gateway": "10.0.0.1"},
            "distinct_exit_codes": true
        }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.interfaces_path, PathBuf::from("/tmp/interfaces"));
        assert!(!settings.backup);
        assert_eq!(settings.static_defaults.gateway, "10.0.0.1");
        assert!(settings.distinct_exit_codes);
        assert_eq!(settings.list_command, "ip -br link show up");
    }

    #[test]
    fn test_reject_unknown_fields() {
        let json = r#"{"unknown_field": "value"}"#;
        let result: Result<Settings, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
