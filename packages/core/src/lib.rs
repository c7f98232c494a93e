//! ifaces-wizard-core - Core library for ifaces-wizard
//!
//! Holds everything the wizard does that isn't presentation: the interfaces
//! file model, running shell commands, restarting interfaces, writing new
//! configurations and loading settings.

pub mod config;
pub mod error;
pub mod interfaces;
pub mod process;
pub mod restart;
pub mod system;
pub mod writer;

pub use config::{Settings, load_settings};
pub use error::{
    ApplyError, ConfigError, FormValidationError, InvalidInterfaceName, PersistenceError,
    ProcessError,
};
pub use interfaces::{
    Adapter, AdapterRecord, AddressConfig, AddressSource, InterfaceName, InterfacesFile,
    StaticParams,
};
pub use process::{CommandResult, CommandRunner, OutputStream, ShellRunner};
pub use restart::{InterfaceRestart, RestartCommands};
pub use writer::ConfigurationWriter;

/// Get the version of ifaces-wizard-core
pub fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_version() {
        assert!(!get_version().is_empty());
    }
}
