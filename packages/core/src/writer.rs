//! Configuration writer
//!
//! Replaces an interface's stanza with a freshly built record, persists the
//! interfaces file and restarts the interface.

use crate::error::ApplyError;
use crate::interfaces::{Adapter, AdapterRecord, InterfacesFile};
use crate::process::{CommandResult, CommandRunner};
use crate::restart::InterfaceRestart;
use tracing::info;

/// Position new records are inserted at (most recently configured first)
pub const INSERT_POSITION: usize = 0;

pub struct ConfigurationWriter<'a, R: CommandRunner> {
    restart: InterfaceRestart<'a, R>,
}

impl<'a, R: CommandRunner> ConfigurationWriter<'a, R> {
    pub fn new(restart: InterfaceRestart<'a, R>) -> Self {
        Self { restart }
    }

    /// Persist `record` and restart its interface
    ///
    /// Any stanza for the record's interface is removed first, so calling
    /// this again after a failed write never leaves duplicates. The restart
    /// result is returned as-is; a non-zero exit code is not an error here.
    pub fn apply(
        &self,
        interfaces: &mut InterfacesFile,
        existing: Option<&AdapterRecord>,
        record: &AdapterRecord,
    ) -> Result<CommandResult, ApplyError> {
        if let Some(existing) = existing {
            interfaces.remove_adapter_by_name(existing.name.as_str());
        }
        interfaces.remove_adapter_by_name(record.name.as_str());
        interfaces.add_adapter(Adapter::from(record), INSERT_POSITION);
        interfaces.write()?;

        info!(
            "Wrote {} configuration for {} to {}",
            record.source(),
            record.name,
            interfaces.path().display()
        );

        Ok(self.restart.restart(&record.name)?)
    }
}
