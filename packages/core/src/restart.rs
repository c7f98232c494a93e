//! Interface restart
//!
//! Decides whether an interface is currently up by scanning the output of the
//! list command, then either brings it up or cycles it down and up again.

use crate::config::{IFACE_PLACEHOLDER, Settings};
use crate::error::ProcessError;
use crate::interfaces::InterfaceName;
use crate::process::{CommandResult, CommandRunner, OutputStream};
use tracing::{debug, info};

/// Command templates used to restart an interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartCommands {
    pub list: String,
    pub up: String,
    pub down: String,
}

impl RestartCommands {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            list: settings.list_command.clone(),
            up: settings.up_command.clone(),
            down: settings.down_command.clone(),
        }
    }

    /// Command for an interface in the given state
    ///
    /// Down: the up command alone. Up: down then up, the second only running
    /// if the first succeeded.
    pub fn restart_command(&self, iface: &InterfaceName, is_up: bool) -> String {
        let up = self.up.replace(IFACE_PLACEHOLDER, iface.as_str());
        if is_up {
            let down = self.down.replace(IFACE_PLACEHOLDER, iface.as_str());
            format!("{down} && {up}")
        } else {
            up
        }
    }
}

/// Whether any line of list output names `iface`
///
/// A line names the interface when, ignoring leading whitespace, it starts
/// with the name followed by end of line, whitespace, `:` or `@`.
pub fn interface_listed(output: &str, iface: &str) -> bool {
    output.lines().any(|line| {
        line.trim_start()
            .strip_prefix(iface)
            .is_some_and(|rest| match rest.chars().next() {
                None => true,
                Some(c) => c.is_whitespace() || c == ':' || c == '@',
            })
    })
}

/// Restarts interfaces through a [`CommandRunner`]
pub struct InterfaceRestart<'a, R: CommandRunner> {
    runner: &'a R,
    commands: RestartCommands,
}

impl<'a, R: CommandRunner> InterfaceRestart<'a, R> {
    pub fn new(runner: &'a R, commands: RestartCommands) -> Self {
        Self { runner, commands }
    }

    /// Whether the interface currently shows up in the list command output
    ///
    /// A non-zero exit from the list command is not fatal; whatever it
    /// printed is still scanned.
    pub fn is_up(&self, iface: &InterfaceName) -> Result<bool, ProcessError> {
        let listing = self.runner.run(&self.commands.list, OutputStream::Stdout)?;
        if !listing.success() {
            debug!(
                "List command exited with {}, scanning partial output",
                listing.exit_code
            );
        }
        Ok(interface_listed(&listing.output, iface.as_str()))
    }

    /// Bring the interface up, cycling it first if it is already up
    pub fn restart(&self, iface: &InterfaceName) -> Result<CommandResult, ProcessError> {
        let is_up = self.is_up(iface)?;
        let command = self.commands.restart_command(iface, is_up);
        info!(
            "Restarting {} ({}): {}",
            iface,
            if is_up { "up" } else { "down" },
            command
        );
        self.runner.run(&command, OutputStream::Combined)
    }
}
