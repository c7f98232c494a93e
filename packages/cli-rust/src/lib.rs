//! ifaces-wizard CLI - Configure a network interface interactively
//!
//! This module contains the CLI implementation used by the binary.

mod constants;
mod output;
pub mod wizard;

use crate::constants::ROOT_REQUIRED;
use crate::output::show_config_error;
use crate::wizard::{TerminalDialog, Wizard};
use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use ifaces_wizard_core::config::{self, format_validation_warning};
use ifaces_wizard_core::system::list_system_interfaces;
use ifaces_wizard_core::{InterfacesFile, Settings, ShellRunner, get_version, load_settings};
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Configure a network interface in /etc/network/interfaces
#[derive(Parser, Debug)]
#[command(name = "ifaces-wizard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Configure a network interface for DHCP or a static address", long_about = None)]
struct Cli {
    /// Settings file (default: IFACES_WIZARD_CONFIG, then the user config dir)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Interfaces file to edit instead of the configured one
    #[arg(long, value_name = "PATH")]
    interfaces: Option<PathBuf>,

    /// Refuse to run without root privileges
    #[arg(long)]
    require_root: bool,

    /// Exit 1 on failure and 2 on cancel
    #[arg(long)]
    exit_codes: bool,

    /// Increase verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    /// Apply command line overrides on top of loaded settings
    fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(path) = &self.interfaces {
            settings.interfaces_path = path.clone();
        }
        settings.require_root |= self.require_root;
        settings.distinct_exit_codes |= self.exit_codes;
    }
}

/// Default filter directive for a verbosity count
fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn init_tracing(verbose: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn is_root() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail
    unsafe { libc::geteuid() == 0 }
}

/// Run the wizard, returning the process exit code
pub fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Configure color output
    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
    init_tracing(cli.verbose);

    let settings_file = config::settings_file(cli.config.as_deref());
    let mut settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            show_config_error(&e, settings_file.as_deref());
            return Ok(1);
        }
    };
    cli.apply_overrides(&mut settings);

    match config::check_settings(&settings) {
        Ok(warnings) => {
            for warning in &warnings {
                warn!("{}", warning.message);
                if cli.verbose > 0 {
                    eprintln!(
                        "{}",
                        format_validation_warning(warning, settings_file.as_deref())
                    );
                }
            }
        }
        Err(e) => {
            show_config_error(&e, settings_file.as_deref());
            return Ok(1);
        }
    }

    if settings.require_root && !is_root() {
        eprintln!("{}", style(ROOT_REQUIRED).red());
        return Ok(1);
    }

    if cli.verbose > 0 {
        eprintln!(
            "{} ifaces-wizard {}",
            style("[info]").cyan(),
            get_version()
        );
        eprintln!(
            "{} Interfaces file: {}",
            style("[info]").cyan(),
            settings.interfaces_path.display()
        );
    }

    let interfaces = InterfacesFile::load(&settings.interfaces_path)
        .context("Could not load the interfaces file")?
        .with_backup(settings.backup);
    let system_interfaces = if settings.include_system_interfaces {
        list_system_interfaces()
    } else {
        Vec::new()
    };
    debug!(
        "{} stanzas, {} kernel interfaces",
        interfaces.adapters().len(),
        system_interfaces.len()
    );

    let runner = ShellRunner::new(settings.shell.as_str());
    let mut dialog = TerminalDialog::new();
    let outcome = Wizard::new(
        &mut dialog,
        &settings,
        interfaces,
        system_interfaces,
        &runner,
    )
    .run()?;

    Ok(outcome.exit_code(settings.distinct_exit_codes))
}
