//! Interactive configuration wizard
//!
//! Welcome -> interface -> address source -> (static form) -> apply. Each
//! step returns the next one; cancelling any prompt jumps to the end.

mod dialog;
mod summary;
mod terminal;

pub use dialog::{Dialog, FormField, MenuChoice, MessageKind, Reply};
pub use summary::render_record;
pub use terminal::TerminalDialog;

use crate::constants::{
    CONFIG_ERROR, CONFIG_SUCCESS, CONFIGURING_DHCP, CONFIGURING_STATIC, FORM_FIELD_LENGTH,
    NO_INTERFACES, SELECT_INTERFACE, SELECT_SOURCE, STATIC_FORM_TITLE, WELCOME, WELCOME_NO,
    WELCOME_YES,
};
use crate::output::{format_apply_error, format_retry_message};
use anyhow::{Result, anyhow};
use ifaces_wizard_core::system::selectable_interfaces;
use ifaces_wizard_core::{
    AdapterRecord, AddressSource, CommandResult, CommandRunner, ConfigurationWriter,
    InterfaceName, InterfaceRestart, InterfacesFile, RestartCommands, Settings, StaticParams,
};
use tracing::{debug, info};

/// How a wizard run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardOutcome {
    /// Configuration written and the interface restarted cleanly
    Completed,
    /// No interfaces, an error while applying, or a failed restart
    Failed,
    /// The user backed out of a prompt
    Cancelled,
}

impl WizardOutcome {
    /// Process exit code
    ///
    /// Always 0 unless `distinct` is set, in which case failures exit 1 and
    /// cancellation exits 2.
    pub fn exit_code(self, distinct: bool) -> i32 {
        match (distinct, self) {
            (false, _) | (true, WizardOutcome::Completed) => 0,
            (true, WizardOutcome::Failed) => 1,
            (true, WizardOutcome::Cancelled) => 2,
        }
    }
}

enum Step {
    Welcome,
    SelectInterface,
    SelectSource {
        iface: InterfaceName,
        existing: Option<AdapterRecord>,
    },
    StaticEntry {
        iface: InterfaceName,
        existing: Option<AdapterRecord>,
        values: [String; 3],
    },
    ApplyDhcp {
        iface: InterfaceName,
        existing: Option<AdapterRecord>,
    },
    Terminated(WizardOutcome),
}

/// Drives the dialog through one configuration run
pub struct Wizard<'a, D: Dialog, R: CommandRunner> {
    dialog: &'a mut D,
    settings: &'a Settings,
    interfaces: InterfacesFile,
    system_interfaces: Vec<String>,
    writer: ConfigurationWriter<'a, R>,
}

impl<'a, D: Dialog, R: CommandRunner> Wizard<'a, D, R> {
    pub fn new(
        dialog: &'a mut D,
        settings: &'a Settings,
        interfaces: InterfacesFile,
        system_interfaces: Vec<String>,
        runner: &'a R,
    ) -> Self {
        let restart = InterfaceRestart::new(runner, RestartCommands::from_settings(settings));
        Self {
            dialog,
            settings,
            interfaces,
            system_interfaces,
            writer: ConfigurationWriter::new(restart),
        }
    }

    /// Run until the user finishes or cancels; clears the screen on exit
    pub fn run(&mut self) -> Result<WizardOutcome> {
        let mut step = Step::Welcome;
        loop {
            step = match step {
                Step::Welcome => self.welcome()?,
                Step::SelectInterface => self.select_interface()?,
                Step::SelectSource { iface, existing } => self.select_source(iface, existing)?,
                Step::StaticEntry {
                    iface,
                    existing,
                    values,
                } => self.static_entry(iface, existing, values)?,
                Step::ApplyDhcp { iface, existing } => self.apply_dhcp(iface, existing)?,
                Step::Terminated(outcome) => {
                    debug!("Wizard finished: {:?}", outcome);
                    self.dialog.clear()?;
                    return Ok(outcome);
                }
            };
        }
    }

    fn welcome(&mut self) -> Result<Step> {
        Ok(match self.dialog.yesno(WELCOME, WELCOME_YES, WELCOME_NO)? {
            Reply::Ok(()) => Step::SelectInterface,
            Reply::Cancel | Reply::Escape => Step::Terminated(WizardOutcome::Cancelled),
        })
    }

    fn select_interface(&mut self) -> Result<Step> {
        let selectable = selectable_interfaces(&self.interfaces, &self.system_interfaces);
        if selectable.is_empty() {
            debug!("No selectable interfaces");
            self.dialog.msgbox(NO_INTERFACES, MessageKind::Error)?;
            return Ok(Step::Terminated(WizardOutcome::Failed));
        }

        let choices: Vec<MenuChoice> = selectable
            .iter()
            .map(|iface| MenuChoice::new(iface.as_str(), iface.as_str()))
            .collect();
        let Some(tag) = self.dialog.menu(SELECT_INTERFACE, &choices)?.ok() else {
            return Ok(Step::Terminated(WizardOutcome::Cancelled));
        };

        let iface = selectable
            .into_iter()
            .find(|iface| iface.as_str() == tag)
            .ok_or_else(|| anyhow!("Unknown interface selected: {tag}"))?;

        // Pending edit: the stanza is dropped in memory and only written on apply
        let existing = self.interfaces.existing_record(&iface);
        self.interfaces.remove_adapter_by_name(iface.as_str());
        debug!("Selected {} (existing: {:?})", iface, existing);

        Ok(Step::SelectSource { iface, existing })
    }

    fn select_source(
        &mut self,
        iface: InterfaceName,
        existing: Option<AdapterRecord>,
    ) -> Result<Step> {
        let choices: Vec<MenuChoice> = [AddressSource::Dhcp, AddressSource::Static]
            .into_iter()
            .map(|source| MenuChoice::new(source.as_str(), source.label()))
            .collect();
        let Some(tag) = self.dialog.menu(SELECT_SOURCE, &choices)?.ok() else {
            return Ok(Step::Terminated(WizardOutcome::Cancelled));
        };

        Ok(
            match AddressSource::from_method(&tag)
                .ok_or_else(|| anyhow!("Unknown address source selected: {tag}"))?
            {
                AddressSource::Dhcp => Step::ApplyDhcp { iface, existing },
                AddressSource::Static => {
                    let values = initial_static_values(existing.as_ref(), self.settings);
                    Step::StaticEntry {
                        iface,
                        existing,
                        values,
                    }
                }
            },
        )
    }

    fn static_entry(
        &mut self,
        iface: InterfaceName,
        existing: Option<AdapterRecord>,
        values: [String; 3],
    ) -> Result<Step> {
        let fields: Vec<FormField> = StaticParams::FIELDS
            .iter()
            .zip(&values)
            .map(|(label, initial)| FormField {
                label: label.to_string(),
                initial: initial.clone(),
                max_len: FORM_FIELD_LENGTH,
            })
            .collect();

        let Some(submitted) = self.dialog.form(STATIC_FORM_TITLE, &fields)?.ok() else {
            return Ok(Step::Terminated(WizardOutcome::Cancelled));
        };

        let params = match StaticParams::from_form(&submitted) {
            Ok(params) => params,
            Err(e) => {
                debug!("Rejected static form: {}", e);
                self.dialog
                    .msgbox(&format_retry_message(&e), MessageKind::Error)?;
                return Ok(Step::StaticEntry {
                    iface,
                    existing,
                    values: resubmitted_values(&submitted, values),
                });
            }
        };

        let record = AdapterRecord::static_ip(iface.clone(), params.clone());
        self.dialog
            .infobox(&format!("{CONFIGURING_STATIC}\n{}", render_record(&record)))?;

        match self
            .writer
            .apply(&mut self.interfaces, existing.as_ref(), &record)
        {
            Ok(result) => self.report(&result),
            Err(e) => {
                debug!("Applying static configuration failed: {}", e);
                self.dialog.msgbox(
                    &format_retry_message(&format_apply_error(&e)),
                    MessageKind::Error,
                )?;
                Ok(Step::StaticEntry {
                    iface,
                    existing,
                    values: params.to_form_values(),
                })
            }
        }
    }

    fn apply_dhcp(
        &mut self,
        iface: InterfaceName,
        existing: Option<AdapterRecord>,
    ) -> Result<Step> {
        let record = AdapterRecord::dhcp(iface);
        self.dialog
            .infobox(&format!("{CONFIGURING_DHCP}\n{}", render_record(&record)))?;

        match self
            .writer
            .apply(&mut self.interfaces, existing.as_ref(), &record)
        {
            Ok(result) => self.report(&result),
            Err(e) => {
                debug!("Applying DHCP configuration failed: {}", e);
                self.dialog.msgbox(
                    &format!("{CONFIG_ERROR}\n\n{}", format_apply_error(&e)),
                    MessageKind::Error,
                )?;
                Ok(Step::Terminated(WizardOutcome::Failed))
            }
        }
    }

    /// Show the restart output and finish
    fn report(&mut self, result: &CommandResult) -> Result<Step> {
        let (headline, kind, outcome) = if result.success() {
            (CONFIG_SUCCESS, MessageKind::Success, WizardOutcome::Completed)
        } else {
            (CONFIG_ERROR, MessageKind::Error, WizardOutcome::Failed)
        };
        info!("Restart exited with {}", result.exit_code);

        self.dialog
            .msgbox(&format!("{headline}\n\n{}", result.output), kind)?;
        Ok(Step::Terminated(outcome))
    }
}

/// Static form values when the form is first shown
///
/// The stored values of a static record, otherwise the configured defaults.
fn initial_static_values(existing: Option<&AdapterRecord>, settings: &Settings) -> [String; 3] {
    existing
        .and_then(AdapterRecord::static_params)
        .unwrap_or(&settings.static_defaults)
        .to_form_values()
}

/// Keep what the user typed when re-showing a rejected form
fn resubmitted_values(submitted: &[String], previous: [String; 3]) -> [String; 3] {
    match submitted {
        [address, netmask, gateway] => [address.clone(), netmask.clone(), gateway.clone()],
        _ => previous,
    }
}
