//! Terminal dialog backed by dialoguer
//!
//! Each prompt is drawn under the background title on stderr. Escape (or
//! Ctrl+C while a prompt is open) is reported as [`Reply::Escape`].

use super::dialog::{Dialog, FormField, MenuChoice, MessageKind, Reply};
use crate::constants::BACKGROUND_TITLE;
use crate::output::{CommandSpinner, message_style};
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use std::io::ErrorKind;

pub struct TerminalDialog {
    term: Term,
    theme: ColorfulTheme,
    spinner: Option<CommandSpinner>,
}

impl TerminalDialog {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            theme: ColorfulTheme::default(),
            spinner: None,
        }
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish();
        }
    }

    /// Clear the screen and draw the background title
    fn header(&mut self) -> Result<()> {
        self.stop_spinner();
        if self.term.is_term() {
            self.term.clear_screen()?;
        }
        self.term
            .write_line(&style(BACKGROUND_TITLE).cyan().bold().to_string())?;
        self.term.write_line(
            &style("=".repeat(BACKGROUND_TITLE.len()))
                .dim()
                .to_string(),
        )?;
        self.term.write_line("")?;
        Ok(())
    }

    fn write_text(&self, text: &str) -> Result<()> {
        for line in text.lines() {
            self.term.write_line(line)?;
        }
        self.term.write_line("")?;
        Ok(())
    }
}

impl Default for TerminalDialog {
    fn default() -> Self {
        Self::new()
    }
}

/// Treat an interrupted prompt like Escape
fn escape_on_interrupt<T>(result: dialoguer::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(dialoguer::Error::IO(e)) if e.kind() == ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl Dialog for TerminalDialog {
    fn yesno(&mut self, text: &str, yes_label: &str, no_label: &str) -> Result<Reply<()>> {
        self.header()?;
        self.write_text(text)?;

        let selection = escape_on_interrupt(
            Select::with_theme(&self.theme)
                .items(&[yes_label, no_label])
                .default(0)
                .interact_opt(),
        )?
        .flatten();

        Ok(match selection {
            Some(0) => Reply::Ok(()),
            Some(_) => Reply::Cancel,
            None => Reply::Escape,
        })
    }

    fn menu(&mut self, text: &str, choices: &[MenuChoice]) -> Result<Reply<String>> {
        self.header()?;

        let width = choices.iter().map(|c| c.tag.len()).max().unwrap_or(0);
        let items: Vec<String> = choices
            .iter()
            .map(|choice| {
                if choice.tag == choice.label {
                    choice.tag.clone()
                } else {
                    format!("{:<width$}  {}", choice.tag, style(&choice.label).dim())
                }
            })
            .collect();

        let selection = escape_on_interrupt(
            Select::with_theme(&self.theme)
                .with_prompt(text)
                .items(&items)
                .default(0)
                .interact_opt(),
        )?
        .flatten();

        Ok(match selection {
            Some(index) => Reply::Ok(choices[index].tag.clone()),
            None => Reply::Escape,
        })
    }

    fn form(&mut self, title: &str, fields: &[FormField]) -> Result<Reply<Vec<String>>> {
        self.header()?;
        self.write_text(title)?;

        let mut values = Vec::with_capacity(fields.len());
        for field in fields {
            let max_len = field.max_len;
            let value = escape_on_interrupt(
                Input::<String>::with_theme(&self.theme)
                    .with_prompt(&field.label)
                    .with_initial_text(&field.initial)
                    .allow_empty(true)
                    .validate_with(move |input: &String| -> Result<(), String> {
                        if input.chars().count() > max_len {
                            Err(format!("At most {max_len} characters"))
                        } else {
                            Ok(())
                        }
                    })
                    .interact_text(),
            )?;
            match value {
                Some(value) => values.push(value),
                None => return Ok(Reply::Escape),
            }
        }

        let confirmed = escape_on_interrupt(
            Confirm::with_theme(&self.theme)
                .with_prompt("Apply these values?")
                .default(true)
                .interact_opt(),
        )?
        .flatten();

        Ok(match confirmed {
            Some(true) => Reply::Ok(values),
            Some(false) => Reply::Cancel,
            None => Reply::Escape,
        })
    }

    fn infobox(&mut self, text: &str) -> Result<()> {
        self.header()?;
        let mut lines = text.lines();
        let headline = lines.next().unwrap_or_default().to_string();
        let rest: Vec<&str> = lines.collect();
        self.write_text(&rest.join("\n"))?;
        self.spinner = Some(CommandSpinner::new(&headline));
        Ok(())
    }

    fn msgbox(&mut self, text: &str, kind: MessageKind) -> Result<()> {
        self.header()?;
        let mut lines = text.lines();
        if let Some(headline) = lines.next() {
            self.term
                .write_line(&message_style(kind).apply_to(headline).to_string())?;
        }
        for line in lines {
            self.term.write_line(line)?;
        }
        self.term.write_line("")?;

        if self.term.is_term() {
            self.term
                .write_line(&style("Press any key to continue").dim().to_string())?;
            self.term.read_key()?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.stop_spinner();
        if self.term.is_term() {
            self.term.clear_screen()?;
        }
        self.term.show_cursor()?;
        Ok(())
    }
}
