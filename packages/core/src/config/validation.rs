//! Settings validation with actionable error messages
//!
//! Validates loaded settings and says exactly which value to put in the
//! settings file to fix each issue.

use super::paths;
use super::schema::{IFACE_PLACEHOLDER, Settings};
use crate::interfaces::StaticParams;
use console::style;
use std::path::Path;

/// A settings validation error with a suggested fix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The settings field that has an error
    pub field: String,
    /// Description of what's wrong
    pub message: String,
    /// Settings entry that fixes the issue
    pub fix: String,
}

/// A settings validation warning (non-fatal)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The settings field with a potential issue
    pub field: String,
    /// Description of the warning
    pub message: String,
    /// Suggested settings entry
    pub fix: String,
}

/// Validate settings and return warnings or first error
///
/// Returns Ok(warnings) if validation passes (possibly with non-fatal warnings).
/// Returns Err(error) on the first fatal validation error encountered.
pub fn validate_settings(settings: &Settings) -> Result<Vec<ValidationWarning>, ValidationError> {
    let mut warnings = Vec::new();

    if settings.interfaces_path.as_os_str().is_empty() {
        return Err(ValidationError {
            field: "interfaces_path".to_string(),
            message: "interfaces_path must not be empty".to_string(),
            fix: r#""interfaces_path": "/etc/network/interfaces""#.to_string(),
        });
    }

    if settings.shell.trim().is_empty() {
        return Err(ValidationError {
            field: "shell".to_string(),
            message: "shell must not be empty".to_string(),
            fix: r#""shell": "/bin/sh""#.to_string(),
        });
    }

    if settings.list_command.trim().is_empty() {
        return Err(ValidationError {
            field: "list_command".to_string(),
            message: "list_command must not be empty".to_string(),
            fix: r#""list_command": "ip -br link show up""#.to_string(),
        });
    }

    for (field, value, fix) in [
        ("up_command", &settings.up_command, r#""up_command": "ifup {iface}""#),
        (
            "down_command",
            &settings.down_command,
            r#""down_command": "ifdown {iface}""#,
        ),
    ] {
        if !value.contains(IFACE_PLACEHOLDER) {
            return Err(ValidationError {
                field: field.to_string(),
                message: format!("{field} must contain the {IFACE_PLACEHOLDER} placeholder"),
                fix: fix.to_string(),
            });
        }
    }

    let defaults = settings.static_defaults.to_form_values();
    if let Err(e) = StaticParams::from_form(&defaults) {
        return Err(ValidationError {
            field: "static_defaults".to_string(),
            message: e.to_string(),
            fix: r#""static_defaults": {"address": "192.168.0.100", "netmask": "255.255.255.0", "gateway": "192.168.0.2"}"#
                .to_string(),
        });
    }

    // Warnings (non-fatal)

    if settings.interfaces_path.is_relative() {
        warnings.push(ValidationWarning {
            field: "interfaces_path".to_string(),
            message: "Relative path is resolved against the working directory".to_string(),
            fix: r#""interfaces_path": "/etc/network/interfaces""#.to_string(),
        });
    }

    if !settings.backup {
        warnings.push(ValidationWarning {
            field: "backup".to_string(),
            message: "No backup is kept before the interfaces file is overwritten".to_string(),
            fix: r#""backup": true"#.to_string(),
        });
    }

    Ok(warnings)
}

/// Where the fix for a settings issue has to be written
///
/// An existing settings file gets the entry added; otherwise a new file at
/// the default location holding just that entry.
fn fix_instructions(fix: &str, settings_file: Option<&Path>) -> (String, String) {
    match settings_file {
        Some(path) => (format!("In {}, set", path.display()), fix.to_string()),
        None => {
            let target = paths::get_config_path()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "a settings file".to_string());
            (format!("Create {target} containing"), format!("{{ {fix} }}"))
        }
    }
}

fn format_issue(
    headline: String,
    field: &str,
    message: &str,
    fix: &str,
    settings_file: Option<&Path>,
) -> String {
    let (location, entry) = fix_instructions(fix, settings_file);
    format!(
        "{headline}\n\n  {} {message}\n\n{}:\n  {}\n",
        style(format!("{field}:")).bold(),
        style(location).dim(),
        style(entry).cyan()
    )
}

/// Describe a validation error and the settings entry that fixes it
///
/// `settings_file` is the file the settings were read from, if any.
pub fn format_validation_error(error: &ValidationError, settings_file: Option<&Path>) -> String {
    format_issue(
        style("Error: invalid settings").red().bold().to_string(),
        &error.field,
        &error.message,
        &error.fix,
        settings_file,
    )
}

/// Describe a validation warning and the settings entry that silences it
pub fn format_validation_warning(
    warning: &ValidationWarning,
    settings_file: Option<&Path>,
) -> String {
    format_issue(
        style("Warning: settings").yellow().bold().to_string(),
        &warning.field,
        &warning.message,
        &warning.fix,
        settings_file,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_valid_settings_pass() {
        let result = validate_settings(&Settings::default());
        assert_eq!(result, Ok(Vec::new()));
    }

    #[test]
    fn test_empty_shell() {
        let settings = Settings {
            shell: "  ".to_string(),
            ..Settings::default()
        };
        let err = validate_settings(&settings).unwrap_err();
        assert_eq!(err.field, "shell");
    }

    #[test]
    fn test_up_command_without_placeholder() {
        let settings = Settings {
            up_command: "ifup eth0".to_string(),
            ..Settings::default()
        };
        let err = validate_settings(&settings).unwrap_err();
        assert_eq!(err.field, "up_command");
        assert!(err.message.contains("{iface}"));
    }

    #[test]
    fn test_down_command_without_placeholder() {
        let settings = Settings {
            down_command: "ifdown".to_string(),
            ..Settings::default()
        };
        let err = validate_settings(&settings).unwrap_err();
        assert_eq!(err.field, "down_command");
    }

    #[test]
    fn test_blank_static_default() {
        let settings = Settings {
            static_defaults: StaticParams::new("192.168.0.100", "", "192.168.0.2"),
            ..Settings::default()
        };
        let err = validate_settings(&settings).unwrap_err();
        assert_eq!(err.field, "static_defaults");
        assert!(err.message.contains("Netmask"));
    }

    #[test]
    fn test_relative_path_warning() {
        let settings = Settings {
            interfaces_path: PathBuf::from("interfaces"),
            ..Settings::default()
        };
        let warnings = validate_settings(&settings).unwrap();
        assert!(warnings.iter().any(|w| w.field == "interfaces_path"));
    }

    #[test]
    fn test_error_names_the_settings_file() {
        let settings = Settings {
            up_command: "ifup".to_string(),
            ..Settings::default()
        };
        let err = validate_settings(&settings).unwrap_err();
        let text = format_validation_error(&err, Some(Path::new("/srv/ifaces.json")));
        assert!(text.contains("/srv/ifaces.json"));
        assert!(text.contains("up_command:"));
        assert!(text.contains(r#""up_command": "ifup {iface}""#));
    }

    #[test]
    fn test_fix_without_settings_file_is_a_new_file() {
        let (location, entry) = fix_instructions(r#""backup": true"#, None);
        assert!(location.starts_with("Create "));
        assert_eq!(entry, r#"{ "backup": true }"#);

        let (location, entry) =
            fix_instructions(r#""backup": true"#, Some(Path::new("/etc/ifaces.json")));
        assert_eq!(location, "In /etc/ifaces.json, set");
        assert_eq!(entry, r#""backup": true"#);
    }

    #[test]
    fn test_warning_mentions_field_and_fix() {
        let settings = Settings {
            backup: false,
            ..Settings::default()
        };
        let warnings = validate_settings(&settings).unwrap();
        let text = format_validation_warning(&warnings[0], None);
        assert!(text.contains("backup:"));
        assert!(text.contains(r#""backup": true"#));
    }

    #[test]
    fn test_backup_disabled_warning() {
        let settings = Settings {
            backup: false,
            ..Settings::default()
        };
        let warnings = validate_settings(&settings).unwrap();
        assert!(warnings.iter().any(|w| w.field == "backup"));
    }
}
