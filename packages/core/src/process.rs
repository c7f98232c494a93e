//! Shell command execution
//!
//! Runs a command through the system shell, drains the selected output
//! stream line by line until EOF, then reaps the child for its exit code.

use crate::error::ProcessError;
use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use tracing::debug;

/// Default shell used to interpret command strings
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Which output stream a run captures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
    /// stderr merged into stdout by the shell
    Combined,
}

/// Outcome of a finished command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Exit code, or -1 when the child was killed by a signal
    pub exit_code: i32,
    pub output: String,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Something that can run shell command strings
pub trait CommandRunner {
    fn run(&self, command: &str, stream: OutputStream) -> Result<CommandResult, ProcessError>;
}

/// Runs commands via `<shell> -c`
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, stream: OutputStream) -> Result<CommandResult, ProcessError> {
        debug!("Running: {}", command);

        let script = match stream {
            OutputStream::Combined => format!("{{ {command}\n}} 2>&1"),
            _ => command.to_string(),
        };

        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c").arg(&script).stdin(Stdio::null());
        match stream {
            OutputStream::Stdout | OutputStream::Combined => {
                cmd.stdout(Stdio::piped()).stderr(Stdio::null());
            }
            OutputStream::Stderr => {
                cmd.stdout(Stdio::null()).stderr(Stdio::piped());
            }
        }

        let mut child = cmd.spawn().map_err(|source| ProcessError::Spawn {
            command: command.to_string(),
            source,
        })?;

        let pipe: Option<Box<dyn Read>> = match stream {
            OutputStream::Stderr => child.stderr.take().map(|p| Box::new(p) as Box<dyn Read>),
            _ => child.stdout.take().map(|p| Box::new(p) as Box<dyn Read>),
        };

        let mut output = String::new();
        if let Some(pipe) = pipe {
            let read = read_lines(pipe, &mut output);
            if let Err(source) = read {
                // Don't leave a zombie behind
                let _ = child.kill();
                let _ = child.wait();
                return Err(ProcessError::Read {
                    command: command.to_string(),
                    source,
                });
            }
        }

        let status = child.wait().map_err(|source| ProcessError::Wait {
            command: command.to_string(),
            source,
        })?;
        let exit_code = status.code().unwrap_or(-1);
        debug!("'{}' exited with {}", command, exit_code);

        Ok(CommandResult { exit_code, output })
    }
}

/// Append every line of `pipe` to `output`, each terminated by `\n`
fn read_lines(pipe: impl Read, output: &mut String) -> std::io::Result<()> {
    let mut reader = BufReader::new(pipe);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let n = reader.read_until(b'\n', &mut buf)?;
        if n == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        output.push_str(line.trim_end_matches(['\n', '\r']));
        output.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_stdout_lines() {
        let result = ShellRunner::default()
            .run("printf 'a\\nb\\n'; echo ignored >&2", OutputStream::Stdout)
            .unwrap();
        assert!(result.success());
        assert_eq!(result.output, "a\nb\n");
    }

    #[test]
    fn test_captures_stderr_only() {
        let result = ShellRunner::default()
            .run("echo out; echo err >&2", OutputStream::Stderr)
            .unwrap();
        assert_eq!(result.output, "err\n");
    }

    #[test]
    fn test_combined_keeps_both_streams() {
        let result = ShellRunner::default()
            .run("echo out; echo err >&2", OutputStream::Combined)
            .unwrap();
        assert!(result.output.contains("out\n"));
        assert!(result.output.contains("err\n"));
    }

    #[test]
    fn test_nonzero_exit_is_not_an_error() {
        let result = ShellRunner::default()
            .run("echo failing; exit 3", OutputStream::Combined)
            .unwrap();
        assert_eq!(result.exit_code, 3);
        assert!(!result.success());
        assert_eq!(result.output, "failing\n");
    }

    #[test]
    fn test_last_line_without_newline_is_kept() {
        let result = ShellRunner::default()
            .run("printf 'tail'", OutputStream::Stdout)
            .unwrap();
        assert_eq!(result.output, "tail\n");
    }

    #[test]
    fn test_missing_shell_is_spawn_error() {
        let err = ShellRunner::new("/nonexistent/shell")
            .run("true", OutputStream::Stdout)
            .unwrap_err();
        assert!(matches!(err, ProcessError::Spawn { .. }));
    }
}
