//! External command invocation
//!
//! Every subprocess the scaffolder starts goes through [`CommandRunner::run`].
//! Whether a failure aborts the run is decided by the caller through the
//! `fatal` flag, not by the component issuing the command.

use crate::error::{IoResultExt, Result, ScaffoldError};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command as TokioCommand;

/// Where a command's standard output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Capture stdout and stderr for the caller
    Capture,
    /// Share the terminal with the child (interactive scripts)
    Inherit,
    /// Redirect stdout into a freshly truncated file; stderr is captured
    File(PathBuf),
}

/// A single command line to run
#[derive(Debug, Clone)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub output: OutputMode,
}

impl Invocation {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            output: OutputMode::Capture,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    /// Command line as shown to the user
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|s| s.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

/// Result of a command that was allowed to fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Succeeded {
        stdout: String,
    },
    Failed {
        /// `None` when the process could not be started or was killed by a signal
        code: Option<i32>,
        stderr: String,
    },
}

impl CommandOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CommandOutcome::Succeeded { .. })
    }
}

/// Runs commands from the project root
#[derive(Debug, Clone)]
pub struct CommandRunner {
    working_dir: PathBuf,
}

impl CommandRunner {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    /// Run `invocation` to completion
    ///
    /// With `fatal` set, a launch failure or a non-zero exit is returned as
    /// an error. Otherwise both are reported through
    /// [`CommandOutcome::Failed`] and the caller carries on.
    pub async fn run(&self, invocation: &Invocation, fatal: bool) -> Result<CommandOutcome> {
        let program = invocation.program_name();
        let mut command = TokioCommand::new(&invocation.program);
        command.args(&invocation.args).current_dir(&self.working_dir);

        match &invocation.output {
            OutputMode::Capture => {
                command.stdout(Stdio::piped()).stderr(Stdio::piped());
            }
            OutputMode::Inherit => {
                command
                    .stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit());
            }
            OutputMode::File(path) => {
                let file = std::fs::File::create(path).with_path("create", path)?;
                command.stdout(Stdio::from(file)).stderr(Stdio::piped());
            }
        }

        // `output()` would force piped stdio, so spawn with the streams set above
        let child = match command.spawn() {
            Ok(child) => child,
            Err(source) if fatal => return Err(ScaffoldError::Spawn { program, source }),
            Err(source) => {
                return Ok(CommandOutcome::Failed {
                    code: None,
                    stderr: format!("Failed to launch `{}`: {}", program, source),
                })
            }
        };
        let output = child
            .wait_with_output()
            .await
            .map_err(|source| ScaffoldError::io(format!("wait for `{}`", program), source))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if output.status.success() {
            Ok(CommandOutcome::Succeeded { stdout })
        } else if fatal {
            Err(ScaffoldError::CommandFailed {
                program,
                code: output.status.code(),
                stderr,
            })
        } else {
            Ok(CommandOutcome::Failed {
                code: output.status.code(),
                stderr,
            })
        }
    }
}
