//! Python tooling: virtual environment, lint config and helper scripts

use super::command::{CommandOutcome, CommandRunner, Invocation, OutputMode};
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Creates the project's virtual environment
pub struct EnvironmentProvisioner {
    python: String,
    venv: PathBuf,
}

impl EnvironmentProvisioner {
    pub fn new(python: impl Into<String>, venv: impl Into<PathBuf>) -> Self {
        Self {
            python: python.into(),
            venv: venv.into(),
        }
    }

    pub fn invocation(&self) -> Invocation {
        Invocation::new(&self.python)
            .args(["-m", "venv"])
            .arg(self.venv.as_os_str())
    }

    /// Run `python -m venv`; an existing environment is left to the tool
    pub async fn provision(&self, runner: &CommandRunner, fatal: bool) -> Result<CommandOutcome> {
        runner.run(&self.invocation(), fatal).await
    }
}

/// Writes the linter's default configuration
pub struct LintConfigWriter {
    linter: String,
    target: PathBuf,
}

impl LintConfigWriter {
    pub fn new(linter: impl Into<String>, target: impl Into<PathBuf>) -> Self {
        Self {
            linter: linter.into(),
            target: target.into(),
        }
    }

    pub fn invocation(&self) -> Invocation {
        Invocation::new(&self.linter)
            .arg("--generate-rcfile")
            .output(OutputMode::File(self.target.clone()))
    }

    pub async fn write(&self, runner: &CommandRunner, fatal: bool) -> Result<CommandOutcome> {
        runner.run(&self.invocation(), fatal).await
    }
}

/// Runs a script through bash and captures its output
pub struct ScriptRunner {
    interpreter: String,
}

impl Default for ScriptRunner {
    fn default() -> Self {
        Self::new("bash")
    }
}

impl ScriptRunner {
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    pub fn invocation(&self, script: &Path) -> Invocation {
        Invocation::new(&self.interpreter).arg(script.as_os_str())
    }

    pub async fn execute(
        &self,
        runner: &CommandRunner,
        script: &Path,
        fatal: bool,
    ) -> Result<CommandOutcome> {
        runner.run(&self.invocation(script), fatal).await
    }
}
