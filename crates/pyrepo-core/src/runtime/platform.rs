//! Host platform detection and git setup dispatch

use super::command::{CommandOutcome, CommandRunner, Invocation, OutputMode};
use crate::error::Result;
use crate::options::ProjectLayout;
use std::fmt;
use std::path::{Path, PathBuf};

/// Host operating system family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Posix,
    Windows,
    Unsupported,
}

impl Platform {
    /// Platform this binary was built for
    pub fn detect() -> Self {
        if cfg!(unix) {
            Platform::Posix
        } else if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unsupported
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Posix => "POSIX",
            Platform::Windows => "Windows",
            Platform::Unsupported => "unsupported OS",
        }
    }

    /// Command that activates a virtual environment at `venv`
    pub fn activate_command(&self, venv: &Path) -> String {
        match self {
            Platform::Windows => format!("{}", venv.join("Scripts").join("activate").display()),
            _ => format!("source {}", venv.join("bin").join("activate").display()),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// How the git setup script is launched, fixed once per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitSetup {
    /// Execute a shell script directly
    Shell { script: PathBuf },
    /// Run a PowerShell script with an unrestricted execution policy
    PowerShell { script: PathBuf },
    /// No script for this host
    Unsupported,
}

/// What happened when git setup was attempted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitSetupOutcome {
    Completed,
    Failed { message: String },
    Skipped,
}

impl GitSetup {
    pub fn for_platform(platform: Platform, layout: &ProjectLayout) -> Self {
        match platform {
            Platform::Posix => GitSetup::Shell {
                script: layout.git_setup_shell.clone(),
            },
            Platform::Windows => GitSetup::PowerShell {
                script: layout.git_setup_powershell.clone(),
            },
            Platform::Unsupported => GitSetup::Unsupported,
        }
    }

    pub fn invocation(&self) -> Option<Invocation> {
        match self {
            GitSetup::Shell { script } => {
                Some(Invocation::new(script.as_os_str()).output(OutputMode::Inherit))
            }
            GitSetup::PowerShell { script } => Some(
                Invocation::new("powershell")
                    .args(["-ExecutionPolicy", "Unrestricted"])
                    .arg(script.as_os_str())
                    .output(OutputMode::Inherit),
            ),
            GitSetup::Unsupported => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GitSetup::Shell { .. } => "shell",
            GitSetup::PowerShell { .. } => "PowerShell",
            GitSetup::Unsupported => "none",
        }
    }

    /// Run the setup script; failures never abort the scaffold
    pub async fn run(&self, runner: &CommandRunner) -> Result<GitSetupOutcome> {
        let Some(invocation) = self.invocation() else {
            return Ok(GitSetupOutcome::Skipped);
        };

        match runner.run(&invocation, false).await? {
            CommandOutcome::Succeeded { .. } => Ok(GitSetupOutcome::Completed),
            CommandOutcome::Failed { code, stderr } => {
                let mut message = format!(
                    "Error occurred while setting up git using {} script",
                    self.label()
                );
                if let Some(code) = code {
                    message.push_str(&format!(" (exit code {})", code));
                }
                if !stderr.trim().is_empty() {
                    message.push_str(&format!(": {}", stderr.trim()));
                }
                Ok(GitSetupOutcome::Failed { message })
            }
        }
    }
}
