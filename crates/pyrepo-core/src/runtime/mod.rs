//! External processes and host detection
//!
//! This module provides:
//! - A command runner with a per-call fatal/non-fatal policy
//! - Python tooling steps (virtual environment, lint config, scripts)
//! - Platform detection and git setup dispatch

pub mod command;
pub mod platform;
pub mod python;

pub use command::{CommandOutcome, CommandRunner, Invocation, OutputMode};
pub use platform::{GitSetup, GitSetupOutcome, Platform};
pub use python::{EnvironmentProvisioner, LintConfigWriter, ScriptRunner};
