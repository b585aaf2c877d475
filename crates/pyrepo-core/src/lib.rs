//! pyrepo core - scaffolding for Python repositories
//!
//! One INI file (`config/conf.ini`) drives a fixed sequence of steps that
//! write `requirements.txt`, create a virtual environment, generate a lint
//! configuration, run git setup, build `.gitignore`, run helper scripts,
//! write `pyproject.toml`, fetch a `LICENSE` and render `README.md`.
//!
//! # Architecture
//!
//! - **Components** - one narrowly scoped helper per artifact
//!   ([`templates`], [`generate`], [`runtime`]), each built from explicit
//!   [`ScaffoldOptions`] and [`ProjectConfig`] values
//! - **Orchestration** - [`Scaffolder`] runs the steps in order and reports
//!   through the [`Reporter`] trait
//! - **CLI/TUI Interface** - optional cliclack output (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based front-end
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use pyrepo_core::{scaffold_and_report, ConsoleReporter, ScaffoldOptions};
//!
//! let options = ScaffoldOptions::from_env(std::env::current_dir()?)?;
//! let completed = scaffold_and_report(&options, &mut ConsoleReporter).await;
//! ```

pub mod config;
pub mod error;
pub mod generate;
pub mod options;
pub mod report;
pub mod runtime;
pub mod scaffold;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{Dependency, Metadata, ProjectConfig, Settings};
pub use error::{ErrorKind, Result, ScaffoldError};
pub use options::{ProjectLayout, ScaffoldOptions};
pub use report::{ConsoleReporter, RecordingReporter, Reporter};
pub use runtime::{GitSetup, Platform};
pub use scaffold::{scaffold, scaffold_and_report, Scaffolder, Step, Summary};

#[cfg(feature = "tui")]
pub use tui::run;
