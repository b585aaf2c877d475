//! Error type shared by every scaffolding component

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Broad category of a [`ScaffoldError`]
///
/// The orchestrator uses the kind to decide whether a failure inside a
/// best-effort step is downgraded to a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Io,
    Command,
    Network,
    Serialize,
}

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Configuration file does not exist
    #[error("Config file not found at {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Configuration file exists but could not be read or parsed
    #[error("Failed to parse config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    /// A section required by the current step is absent
    #[error("Config is missing required section [{0}]")]
    MissingSection(&'static str),

    /// The same key appears twice in one section
    #[error("Duplicate key '{key}' in section [{section}]")]
    DuplicateKey { section: String, key: String },

    /// A section header appears more than once
    #[error("Duplicate section [{0}]")]
    DuplicateSection(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// Subprocess could not be started at all
    #[error("Failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Subprocess ran and exited unsuccessfully
    #[error("`{program}` exited with {}{}", exit_label(.code), stderr_suffix(.stderr))]
    CommandFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Transport-level HTTP failure (DNS, connect, timeout)
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be configured
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("Failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: toml::ser::Error,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

impl ScaffoldError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScaffoldError::ConfigNotFound(_)
            | ScaffoldError::ConfigParse { .. }
            | ScaffoldError::MissingSection(_)
            | ScaffoldError::DuplicateKey { .. }
            | ScaffoldError::DuplicateSection(_) => ErrorKind::Config,
            ScaffoldError::Io { .. } => ErrorKind::Io,
            ScaffoldError::Spawn { .. } | ScaffoldError::CommandFailed { .. } => {
                ErrorKind::Command
            }
            ScaffoldError::InvalidUrl { .. }
            | ScaffoldError::Request { .. }
            | ScaffoldError::HttpClient(_) => ErrorKind::Network,
            ScaffoldError::Serialize { .. } => ErrorKind::Serialize,
        }
    }

    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        ScaffoldError::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;

/// Attach a path-based context to I/O results
pub(crate) trait IoResultExt<T> {
    fn with_path(self, action: &str, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path(self, action: &str, path: &Path) -> Result<T> {
        self.map_err(|source| {
            ScaffoldError::io(format!("Failed to {} {}", action, path.display()), source)
        })
    }
}
