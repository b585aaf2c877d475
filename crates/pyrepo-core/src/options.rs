//! Run-time options handed to every component at construction
//!
//! Nothing here is global: the binary builds one [`ScaffoldOptions`] for the
//! working directory and each component receives the pieces it needs.

use crate::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Base URL for `.gitignore` templates
pub const DEFAULT_GITIGNORE_URL: &str = "https://raw.githubusercontent.com/github/gitignore/main";

/// Base URL for license texts
pub const DEFAULT_LICENSE_URL: &str =
    "https://raw.githubusercontent.com/github/choosealicense.com/gh-pages/_licenses";

/// Environment variable overriding [`DEFAULT_GITIGNORE_URL`]
pub const GITIGNORE_URL_ENV: &str = "PYREPO_GITIGNORE_URL";

/// Environment variable overriding [`DEFAULT_LICENSE_URL`]
pub const LICENSE_URL_ENV: &str = "PYREPO_LICENSE_URL";

/// Timeout applied to every outbound HTTP request
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Where every input and generated artifact lives
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub config: PathBuf,
    pub requirements: PathBuf,
    pub venv: PathBuf,
    pub lint_config: PathBuf,
    pub gitignore: PathBuf,
    pub template_cache: PathBuf,
    pub pyproject: PathBuf,
    pub license: PathBuf,
    pub readme: PathBuf,
    pub git_setup_shell: PathBuf,
    pub git_setup_powershell: PathBuf,
}

impl ProjectLayout {
    /// Conventional layout rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config: root.join("config").join("conf.ini"),
            requirements: root.join("requirements.txt"),
            venv: root.join(".venv"),
            lint_config: root.join(".pylintrc"),
            gitignore: root.join(".gitignore"),
            template_cache: root.join("gitignore_templates"),
            pyproject: root.join("pyproject.toml"),
            license: root.join("LICENSE"),
            readme: root.join("README.md"),
            git_setup_shell: root.join("scripts").join("setup_git.sh"),
            git_setup_powershell: root.join("scripts").join("setup_git.ps1"),
            root,
        }
    }

    /// Resolve a path from the config file against the project root
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Path relative to the root, for display
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}

/// Options for one scaffolding run
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    pub layout: ProjectLayout,
    pub gitignore_url: Url,
    pub license_url: Url,
    pub http_timeout: Duration,
    pub user_agent: String,
}

impl ScaffoldOptions {
    /// Options with the built-in remote locations
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            layout: ProjectLayout::new(root),
            gitignore_url: parse_url(DEFAULT_GITIGNORE_URL)?,
            license_url: parse_url(DEFAULT_LICENSE_URL)?,
            http_timeout: HTTP_TIMEOUT,
            user_agent: format!("pyrepo/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    /// Options with remote locations overridable from the environment
    pub fn from_env(root: impl Into<PathBuf>) -> Result<Self> {
        let mut options = Self::new(root)?;
        if let Ok(url) = std::env::var(GITIGNORE_URL_ENV) {
            options.gitignore_url = parse_url(&url)?;
        }
        if let Ok(url) = std::env::var(LICENSE_URL_ENV) {
            options.license_url = parse_url(&url)?;
        }
        Ok(options)
    }
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| ScaffoldError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}
