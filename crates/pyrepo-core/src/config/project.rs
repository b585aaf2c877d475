//! Typed view of the project configuration file
//!
//! The INI document is read once and validated into [`ProjectConfig`].
//! Downstream components only ever see these typed values.

use crate::error::{Result, ScaffoldError};
use ini::{Ini, ParseOption, Properties};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const METADATA_SECTION: &str = "Metadata";
pub const DEPENDENCIES_SECTION: &str = "Dependencies";
pub const SETTINGS_SECTION: &str = "Settings";

pub const DEFAULT_NAME: &str = "Python Repository and Deployment Automator";
pub const DEFAULT_VERSION: &str = "v1.0.0";
pub const DEFAULT_AUTHOR: &str = "Your Name <you@example.com>";
pub const DEFAULT_GITIGNORE_TEMPLATE: &str = "Python";
pub const DEFAULT_PYTHON: &str = "python";
pub const DEFAULT_LINTER: &str = "pylint";

/// Project identity from `[Metadata]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub name: String,
    pub version: String,
    /// No default; left out of generated metadata when absent
    pub description: Option<String>,
    pub authors: Vec<String>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            version: DEFAULT_VERSION.to_string(),
            description: None,
            authors: vec![DEFAULT_AUTHOR.to_string()],
        }
    }
}

/// One `name = version-specifier` line from `[Dependencies]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub version: String,
}

impl Dependency {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Run settings from `[Settings]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// License key such as `MIT`; the license step is skipped without one
    pub license: Option<String>,
    /// `.gitignore` templates, concatenated in this order
    pub gitignore_templates: Vec<String>,
    /// Scripts run after git setup, relative to the project root
    pub scripts: Vec<PathBuf>,
    /// Interpreter used to create the virtual environment
    pub python: String,
    /// Linter asked for its default configuration
    pub linter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            license: None,
            gitignore_templates: vec![DEFAULT_GITIGNORE_TEMPLATE.to_string()],
            scripts: Vec::new(),
            python: DEFAULT_PYTHON.to_string(),
            linter: DEFAULT_LINTER.to_string(),
        }
    }
}

/// Fully validated project configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    pub metadata: Metadata,
    /// `None` when the `[Dependencies]` section is absent
    pub dependencies: Option<Vec<Dependency>>,
    pub settings: Settings,
}

impl ProjectConfig {
    /// Load and validate the configuration file at `path`
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ScaffoldError::ConfigNotFound(path.to_path_buf()));
        }
        let ini = Ini::load_from_file_opt(path, parse_options()).map_err(|source| {
            ScaffoldError::ConfigParse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_ini(&ini)
    }

    /// Parse a configuration document held in memory
    pub fn parse(text: &str) -> Result<Self> {
        let ini = Ini::load_from_str_opt(text, parse_options()).map_err(|e| {
            ScaffoldError::ConfigParse {
                path: PathBuf::from("<memory>"),
                source: ini::Error::Parse(e),
            }
        })?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self> {
        let mut sections = HashSet::new();
        for (section, properties) in ini.iter() {
            if let Some(section) = section {
                if !sections.insert(section) {
                    return Err(ScaffoldError::DuplicateSection(section.to_string()));
                }
                check_unique_keys(section, properties)?;
            }
        }

        let mut metadata = Metadata::default();
        if let Some(section) = ini.section(Some(METADATA_SECTION)) {
            if let Some(name) = lookup(section, "name") {
                metadata.name = name.to_string();
            }
            if let Some(version) = lookup(section, "version") {
                metadata.version = version.to_string();
            }
            metadata.description = lookup(section, "description").map(str::to_string);
            if let Some(authors) = lookup(section, "authors") {
                metadata.authors = vec![authors.to_string()];
            }
        }

        let dependencies = ini.section(Some(DEPENDENCIES_SECTION)).map(|section| {
            section
                .iter()
                .map(|(name, version)| Dependency::new(name, version))
                .collect()
        });

        let mut settings = Settings::default();
        if let Some(section) = ini.section(Some(SETTINGS_SECTION)) {
            settings.license = lookup(section, "license")
                .filter(|l| !l.is_empty())
                .map(str::to_string);
            if let Some(templates) = lookup(section, "gitignore") {
                settings.gitignore_templates = split_list(templates);
            }
            if let Some(scripts) = lookup(section, "scripts") {
                settings.scripts = split_list(scripts).into_iter().map(PathBuf::from).collect();
            }
            if let Some(python) = lookup(section, "python").filter(|p| !p.is_empty()) {
                settings.python = python.to_string();
            }
            if let Some(linter) = lookup(section, "linter").filter(|l| !l.is_empty()) {
                settings.linter = linter.to_string();
            }
        }

        Ok(Self {
            metadata,
            dependencies,
            settings,
        })
    }

    /// Dependencies, required by steps that cannot run without the section
    pub fn require_dependencies(&self) -> Result<&[Dependency]> {
        self.dependencies
            .as_deref()
            .ok_or(ScaffoldError::MissingSection(DEPENDENCIES_SECTION))
    }
}

/// Values are taken verbatim: no quote stripping, no backslash escapes
fn parse_options() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    }
}

fn check_unique_keys(section: &str, properties: &Properties) -> Result<()> {
    let mut seen = HashSet::new();
    for (key, _) in properties.iter() {
        if !seen.insert(key.to_ascii_lowercase()) {
            return Err(ScaffoldError::DuplicateKey {
                section: section.to_string(),
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

/// Case-insensitive key lookup
fn lookup<'a>(properties: &'a Properties, key: &str) -> Option<&'a str> {
    properties
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v)
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const FULL: &str = "\
[Metadata]
name = sample
version = 0.3.0
description = A sample project
authors = Jane Doe <jane@example.com>

[Dependencies]
requests = 2.31.0
numpy = 1.26.4
Flask = >=3.0

[Settings]
License = MIT
Gitignore = Python, Global/macOS
Scripts = scripts/post.sh
";

    #[test]
    fn test_parse_full_config() {
        let config = ProjectConfig::parse(FULL).unwrap();
        assert_eq!(config.metadata.name, "sample");
        assert_eq!(config.metadata.version, "0.3.0");
        assert_eq!(
            config.metadata.description.as_deref(),
            Some("A sample project")
        );
        assert_eq!(config.metadata.authors, vec!["Jane Doe <jane@example.com>"]);
        assert_eq!(config.settings.license.as_deref(), Some("MIT"));
        assert_eq!(
            config.settings.gitignore_templates,
            vec!["Python", "Global/macOS"]
        );
        assert_eq!(config.settings.scripts, vec![PathBuf::from("scripts/post.sh")]);
        assert_eq!(config.settings.python, DEFAULT_PYTHON);
    }

    #[test]
    fn test_dependencies_keep_document_order() {
        let config = ProjectConfig::parse(FULL).unwrap();
        let deps = config.require_dependencies().unwrap();
        assert_eq!(
            deps,
            &[
                Dependency::new("requests", "2.31.0"),
                Dependency::new("numpy", "1.26.4"),
                Dependency::new("Flask", ">=3.0"),
            ]
        );
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let config = ProjectConfig::parse("[Dependencies]\nrequests = 2.0\n").unwrap();
        assert_eq!(config.metadata, Metadata::default());
        assert_eq!(config.settings, Settings::default());
        assert_eq!(config.settings.gitignore_templates, vec!["Python"]);
    }

    #[test]
    fn test_missing_dependencies_section_is_an_error_only_when_required() {
        let config = ProjectConfig::parse("[Metadata]\nname = demo\n").unwrap();
        assert!(config.dependencies.is_none());
        let err = config.require_dependencies().unwrap_err();
        assert!(matches!(err, ScaffoldError::MissingSection("Dependencies")));
    }

    #[test]
    fn test_empty_dependencies_section_is_not_missing() {
        let config = ProjectConfig::parse("[Dependencies]\n").unwrap();
        assert_eq!(config.require_dependencies().unwrap().len(), 0);
    }

    #[test]
    fn test_metadata_keys_are_case_insensitive() {
        let config = ProjectConfig::parse("[Metadata]\nName = demo\nVERSION = 2.0\n").unwrap();
        assert_eq!(config.metadata.name, "demo");
        assert_eq!(config.metadata.version, "2.0");
        assert_eq!(config.metadata.description, None);
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let err = ProjectConfig::parse("[Dependencies]\nrequests = 1\nrequests = 2\n").unwrap_err();
        match err {
            ScaffoldError::DuplicateKey { section, key } => {
                assert_eq!(section, "Dependencies");
                assert_eq!(key, "requests");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_repeated_section_rejected() {
        let err =
            ProjectConfig::parse("[Dependencies]\na = 1\n[Dependencies]\nb = 2\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(matches!(err, ScaffoldError::DuplicateSection(s) if s == "Dependencies"));
    }

    #[test]
    fn test_values_are_verbatim() {
        let config =
            ProjectConfig::parse("[Dependencies]\npkg = \"1.0\"\n[Settings]\nScripts = a\\b.sh\n")
                .unwrap();
        assert_eq!(config.require_dependencies().unwrap()[0].version, "\"1.0\"");
        assert_eq!(config.settings.scripts, vec![PathBuf::from("a\\b.sh")]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("conf.ini");
        let err = ProjectConfig::load(&path).unwrap_err();
        assert!(matches!(err, ScaffoldError::ConfigNotFound(p) if p == path));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf.ini");
        std::fs::write(&path, FULL).unwrap();
        let config = ProjectConfig::load(&path).unwrap();
        assert_eq!(config, ProjectConfig::parse(FULL).unwrap());
    }
}
