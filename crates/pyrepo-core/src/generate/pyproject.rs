//! pyproject.toml build metadata

use crate::config::ProjectConfig;
use crate::error::{IoResultExt, Result, ScaffoldError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// Root of the generated `pyproject.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PyProject {
    pub tool: Tool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub poetry: Poetry,
}

/// `[tool.poetry]` identity block and its dependency table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poetry {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub authors: Vec<String>,
    /// Keeps the order of the `[Dependencies]` section
    #[serde(default)]
    pub dependencies: toml::Table,
}

impl PyProject {
    /// Build a fresh document; an absent `[Dependencies]` section yields an empty table
    pub fn from_config(config: &ProjectConfig) -> Self {
        let metadata = &config.metadata;
        let dependencies = config
            .dependencies
            .iter()
            .flatten()
            .map(|dep| (dep.name.clone(), toml::Value::String(dep.version.clone())))
            .collect();

        Self {
            tool: Tool {
                poetry: Poetry {
                    name: metadata.name.clone(),
                    version: metadata.version.clone(),
                    description: metadata.description.clone(),
                    authors: metadata.authors.clone(),
                    dependencies,
                },
            },
        }
    }

    pub fn render(&self) -> Result<String> {
        toml::to_string(self).map_err(|source| ScaffoldError::Serialize {
            what: "pyproject.toml",
            source,
        })
    }
}

/// Overwrite `path` with metadata built from `config`; nothing from a previous file survives
pub async fn write_pyproject(path: &Path, config: &ProjectConfig) -> Result<PyProject> {
    let document = PyProject::from_config(config);
    fs::write(path, document.render()?)
        .await
        .with_path("write", path)?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::project::{DEFAULT_AUTHOR, DEFAULT_NAME, DEFAULT_VERSION};

    const CONFIG: &str = "\
[Metadata]
name = sample
version = 0.3.0
description = A sample project
authors = Jane Doe <jane@example.com>

[Dependencies]
requests = 2.31.0
numpy = 1.26.4
zope.interface = 6.1
";

    #[tokio::test]
    async fn test_round_trip_matches_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pyproject.toml");
        let config = ProjectConfig::parse(CONFIG).unwrap();

        write_pyproject(&path, &config).await.unwrap();
        let parsed: PyProject = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        let poetry = &parsed.tool.poetry;
        assert_eq!(poetry.name, "sample");
        assert_eq!(poetry.version, "0.3.0");
        assert_eq!(poetry.description.as_deref(), Some("A sample project"));
        assert_eq!(poetry.authors, vec!["Jane Doe <jane@example.com>"]);
        let deps: Vec<(&str, &str)> = poetry
            .dependencies
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str().unwrap()))
            .collect();
        assert_eq!(
            deps,
            vec![
                ("requests", "2.31.0"),
                ("numpy", "1.26.4"),
                ("zope.interface", "6.1")
            ]
        );
    }

    #[tokio::test]
    async fn test_defaults_applied_for_missing_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pyproject.toml");
        let config = ProjectConfig::parse("[Dependencies]\nrequests = 2.31.0\n").unwrap();

        write_pyproject(&path, &config).await.unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: PyProject = toml::from_str(&text).unwrap();

        assert_eq!(parsed.tool.poetry.name, DEFAULT_NAME);
        assert_eq!(parsed.tool.poetry.version, DEFAULT_VERSION);
        assert_eq!(parsed.tool.poetry.authors, vec![DEFAULT_AUTHOR]);
        assert_eq!(parsed.tool.poetry.description, None);
        assert!(!text.contains("description"));
    }

    #[tokio::test]
    async fn test_second_write_replaces_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pyproject.toml");

        let first = ProjectConfig::parse(
            "[Metadata]\nname = first\ndescription = old\n[Dependencies]\nflask = 3.0\n",
        )
        .unwrap();
        let second =
            ProjectConfig::parse("[Metadata]\nname = second\n[Dependencies]\ndjango = 5.0\n")
                .unwrap();

        write_pyproject(&path, &first).await.unwrap();
        write_pyproject(&path, &second).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: PyProject = toml::from_str(&text).unwrap();
        assert_eq!(parsed, PyProject::from_config(&second));
        assert!(!text.contains("first"));
        assert!(!text.contains("flask"));
        assert!(!text.contains("old"));
    }

    #[test]
    fn test_rendered_layout() {
        let config =
            ProjectConfig::parse("[Metadata]\nname = demo\n[Dependencies]\nrequests = 2.0\n")
                .unwrap();
        let text = PyProject::from_config(&config).render().unwrap();
        assert!(text.contains("[tool.poetry]"));
        assert!(text.contains("name = \"demo\""));
        assert!(text.contains("[tool.poetry.dependencies]"));
        assert!(text.contains("requests = \"2.0\""));
        assert!(text.find("[tool.poetry]") < text.find("[tool.poetry.dependencies]"));
    }
}
