//! requirements.txt from the `[Dependencies]` section

use crate::config::Dependency;
use crate::error::{IoResultExt, Result};
use std::path::Path;
use tokio::fs;

/// One `name==version` line per dependency, in config order
///
/// Specifiers are written verbatim, without de-duplication.
pub fn render_requirements(dependencies: &[Dependency]) -> String {
    dependencies
        .iter()
        .map(|dep| format!("{}=={}\n", dep.name, dep.version))
        .collect()
}

/// Overwrite `path` with the rendered requirements; returns the line count
pub async fn write_requirements(path: &Path, dependencies: &[Dependency]) -> Result<usize> {
    fs::write(path, render_requirements(dependencies))
        .await
        .with_path("write", path)?;
    Ok(dependencies.len())
}
