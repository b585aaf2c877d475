//! `.gitignore` generation from cached GitHub templates

use super::fetcher::{Fetched, TextFetcher};
use crate::error::{IoResultExt, Result};
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use url::Url;

/// Result of fetching one template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateStatus {
    Cached(PathBuf),
    Unavailable { status: u16 },
}

/// What [`IgnoreFileGenerator::generate`] wrote
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreReport {
    /// Templates appended, in output order
    pub written: Vec<String>,
    /// Templates that could not be fetched, with the HTTP status
    pub skipped: Vec<(String, u16)>,
}

/// Builds the ignore file from named templates
///
/// A template cached on disk is reused forever; delete the cache file to
/// force a refetch.
pub struct IgnoreFileGenerator {
    fetcher: TextFetcher,
    base_url: Url,
    cache_dir: PathBuf,
    output: PathBuf,
}

impl IgnoreFileGenerator {
    pub fn new(
        fetcher: TextFetcher,
        base_url: Url,
        cache_dir: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fetcher,
            base_url,
            cache_dir: cache_dir.into(),
            output: output.into(),
        }
    }

    /// Local cache file for `name` (`Global/macOS` nests under `Global/`)
    pub fn cache_path(&self, name: &str) -> PathBuf {
        let mut path = self.cache_dir.clone();
        for segment in name.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.set_file_name(format!(
            "{}.gitignore",
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        ));
        path
    }

    /// Download `name` into the cache, leaving no file on a non-200 status
    pub async fn fetch_template(&self, name: &str) -> Result<TemplateStatus> {
        match self
            .fetcher
            .fetch(&self.base_url, &format!("{}.gitignore", name))
            .await?
        {
            Fetched::Body(text) => {
                let path = self.cache_path(name);
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)
                        .await
                        .with_path("create directory", parent)?;
                }
                fs::write(&path, text).await.with_path("write", &path)?;
                Ok(TemplateStatus::Cached(path))
            }
            Fetched::Status(status) => Ok(TemplateStatus::Unavailable { status }),
        }
    }

    /// Truncate the output, then append each template followed by a blank line
    ///
    /// Order and duplicates in `names` are kept as given.
    pub async fn generate(&self, names: &[String]) -> Result<IgnoreReport> {
        let mut file = fs::File::create(&self.output)
            .await
            .with_path("create", &self.output)?;
        let mut report = IgnoreReport::default();

        for name in names {
            let path = self.cache_path(name);
            if !path.exists() {
                if let TemplateStatus::Unavailable { status } = self.fetch_template(name).await? {
                    report.skipped.push((name.clone(), status));
                    continue;
                }
            }

            let contents = fs::read_to_string(&path).await.with_path("read", &path)?;
            file.write_all(contents.as_bytes())
                .await
                .with_path("write", &self.output)?;
            file.write_all(b"\n")
                .await
                .with_path("write", &self.output)?;
            report.written.push(name.clone());
        }

        file.flush().await.with_path("write", &self.output)?;
        Ok(report)
    }
}
