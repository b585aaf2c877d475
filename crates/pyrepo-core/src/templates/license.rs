//! LICENSE download from choosealicense.com

use super::fetcher::{Fetched, TextFetcher};
use crate::error::{IoResultExt, Result};
use std::path::PathBuf;
use tokio::fs;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseStatus {
    Written(PathBuf),
    /// Existing file, if any, is left untouched
    Unavailable { status: u16 },
}

pub struct LicenseFetcher {
    fetcher: TextFetcher,
    base_url: Url,
    output: PathBuf,
}

impl LicenseFetcher {
    pub fn new(fetcher: TextFetcher, base_url: Url, output: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            base_url,
            output: output.into(),
        }
    }

    /// Remote file name for a license key, e.g. `MIT` -> `mit.txt`
    pub fn file_name(license: &str) -> String {
        format!("{}.txt", license.trim().to_lowercase())
    }

    /// Fetch the license text and write it verbatim
    ///
    /// The output is only opened once a 200 response is in hand.
    pub async fn create_license(&self, license: &str) -> Result<LicenseStatus> {
        match self
            .fetcher
            .fetch(&self.base_url, &Self::file_name(license))
            .await?
        {
            Fetched::Body(text) => {
                fs::write(&self.output, text)
                    .await
                    .with_path("write", &self.output)?;
                Ok(LicenseStatus::Written(self.output.clone()))
            }
            Fetched::Status(status) => Ok(LicenseStatus::Unavailable { status }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn license_fetcher(server_url: &str, output: PathBuf) -> LicenseFetcher {
        LicenseFetcher::new(
            TextFetcher::new("pyrepo-test", Duration::from_secs(5)).unwrap(),
            Url::parse(server_url).unwrap(),
            output,
        )
    }

    #[test]
    fn test_file_name_is_lowercased() {
        assert_eq!(LicenseFetcher::file_name("MIT"), "mit.txt");
        assert_eq!(LicenseFetcher::file_name("Apache-2.0"), "apache-2.0.txt");
    }

    #[tokio::test]
    async fn test_writes_license_text_verbatim() {
        let mut server = mockito::Server::new_async().await;
        let body = "---\ntitle: MIT License\n---\n\nMIT License\n\nCopyright (c) [year]\n";
        let mock = server
            .mock("GET", "/mit.txt")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("LICENSE");
        let fetcher = license_fetcher(&server.url(), output.clone());

        let status = fetcher.create_license("MIT").await.unwrap();
        assert_eq!(status, LicenseStatus::Written(output.clone()));
        assert_eq!(std::fs::read_to_string(output).unwrap(), body);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_404_creates_no_file() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/unknown.txt")
            .with_status(404)
            .create_async()
            .await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("LICENSE");
        let fetcher = license_fetcher(&server.url(), output.clone());

        let status = fetcher.create_license("Unknown").await.unwrap();
        assert_eq!(status, LicenseStatus::Unavailable { status: 404 });
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_failed_refetch_keeps_previous_license() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/mit.txt")
            .with_status(503)
            .create_async()
            .await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("LICENSE");
        std::fs::write(&output, "previous license").unwrap();
        let fetcher = license_fetcher(&server.url(), output.clone());

        let status = fetcher.create_license("MIT").await.unwrap();
        assert_eq!(status, LicenseStatus::Unavailable { status: 503 });
        assert_eq!(std::fs::read_to_string(output).unwrap(), "previous license");
    }

    #[tokio::test]
    async fn test_no_content_response_keeps_previous_license() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/mit.txt")
            .with_status(204)
            .create_async()
            .await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("LICENSE");
        std::fs::write(&output, "previous license").unwrap();
        let fetcher = license_fetcher(&server.url(), output.clone());

        let status = fetcher.create_license("MIT").await.unwrap();
        assert_eq!(status, LicenseStatus::Unavailable { status: 204 });
        assert_eq!(std::fs::read_to_string(output).unwrap(), "previous license");
    }
}
