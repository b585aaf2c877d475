//! Remote text fetching for ignore-rule and license templates
//!
//! Any status other than 200 is returned as a value so callers can report
//! it and move on; only transport failures become errors.

use crate::error::{Result, ScaffoldError};
use std::time::Duration;
use url::Url;

/// Body or status of a GET request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    Body(String),
    Status(u16),
}

/// Thin HTTP client shared by the template components
#[derive(Debug, Clone)]
pub struct TextFetcher {
    client: reqwest::Client,
}

impl TextFetcher {
    /// Create a new fetcher; `timeout` applies to every request it makes
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(ScaffoldError::HttpClient)?;
        Ok(Self { client })
    }

    /// Build a URL by appending `/`-separated segments, preserving query parameters
    pub fn build_url(base: &Url, path: &str) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| ScaffoldError::InvalidUrl {
                url: base.to_string(),
                reason: "URL cannot have path segments".to_string(),
            })?
            .pop_if_empty()
            .extend(path.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }

    /// GET `{base}/{path}`
    pub async fn fetch(&self, base: &Url, path: &str) -> Result<Fetched> {
        let url = Self::build_url(base, path)?;
        let request_error = |source| ScaffoldError::Request {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Ok(Fetched::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(request_error)?;
        Ok(Fetched::Body(body))
    }
}
