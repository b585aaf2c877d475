//! Remote templates: ignore rules and license texts
//!
//! This module provides:
//! - An HTTP text fetcher with a uniform timeout
//! - `.gitignore` generation backed by a local template cache
//! - LICENSE download

pub mod fetcher;
pub mod gitignore;
pub mod license;

pub use fetcher::{Fetched, TextFetcher};
pub use gitignore::{IgnoreFileGenerator, IgnoreReport, TemplateStatus};
pub use license::{LicenseFetcher, LicenseStatus};
