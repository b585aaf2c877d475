//! Project configuration loading

pub mod project;

pub use project::{Dependency, Metadata, ProjectConfig, Settings};
