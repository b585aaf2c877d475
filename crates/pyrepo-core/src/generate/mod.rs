//! Files rendered locally from the config and the working tree

pub mod pyproject;
pub mod readme;
pub mod requirements;

pub use pyproject::{write_pyproject, PyProject};
pub use readme::{ProjectStructure, ReadmeBuilder, ReadmeContent};
pub use requirements::{render_requirements, write_requirements};
