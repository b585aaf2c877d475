//! README.md generated from the working tree

use crate::error::{IoResultExt, Result};
use crate::options::ProjectLayout;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::{DirEntry, WalkDir};

/// Extension of files scanned for a module docstring
const SOURCE_EXTENSION: &str = "py";

/// Which conventional paths exist under the root
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectStructure {
    pub tests: bool,
    pub scripts: bool,
    pub data: bool,
    pub config: bool,
}

impl ProjectStructure {
    pub fn is_empty(&self) -> bool {
        !(self.tests || self.scripts || self.data || self.config)
    }
}

/// Everything the README shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadmeContent {
    pub title: String,
    pub description: String,
    pub dependencies: Vec<String>,
    pub structure: ProjectStructure,
    pub license: String,
    /// Config file label as shown in the structure section
    pub config_label: String,
}

impl ReadmeContent {
    pub fn render(&self) -> String {
        let mut out = format!("# {}\n\n{}\n\n", self.title, self.description);

        if !self.dependencies.is_empty() {
            out.push_str("## Dependencies\n\n");
            out.push_str(&self.dependencies.join("\n"));
            out.push_str("\n\n");
        }

        if !self.structure.is_empty() {
            out.push_str("## Project Structure\n\n");
            if self.structure.tests {
                out.push_str("- `tests/`: Directory containing test files\n");
            }
            if self.structure.scripts {
                out.push_str("- `scripts/`: Directory containing script files\n");
            }
            if self.structure.data {
                out.push_str("- `data/`: Directory containing data files\n");
            }
            if self.structure.config {
                out.push_str(&format!("- `{}`: Configuration file\n", self.config_label));
            }
            out.push('\n');
        }

        if !self.license.is_empty() {
            out.push_str("## License\n\n");
            out.push_str(&format!("```\n{}\n```\n", self.license.trim_end()));
        }

        out
    }
}

/// Inspects the project tree and writes README.md
pub struct ReadmeBuilder {
    layout: ProjectLayout,
}

impl ReadmeBuilder {
    pub fn new(layout: ProjectLayout) -> Self {
        Self { layout }
    }

    /// First docstring line of the first Python file that has one
    ///
    /// Files are visited shallowest first, then by path. Hidden directories,
    /// the virtual environment and the template cache are skipped.
    pub fn describe(&self) -> String {
        for path in self.source_files() {
            let Ok(contents) = std::fs::read_to_string(&path) else {
                continue;
            };
            if let Some(description) = first_docstring(&contents) {
                return description;
            }
        }
        String::new()
    }

    fn source_files(&self) -> Vec<PathBuf> {
        let venv = self.layout.venv.clone();
        let cache = self.layout.template_cache.clone();
        let mut files: Vec<(usize, PathBuf)> = WalkDir::new(&self.layout.root)
            .into_iter()
            .filter_entry(|entry| should_descend(entry, &venv, &cache))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .is_some_and(|ext| ext == SOURCE_EXTENSION)
            })
            .map(|entry| (entry.depth(), entry.into_path()))
            .collect();
        files.sort();
        files.into_iter().map(|(_, path)| path).collect()
    }

    /// Raw lines of requirements.txt, empty when the file is absent
    pub fn dependencies(&self) -> Vec<String> {
        std::fs::read_to_string(&self.layout.requirements)
            .map(|text| text.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Full LICENSE text, empty when the file is absent
    pub fn license(&self) -> String {
        std::fs::read_to_string(&self.layout.license).unwrap_or_default()
    }

    pub fn structure(&self) -> ProjectStructure {
        let root = &self.layout.root;
        ProjectStructure {
            tests: root.join("tests").exists(),
            scripts: root.join("scripts").exists(),
            data: root.join("data").exists(),
            config: self.layout.config.exists(),
        }
    }

    /// Base name of the project root
    pub fn title(&self) -> String {
        let root = self
            .layout
            .root
            .canonicalize()
            .unwrap_or_else(|_| self.layout.root.clone());
        root.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string())
    }

    pub fn collect(&self) -> ReadmeContent {
        ReadmeContent {
            title: self.title(),
            description: self.describe(),
            dependencies: self.dependencies(),
            structure: self.structure(),
            license: self.license(),
            config_label: self
                .layout
                .relative(&self.layout.config)
                .to_string_lossy()
                .replace('\\', "/"),
        }
    }

    /// Compute the README once and write it once
    pub async fn write(&self) -> Result<ReadmeContent> {
        let content = self.collect();
        fs::write(&self.layout.readme, content.render())
            .await
            .with_path("write", &self.layout.readme)?;
        Ok(content)
    }
}

fn should_descend(entry: &DirEntry, venv: &Path, cache: &Path) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }
    let hidden = entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'));
    !hidden && entry.path() != venv && entry.path() != cache
}

/// Text of the first line opening a `"""` or `'''` block, quotes stripped
///
/// An opening line with nothing but quotes gives no description.
fn first_docstring(contents: &str) -> Option<String> {
    let line = contents
        .lines()
        .find(|line| line.starts_with("\"\"\"") || line.starts_with("'''"))?;
    let text = line
        .trim()
        .trim_matches('"')
        .trim_matches('\'')
        .trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(root: &Path) -> ReadmeBuilder {
        ReadmeBuilder::new(ProjectLayout::new(root))
    }

    #[test]
    fn test_first_docstring() {
        assert_eq!(
            first_docstring("\"\"\"main.py\n\nMore text\n\"\"\"\n"),
            Some("main.py".to_string())
        );
        assert_eq!(
            first_docstring("'''One-line summary.'''\n"),
            Some("One-line summary.".to_string())
        );
        assert_eq!(first_docstring("\"\"\"\nSummary below\n\"\"\"\n"), None);
        assert_eq!(first_docstring("import os\n    \"\"\"indented\"\"\"\n"), None);
    }

    #[test]
    fn test_describe_prefers_shallow_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("pkg")).unwrap();
        std::fs::write(dir.path().join("pkg").join("a.py"), "\"\"\"Nested module\"\"\"\n").unwrap();
        std::fs::write(dir.path().join("main.py"), "\"\"\"Top level tool\"\"\"\n").unwrap();

        assert_eq!(builder(dir.path()).describe(), "Top level tool");
    }

    #[test]
    fn test_describe_skips_files_without_docstring_and_venv() {
        let dir = tempfile::tempdir().unwrap();
        let site = dir.path().join(".venv").join("lib");
        std::fs::create_dir_all(&site).unwrap();
        std::fs::write(site.join("aaa.py"), "\"\"\"Vendored\"\"\"\n").unwrap();
        std::fs::write(dir.path().join("a.py"), "import sys\n").unwrap();
        std::fs::write(dir.path().join("b.py"), "'''Second file wins'''\n").unwrap();

        assert_eq!(builder(dir.path()).describe(), "Second file wins");
    }

    #[test]
    fn test_describe_empty_without_sources() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "\"\"\"Not python\"\"\"\n").unwrap();
        assert_eq!(builder(dir.path()).describe(), "");
    }

    #[test]
    fn test_missing_inputs_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        let b = builder(dir.path());
        assert!(b.dependencies().is_empty());
        assert_eq!(b.license(), "");
        assert!(b.structure().is_empty());
    }

    #[test]
    fn test_dependencies_keep_file_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("requirements.txt"),
            "requests==2.31.0\nnumpy==1.26.4\n",
        )
        .unwrap();
        assert_eq!(
            builder(dir.path()).dependencies(),
            vec!["requests==2.31.0", "numpy==1.26.4"]
        );
    }

    #[tokio::test]
    async fn test_structure_lists_only_existing_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("tests")).unwrap();

        let b = builder(dir.path());
        let content = b.write().await.unwrap();
        assert_eq!(
            content.structure,
            ProjectStructure {
                tests: true,
                ..Default::default()
            }
        );

        let readme = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
        assert!(readme.contains("## Project Structure\n\n- `tests/`: Directory containing test files\n"));
        assert!(!readme.contains("scripts/"));
        assert!(!readme.contains("data/"));
        assert!(!readme.contains("Configuration file"));
    }

    #[tokio::test]
    async fn test_full_readme() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("my-project");
        std::fs::create_dir_all(root.join("config")).unwrap();
        std::fs::create_dir_all(root.join("scripts")).unwrap();
        std::fs::write(root.join("config").join("conf.ini"), "[Metadata]\n").unwrap();
        std::fs::write(root.join("main.py"), "\"\"\"Automates things\"\"\"\n").unwrap();
        std::fs::write(root.join("requirements.txt"), "toml==0.10.2\n").unwrap();
        std::fs::write(root.join("LICENSE"), "MIT License\n").unwrap();
        std::fs::write(root.join("README.md"), "stale").unwrap();

        builder(&root).write().await.unwrap();

        let readme = std::fs::read_to_string(root.join("README.md")).unwrap();
        assert_eq!(
            readme,
            "# my-project\n\n\
             Automates things\n\n\
             ## Dependencies\n\n\
             toml==0.10.2\n\n\
             ## Project Structure\n\n\
             - `scripts/`: Directory containing script files\n\
             - `config/conf.ini`: Configuration file\n\n\
             ## License\n\n\
             ```\nMIT License\n```\n"
        );
    }

    #[test]
    fn test_sections_omitted_when_empty() {
        let content = ReadmeContent {
            title: "demo".to_string(),
            description: "A demo".to_string(),
            ..Default::default()
        };
        assert_eq!(content.render(), "# demo\n\nA demo\n\n");
    }
}
