//! Discovery of raw resource definition files.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::LoaderError;

/// File extensions recognized as resource definitions.
const RESOURCE_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// One raw resource definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResource {
    /// Name used in diagnostics (file name for on-disk sources).
    pub name: String,
    pub content: Vec<u8>,
}

impl RawResource {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Supplies the raw definitions of one resource kind.
///
/// A missing directory is not an error: it yields an empty set.
pub trait ResourceSource: Send + Sync {
    /// # Errors
    /// Returns [`LoaderError::Discovery`] when the directory exists but cannot be read.
    fn read_resources(&self, kind: &str, directory: &str) -> Result<Vec<RawResource>, LoaderError>;
}

/// Reads `*.yaml` / `*.yml` files from `<root>/<directory>`.
///
/// Only the top level of the kind directory is scanned. Files are returned
/// sorted by name so loading is deterministic across platforms.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceSource for DirectorySource {
    fn read_resources(&self, kind: &str, directory: &str) -> Result<Vec<RawResource>, LoaderError> {
        let dir = self.root.join(directory);
        if !dir.is_dir() {
            debug!(kind, dir = %dir.display(), "Resource directory not found, nothing to load");
            return Ok(Vec::new());
        }

        let discovery_err = |message: String| LoaderError::Discovery {
            kind: kind.to_owned(),
            directory: dir.display().to_string(),
            message,
        };

        let mut resources = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| discovery_err(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let recognized = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| RESOURCE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
            if !recognized {
                continue;
            }

            let content = fs::read(path).map_err(|e| discovery_err(format!("{}: {e}", path.display())))?;
            resources.push(RawResource::new(
                entry.file_name().to_string_lossy().into_owned(),
                content,
            ));
        }

        debug!(kind, dir = %dir.display(), count = resources.len(), "Discovered resource files");
        Ok(resources)
    }
}

/// In-memory source keyed by directory name.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    directories: HashMap<String, Vec<RawResource>>,
}

impl StaticSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition under `directory`.
    #[must_use]
    pub fn with_resource(
        mut self,
        directory: &str,
        name: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        self.directories
            .entry(directory.to_owned())
            .or_default()
            .push(RawResource::new(name, content));
        self
    }
}

impl ResourceSource for StaticSource {
    fn read_resources(&self, _kind: &str, directory: &str) -> Result<Vec<RawResource>, LoaderError> {
        Ok(self.directories.get(directory).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn static_source_returns_resources_in_insertion_order() {
        let src = StaticSource::new()
            .with_resource("layouts", "b.yaml", "id: b")
            .with_resource("layouts", "a.yaml", "id: a");

        let res = src.read_resources("layout", "layouts").unwrap();
        assert_eq!(
            res.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
            vec!["b.yaml", "a.yaml"]
        );
        assert!(src.read_resources("layout", "missing").unwrap().is_empty());
    }

    #[test]
    fn directory_source_missing_dir_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let src = DirectorySource::new(tmp.path());
        assert!(src.read_resources("layout", "layouts").unwrap().is_empty());
    }

    #[test]
    fn directory_source_reads_yaml_sorted_and_skips_others() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("organization_units");
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("b.yml"), "id: b").unwrap();
        fs::write(dir.join("a.yaml"), "id: a").unwrap();
        fs::write(dir.join("README.md"), "# notes").unwrap();
        fs::write(dir.join("nested").join("c.yaml"), "id: c").unwrap();

        let src = DirectorySource::new(tmp.path());
        let res = src.read_resources("organization unit", "organization_units").unwrap();

        assert_eq!(
            res.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
            vec!["a.yaml", "b.yml"]
        );
        assert_eq!(res[0].content, b"id: a");
    }
}
