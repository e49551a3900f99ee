//! Local file system document source.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{DiscoveryError, LoadError};
use crate::models::{Document, IngestConfig};
use crate::utils::file::read_file_content;

/// Discovers and loads documents below a root directory.
#[derive(Debug, Clone)]
pub struct LocalSource {
    /// Root path to scan
    root: PathBuf,

    /// Glob pattern matched against paths relative to the root
    pattern: String,

    /// Maximum file size
    max_file_size: u64,
}

impl LocalSource {
    pub fn new(root: PathBuf, config: &IngestConfig) -> Self {
        Self {
            root,
            pattern: config.pattern.clone(),
            max_file_size: config.max_file_size,
        }
    }

    /// Collect all files matching the pattern, sorted for stable ordinals.
    ///
    /// Any walk failure is fatal: a run never partially ingests after the
    /// file listing itself failed.
    pub fn collect_files(&self) -> Result<Vec<PathBuf>, DiscoveryError> {
        if !self.root.exists() {
            return Err(DiscoveryError::RootNotFound(
                self.root.to_string_lossy().to_string(),
            ));
        }

        let pattern =
            glob::Pattern::new(&self.pattern).map_err(|e| DiscoveryError::InvalidPattern {
                pattern: self.pattern.clone(),
                reason: e.to_string(),
            })?;

        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root).follow_links(false) {
            let entry = entry.map_err(|e| DiscoveryError::WalkError(e.to_string()))?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(&self.root).unwrap_or(path);
            if pattern.matches(&relative.to_string_lossy()) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Read one file into a Document.
    pub fn read_document(&self, path: &Path) -> Result<Document, LoadError> {
        let text = read_file_content(path, self.max_file_size)?;
        Ok(Document::new(path.to_string_lossy().to_string(), text))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn source_for(root: &Path) -> LocalSource {
        LocalSource::new(root.to_path_buf(), &IngestConfig::default())
    }

    #[test]
    fn test_collect_matches_txt_recursively() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("c.md"), "c").unwrap();

        let files = source_for(dir.path()).collect_files().unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| p.extension().unwrap() == "txt"));
    }

    #[test]
    fn test_collect_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();

        let files = source_for(dir.path()).collect_files().unwrap();
        assert!(files[0].ends_with("a.txt"));
        assert!(files[1].ends_with("b.txt"));
    }

    #[test]
    fn test_missing_root_is_discovery_error() {
        let source = source_for(Path::new("/nonexistent/docs"));
        let err = source.collect_files().unwrap_err();
        assert!(matches!(err, DiscoveryError::RootNotFound(_)));
    }

    #[test]
    fn test_read_document_keeps_source_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "body text").unwrap();

        let doc = source_for(dir.path()).read_document(&path).unwrap();
        assert_eq!(doc.text, "body text");
        assert_eq!(doc.source_path, path.to_string_lossy());
    }

    #[test]
    fn test_read_missing_document_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = source_for(dir.path());
        let err = source.read_document(&dir.path().join("gone.txt")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
