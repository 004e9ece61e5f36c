//! Where roster documents come from.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use kg_core::Region;

use crate::error::{RosterError, RosterResult};

/// Default file name pattern for per-region data.
pub const DEFAULT_REGION_PATTERN: &str = "students_{region}.json";

/// Default file name for unified data.
pub const DEFAULT_UNIFIED_PATH: &str = "students.json";

/// A provider of roster documents addressed by relative path.
pub trait RosterSource {
    /// Fetch the raw document at `path`.
    fn fetch(&self, path: &str) -> RosterResult<String>;
}

/// Reads documents from files under a root directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl RosterSource for DirSource {
    fn fetch(&self, path: &str) -> RosterResult<String> {
        let full = self.root.join(path);
        std::fs::read_to_string(&full).map_err(|e| RosterError::Fetch {
            path: full.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Serves documents held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document at `path`.
    pub fn with_document(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    /// Add or replace a document at `path`.
    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.documents.insert(path.into(), text.into());
    }
}

impl RosterSource for MemorySource {
    fn fetch(&self, path: &str) -> RosterResult<String> {
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| RosterError::Fetch {
                path: path.to_string(),
                reason: "not found".to_string(),
            })
    }
}

/// How roster data is split across documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataLayout {
    /// One document per region; `{region}` in the pattern is replaced by the
    /// region code. Switching region requires a fetch.
    PerRegion {
        /// Path pattern, e.g. `students_{region}.json`.
        pattern: String,
    },
    /// A single document for all regions; switching region only refilters.
    Unified {
        /// Path of the document.
        path: String,
    },
}

impl DataLayout {
    /// Per-region layout with the default file pattern.
    pub fn per_region() -> Self {
        Self::PerRegion {
            pattern: DEFAULT_REGION_PATTERN.to_string(),
        }
    }

    /// Unified layout reading `path`.
    pub fn unified(path: impl Into<String>) -> Self {
        Self::Unified { path: path.into() }
    }

    /// Whether switching region needs a new fetch.
    pub fn is_per_region(&self) -> bool {
        matches!(self, Self::PerRegion { .. })
    }

    /// Document path holding data for `region`.
    pub fn path_for(&self, region: Region) -> String {
        match self {
            Self::PerRegion { pattern } => pattern.replace("{region}", region.code()),
            Self::Unified { path } => path.clone(),
        }
    }
}

impl Default for DataLayout {
    fn default() -> Self {
        Self::per_region()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn per_region_paths() {
        let layout = DataLayout::per_region();
        assert_eq!(layout.path_for(Region::Jp), "students_jp.json");
        assert_eq!(layout.path_for(Region::Cn), "students_cn.json");
        assert!(layout.is_per_region());
    }

    #[test]
    fn unified_path_ignores_region() {
        let layout = DataLayout::unified("all.json");
        assert_eq!(layout.path_for(Region::Gl), "all.json");
        assert!(!layout.is_per_region());
    }

    #[test]
    fn memory_source_missing_document() {
        let src = MemorySource::new().with_document("a.json", "[]");
        assert_eq!(src.fetch("a.json").unwrap(), "[]");
        assert!(matches!(
            src.fetch("b.json"),
            Err(RosterError::Fetch { .. })
        ));
    }

    #[test]
    fn dir_source_reads_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("students_jp.json"), "{}").unwrap();
        let src = DirSource::new(dir.path());
        assert_eq!(src.fetch("students_jp.json").unwrap(), "{}");
        let err = src.fetch("students_gl.json").unwrap_err();
        assert!(err.to_string().contains("students_gl.json"));
    }
}
