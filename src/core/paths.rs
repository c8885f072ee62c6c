//! Data path resolution
//!
//! The catalog and guide live in a data directory under fixed file names.
//! Either file can be overridden; relative overrides resolve against the data directory.

use std::path::{Path, PathBuf};

/// Default catalog file name inside the data directory
pub const DEFAULT_CATALOG_FILE: &str = "aduana_cuba_db.json";

/// Default guide file name inside the data directory
pub const DEFAULT_GUIDE_FILE: &str = "guida_viaggiatore_cuba.json";

/// Resolved locations of the two data documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub data_dir: PathBuf,
    pub catalog: PathBuf,
    pub guide: PathBuf,
}

impl DataPaths {
    /// Resolve document paths from the data directory and optional overrides
    pub fn resolve(data_dir: &Path, catalog: Option<&Path>, guide: Option<&Path>) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            catalog: join_override(data_dir, catalog, DEFAULT_CATALOG_FILE),
            guide: join_override(data_dir, guide, DEFAULT_GUIDE_FILE),
        }
    }

    /// Path shown in output: relative to the data directory when possible
    pub fn display(&self, path: &Path) -> String {
        make_relative(path, &self.data_dir)
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| normalize_path(path))
    }
}

fn join_override(data_dir: &Path, path: Option<&Path>, default: &str) -> PathBuf {
    match path {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => data_dir.join(p),
        None => data_dir.join(default),
    }
}

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a path relative to the root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}
