use std::path::PathBuf;

/// Which storage backend to construct at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Json,
    Sqlite,
}

/// Directories used by the storage and export layers.
///
/// Supplied by the caller; the core never reads environment variables or
/// command-line arguments itself.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub export_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: impl Into<PathBuf>, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            export_dir: export_dir.into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new("data", "exports")
    }
}
