//! Where the fallback snapshot comes from.

use std::path::PathBuf;

use crate::errors::SnapshotError;

/// The snapshot compiled into the crate.
static EMBEDDED_SNAPSHOT: &str = include_str!("snapshot.json");

/// A source of the raw snapshot document.
///
/// Sources are read at most once per successful load; the store caches the
/// parsed records.
pub trait SnapshotSource: Send + Sync {
    /// Short label for logs.
    fn describe(&self) -> String;

    /// Read the raw JSON document.
    fn read(&self) -> Result<String, SnapshotError>;
}

/// The snapshot bundled with the crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbeddedSnapshot;

impl SnapshotSource for EmbeddedSnapshot {
    fn describe(&self) -> String {
        "embedded snapshot".to_string()
    }

    fn read(&self) -> Result<String, SnapshotError> {
        Ok(EMBEDDED_SNAPSHOT.to_string())
    }
}

/// A snapshot document on disk.
#[derive(Clone, Debug)]
pub struct FileSnapshot {
    path: PathBuf,
}

impl FileSnapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotSource for FileSnapshot {
    fn describe(&self) -> String {
        format!("snapshot file {}", self.path.display())
    }

    fn read(&self) -> Result<String, SnapshotError> {
        Ok(std::fs::read_to_string(&self.path)?)
    }
}
