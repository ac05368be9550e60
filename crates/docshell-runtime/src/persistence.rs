#![forbid(unsafe_code)]

//! Optional persistence of panel preferences.
//!
//! Layout state is per session unless a [`StorageBackend`] is attached to
//! the provider. Only [`PanelPrefs`] are stored: explicit collapse choices
//! and the last dragged widths. A forced mobile collapse never reaches
//! storage.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "prefs": {
//!     "navigation_collapsed": false,
//!     "intelligence_collapsed": true,
//!     "navigation_width": 300,
//!     "intelligence_width": 360
//!   }
//! }
//! ```
//!
//! Writes go to a temp file that is then renamed over the target.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use docshell_layout::PanelPrefs;
use serde::{Deserialize, Serialize};

/// Current file format version.
pub const FORMAT_VERSION: u64 = 1;

pub type StorageResult<T> = Result<T, StorageError>;

/// Where panel preferences live between sessions.
pub trait StorageBackend: Send {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Load saved preferences. `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> StorageResult<Option<PanelPrefs>>;

    fn save(&self, prefs: &PanelPrefs) -> StorageResult<()>;

    /// Forget saved preferences.
    fn clear(&self) -> StorageResult<()>;
}

// ---------------------------------------------------------------------------
// MemoryStorage
// ---------------------------------------------------------------------------

/// In-process storage. Clones share the same slot, so a test can keep a
/// handle after giving one to a provider.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<PanelPrefs>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored preferences, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<PanelPrefs> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StorageBackend for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    fn load(&self) -> StorageResult<Option<PanelPrefs>> {
        Ok(self.snapshot())
    }

    fn save(&self, prefs: &PanelPrefs) -> StorageResult<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(*prefs);
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStorage
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct PrefsFile {
    version: u64,
    prefs: PanelPrefs,
}

/// JSON file storage.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Store preferences at `path`. The parent directory must exist.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FileStorage {
    fn name(&self) -> &str {
        "file"
    }

    /// - Missing file: `Ok(None)`.
    /// - Corrupt file: [`StorageError::Serialization`].
    /// - Other version: [`StorageError::VersionMismatch`].
    fn load(&self) -> StorageResult<Option<PanelPrefs>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::Io(e)),
        };
        let file: PrefsFile = serde_json::from_str(&contents)?;
        if file.version != FORMAT_VERSION {
            return Err(StorageError::VersionMismatch {
                found: file.version,
                expected: FORMAT_VERSION,
            });
        }
        Ok(Some(file.prefs))
    }

    fn save(&self, prefs: &PanelPrefs) -> StorageResult<()> {
        let file = PrefsFile {
            version: FORMAT_VERSION,
            prefs: *prefs,
        };
        let json = serde_json::to_string_pretty(&file)?;

        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, json)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(StorageError::Io(e)),
            _ => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from a [`StorageBackend`].
#[derive(Debug)]
pub enum StorageError {
    /// I/O error reading or writing storage.
    Io(io::Error),
    /// Stored data could not be encoded or decoded.
    Serialization(serde_json::Error),
    /// Stored data was written by an incompatible format version.
    VersionMismatch { found: u64, expected: u64 },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Serialization(e) => write!(f, "serialization error: {e}"),
            Self::VersionMismatch { found, expected } => write!(
                f,
                "unsupported layout preferences version: {found} (expected {expected})"
            ),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Serialization(e) => Some(e),
            Self::VersionMismatch { .. } => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs() -> PanelPrefs {
        PanelPrefs {
            navigation_collapsed: false,
            intelligence_collapsed: true,
            navigation_width: 300,
            intelligence_width: 360,
        }
    }

    #[test]
    fn memory_storage_is_shared_between_clones() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();
        assert_eq!(storage.load().unwrap(), None);
        storage.save(&prefs()).unwrap();
        assert_eq!(handle.snapshot(), Some(prefs()));
        handle.clear().unwrap();
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("layout.json"));
        assert_eq!(storage.load().unwrap(), None);

        storage.save(&prefs()).unwrap();
        assert_eq!(storage.load().unwrap(), Some(prefs()));
        assert!(!dir.path().join("layout.json.tmp").exists());

        storage.clear().unwrap();
        assert_eq!(storage.load().unwrap(), None);
        // Clearing twice is fine.
        storage.clear().unwrap();
    }

    #[test]
    fn corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = FileStorage::new(&path).load().unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[test]
    fn other_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        let json = serde_json::json!({
            "version": 7,
            "prefs": prefs(),
        });
        std::fs::write(&path, json.to_string()).unwrap();
        let err = FileStorage::new(&path).load().unwrap_err();
        assert!(matches!(
            err,
            StorageError::VersionMismatch {
                found: 7,
                expected: FORMAT_VERSION
            }
        ));
        assert!(err.to_string().contains("expected 1"));
    }

    #[test]
    fn missing_parent_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nope").join("layout.json"));
        assert!(matches!(storage.save(&prefs()), Err(StorageError::Io(_))));
    }
}
