//! Event collection storage with XDG path support.
//!
//! The collection is a JSON array of [`EventRecord`]s stored at
//! `~/.local/share/agenda/events.json` by default. It is written by the
//! import step and read once per session by everything else.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;

use crate::models::EventRecord;

/// Default events filename.
const EVENTS_FILENAME: &str = "events.json";

/// Application qualifier (for XDG paths).
const QUALIFIER: &str = "";

/// Application organization (for XDG paths).
const ORGANIZATION: &str = "";

/// Application name (for XDG paths).
const APPLICATION: &str = "agenda";

/// Errors that can occur during event storage operations.
#[derive(Debug, Error)]
pub enum EventStoreError {
    /// Failed to determine the XDG data directory.
    #[error("failed to determine data directory: no valid home directory found")]
    NoDataDir,

    /// I/O error during file read.
    #[error("failed to read events file '{path}': {source}")]
    ReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during file write.
    #[error("failed to write events file '{path}': {source}")]
    WriteError {
        /// The path that failed to write.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during directory creation.
    #[error("failed to create data directory '{path}': {source}")]
    CreateDirError {
        /// The directory path that failed to create.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for event store operations.
pub type Result<T> = std::result::Result<T, EventStoreError>;

/// Persistent storage for the event collection.
///
/// # Example
///
/// ```no_run
/// use agenda_core::EventStore;
///
/// let store = EventStore::new()?;
/// let events = store.load_or_default()?;
/// println!("{} events", events.len());
/// # Ok::<(), agenda_core::EventStoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EventStore {
    /// Path to the events file.
    path: PathBuf,
}

impl EventStore {
    /// Creates a store at the default XDG data path.
    ///
    /// # Errors
    ///
    /// Returns `EventStoreError::NoDataDir` if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        let path = Self::default_path()?;
        Ok(Self { path })
    }

    /// Creates a store with a custom path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the default XDG data path for the events file.
    ///
    /// On Unix: `~/.local/share/agenda/events.json`
    /// On macOS: `~/Library/Application Support/agenda/events.json`
    ///
    /// # Errors
    ///
    /// Returns `EventStoreError::NoDataDir` if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or(EventStoreError::NoDataDir)?;

        Ok(project_dirs.data_dir().join(EVENTS_FILENAME))
    }

    /// Returns the path to the events file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the events file exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads the event collection.
    ///
    /// The file is expected to be one written by `import`: records are not
    /// re-validated, so a single record with an unknown `category` fails the
    /// whole load instead of being defaulted to SHOW as ingestion does.
    ///
    /// # Errors
    ///
    /// - Returns `EventStoreError::ReadError` if the file cannot be read.
    /// - Returns `EventStoreError::Json` if the file is not a valid event array.
    pub fn load(&self) -> Result<Vec<EventRecord>> {
        let contents = fs::read_to_string(&self.path).map_err(|e| EventStoreError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Loads the event collection, returning an empty one if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// - Returns `EventStoreError::ReadError` for I/O errors other than "file not found".
    /// - Returns `EventStoreError::Json` if the file is not a valid event array.
    pub fn load_or_default(&self) -> Result<Vec<EventRecord>> {
        match self.load() {
            Ok(events) => Ok(events),
            Err(EventStoreError::ReadError { ref source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Saves the event collection atomically as pretty-printed JSON.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// - Returns `EventStoreError::CreateDirError` if the directory cannot be created.
    /// - Returns `EventStoreError::WriteError` if the file cannot be written.
    /// - Returns `EventStoreError::Json` if serialization fails.
    pub fn save(&self, events: &[EventRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| EventStoreError::CreateDirError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(events)?;

        // write to a sibling temp file, then rename over the target
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &json).map_err(|e| EventStoreError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| EventStoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_default_path_ends_with_events_json() {
        let path = EventStore::default_path().expect("should get default path");
        let path_str = path.to_string_lossy();

        assert!(
            path_str.ends_with("events.json"),
            "path should end with events.json: {}",
            path_str
        );
        assert!(
            path_str.contains("agenda"),
            "path should contain 'agenda': {}",
            path_str
        );
        assert!(path.is_absolute(), "path should be absolute: {:?}", path);
    }

    #[test]
    fn test_with_custom_path() {
        let store = EventStore::with_path("/tmp/agenda-test/events.json");
        assert_eq!(store.path(), Path::new("/tmp/agenda-test/events.json"));
    }

    #[test]
    fn test_read_error_includes_file_path() {
        use std::error::Error;

        let store = EventStore::with_path("/nonexistent/path/to/events.json");
        let error = store.load().unwrap_err();
        let error_msg = error.to_string();

        assert!(
            error_msg.contains("/nonexistent/path/to/events.json"),
            "error should include file path: {}",
            error_msg
        );
        assert!(error.source().is_some(), "error should have a source io::Error");
    }

    #[test]
    fn test_load_or_default_for_missing_file() {
        let store = EventStore::with_path("/nonexistent/path/to/events.json");
        let events = store.load_or_default().unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = EventStore::with_path(temp_dir.path().join("nested").join("events.json"));

        let mut event = EventRecord::new("1", "Forró na Orla", Category::Show, "2025-01-10");
        event.price = Some(25.0);
        store.save(std::slice::from_ref(&event)).unwrap();

        assert!(store.exists());
        assert_eq!(store.load().unwrap(), vec![event]);
        assert!(!store.path().with_extension("tmp").exists());
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("events.json");
        fs::write(&path, "{ not json").unwrap();

        let result = EventStore::with_path(path).load();
        assert!(matches!(result, Err(EventStoreError::Json(_))));
    }

    #[test]
    fn test_load_rejects_unknown_category() {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("events.json");
        fs::write(
            &path,
            r#"[{"id": "1", "title": "Ópera", "category": "OPERA", "date": "2025-01-10"}]"#,
        )
        .unwrap();

        let result = EventStore::with_path(path).load();
        assert!(matches!(result, Err(EventStoreError::Json(_))));
    }

    #[test]
    fn test_write_error_includes_file_path() {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "blocking").unwrap();

        let store = EventStore::with_path(blocker.join("sub").join("events.json"));
        let error = store.save(&[]).unwrap_err();
        assert!(
            matches!(error, EventStoreError::CreateDirError { .. }),
            "unexpected error: {error}"
        );
        assert!(error.to_string().contains("blocker"));
    }
}
