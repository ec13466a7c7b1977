//! Durable client-side storage for the uploaded document list.
//!
//! The list lives as a JSON array under a single key and is overwritten
//! wholesale on every save. `FileStore` is the only way the rest of the
//! application touches it:
//!
//! - `SqliteFileStore`: key-value table in `seguchamba.db` under the platform
//!   data directory (e.g. `~/.local/share/seguchamba/`)
//! - `MemoryFileStore`: in-process fallback, also used by tests

use rusqlite::{Connection, OptionalExtension, params};
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

use crate::documents::UploadedFile;

/// Key holding the uploaded document list
pub const UPLOADED_FILES_KEY: &str = "uploadedPdfs";

/// Errors from the storage layer
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Could not determine data directory")]
    NoDataDir,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Could not encode file list: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Stored file list could not be read, refusing to overwrite it")]
    Unreadable,
}

/// Persistence boundary for the uploaded document list
pub trait FileStore {
    /// Read the stored list. A missing or malformed value is an empty list;
    /// only a failure to read the value at all is an error.
    fn load(&self) -> Result<Vec<UploadedFile>, StorageError>;

    /// Replace the stored list
    fn save(&self, files: &[UploadedFile]) -> Result<(), StorageError>;
}

/// Encode a list the way it is stored
pub fn encode_files(files: &[UploadedFile]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(files)?)
}

/// Decode a stored value; `None` and malformed JSON both yield an empty list
pub fn decode_files(raw: Option<&str>) -> Vec<UploadedFile> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match serde_json::from_str::<Option<Vec<UploadedFile>>>(raw) {
        Ok(files) => files.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Ignoring malformed {} value: {}", UPLOADED_FILES_KEY, e);
            Vec::new()
        }
    }
}

/// SQLite-backed key-value store.
///
/// After a failed read, saves are refused until a read succeeds, so the
/// stored list is never replaced by one built from nothing.
pub struct SqliteFileStore {
    conn: Connection,
    read_failed: Cell<bool>,
}

impl SqliteFileStore {
    /// Get the database file path
    pub fn db_path() -> Result<PathBuf, StorageError> {
        let dirs = directories::ProjectDirs::from("com", "seguchamba", "SeguChamba")
            .ok_or(StorageError::NoDataDir)?;

        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join("seguchamba.db"))
    }

    /// Open or create the store at the default location
    pub fn open() -> Result<Self, StorageError> {
        let path = Self::db_path()?;
        Self::open_at(&path)
    }

    /// Open or create the store at `path`
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn,
            read_failed: Cell::new(false),
        };
        store.init_schema()?;

        tracing::info!("Opened document store at {:?}", path);
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Raw value stored under `key`
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Overwrite the raw value under `key`
    pub fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?, ?)",
            params![key, value],
        )?;
        Ok(())
    }
}

impl FileStore for SqliteFileStore {
    fn load(&self) -> Result<Vec<UploadedFile>, StorageError> {
        match self.get_raw(UPLOADED_FILES_KEY) {
            Ok(raw) => {
                self.read_failed.set(false);
                Ok(decode_files(raw.as_deref()))
            }
            Err(e) => {
                tracing::error!("Failed to read document list: {}", e);
                self.read_failed.set(true);
                Err(e)
            }
        }
    }

    fn save(&self, files: &[UploadedFile]) -> Result<(), StorageError> {
        if self.read_failed.get() {
            return Err(StorageError::Unreadable);
        }
        let raw = encode_files(files)?;
        self.set_raw(UPLOADED_FILES_KEY, &raw)?;
        tracing::debug!("Saved {} documents to store", files.len());
        Ok(())
    }
}

/// In-memory store. Clones share the same value.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileStore {
    raw: Rc<RefCell<Option<String>>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl MemoryFileStore {
    /// Store seeded with an already-encoded value
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Rc::new(RefCell::new(Some(raw.into()))),
        }
    }

    /// Value currently held, exactly as it would be persisted
    pub fn raw(&self) -> Option<String> {
        self.raw.borrow().clone()
    }
}

impl FileStore for MemoryFileStore {
    fn load(&self) -> Result<Vec<UploadedFile>, StorageError> {
        Ok(decode_files(self.raw.borrow().as_deref()))
    }

    fn save(&self, files: &[UploadedFile]) -> Result<(), StorageError> {
        let raw = encode_files(files)?;
        *self.raw.borrow_mut() = Some(raw);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteFileStore::open_at(&dir.path().join("test.db")).unwrap();
        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.get_raw(UPLOADED_FILES_KEY).unwrap(), None);
    }

    #[test]
    fn test_sqlite_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");

        {
            let store = SqliteFileStore::open_at(&path).unwrap();
            store
                .save(&[UploadedFile::new("a.pdf"), UploadedFile::new("b.pdf")])
                .unwrap();
        }

        let store = SqliteFileStore::open_at(&path).unwrap();
        let files = store.load().unwrap();
        assert_eq!(files, vec![UploadedFile::new("a.pdf"), UploadedFile::new("b.pdf")]);
        assert_eq!(
            store.get_raw(UPLOADED_FILES_KEY).unwrap().as_deref(),
            Some(r#"[{"name":"a.pdf"},{"name":"b.pdf"}]"#)
        );
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteFileStore::open_at(&dir.path().join("test.db")).unwrap();

        store.save(&[UploadedFile::new("a.pdf")]).unwrap();
        store.save(&[]).unwrap();

        assert_eq!(store.get_raw(UPLOADED_FILES_KEY).unwrap().as_deref(), Some("[]"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_value_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteFileStore::open_at(&dir.path().join("test.db")).unwrap();
        store.set_raw(UPLOADED_FILES_KEY, "{not json").unwrap();
        assert!(store.load().unwrap().is_empty());

        // Malformed is not a read failure: the next save replaces it
        store.save(&[UploadedFile::new("a.pdf")]).unwrap();
        assert_eq!(store.load().unwrap(), vec![UploadedFile::new("a.pdf")]);
    }

    #[test]
    fn test_read_error_blocks_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteFileStore::open_at(&dir.path().join("test.db")).unwrap();

        // A BLOB cannot be read back as TEXT
        store
            .conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?, ?)",
                params![UPLOADED_FILES_KEY, vec![0xffu8, 0xfe]],
            )
            .unwrap();

        assert!(store.load().is_err());
        assert!(matches!(
            store.save(&[UploadedFile::new("a.pdf")]),
            Err(StorageError::Unreadable)
        ));

        let kept: Vec<u8> = store
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?", params![UPLOADED_FILES_KEY], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(kept, [0xff, 0xfe]);
    }

    #[test]
    fn test_null_value_is_empty() {
        assert!(decode_files(Some("null")).is_empty());
        assert!(decode_files(None).is_empty());
    }

    #[test]
    fn test_memory_store_shares_value_between_clones() {
        let store = MemoryFileStore::new();
        let observer = store.clone();

        assert_eq!(observer.raw(), None);
        store.save(&[UploadedFile::new("report.pdf")]).unwrap();
        assert_eq!(observer.raw().as_deref(), Some(r#"[{"name":"report.pdf"}]"#));
        assert_eq!(observer.load().unwrap(), vec![UploadedFile::new("report.pdf")]);
    }
}
