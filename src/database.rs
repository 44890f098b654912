use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::Error;

/// Campaign collection persisted as a single json document on disk.
///
/// Every write replaces the whole file. There is no locking: two processes
/// writing the same file silently overwrite each other and the last write
/// wins. Run a single writer per file.
#[derive(Debug, Clone)]
pub struct JsonFileDatabase {
    path: PathBuf,
}

impl JsonFileDatabase {
    pub fn new(path: impl Into<PathBuf>) -> JsonFileDatabase {
        JsonFileDatabase { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Contents of the storage unit, `None` if it was never written.
    pub fn read(&self) -> Result<Option<String>, Error> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Replaces the storage unit. The new contents go to a sibling file that
    /// is renamed over the old one, so a failed write leaves the previous
    /// contents in place.
    pub fn write(&self, contents: &str) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);

        fs::write(&staging, contents)?;
        if let Err(err) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(err.into());
        }

        Ok(())
    }

    pub fn drop(&self) -> Result<(), Error> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-process stand-in for the storage unit. Contents are still kept as
/// serialized json so reads and writes go through the same codec as the
/// file database.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    slot: Mutex<Option<String>>,
}

impl MemoryDatabase {
    pub fn new() -> MemoryDatabase {
        MemoryDatabase::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> MemoryDatabase {
        MemoryDatabase {
            slot: Mutex::new(Some(contents.into())),
        }
    }

    pub fn read(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn write(&self, contents: String) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(contents);
    }

    pub fn drop(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let db = JsonFileDatabase::new(dir.path().join("campaigns.json"));

        assert_eq!(db.read().unwrap(), None);
        db.drop().unwrap();
    }

    #[test]
    fn write_replaces_contents_and_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let db = JsonFileDatabase::new(dir.path().join("nested/campaigns.json"));

        db.write("[1]").unwrap();
        db.write("[2]").unwrap();

        assert_eq!(db.read().unwrap().as_deref(), Some("[2]"));
        assert!(!dir.path().join("nested/campaigns.json.tmp").exists());

        db.drop().unwrap();
        assert_eq!(db.read().unwrap(), None);
    }

    #[test]
    fn failed_write_keeps_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let db = JsonFileDatabase::new(dir.path().join("campaigns.json"));
        db.write("[1]").unwrap();

        // a directory in the staging spot makes the write fail
        fs::create_dir(dir.path().join("campaigns.json.tmp")).unwrap();

        assert!(matches!(db.write("[2]"), Err(Error::FailedStorageIo(_))));
        assert_eq!(db.read().unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn failed_rename_removes_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campaigns.json");
        let db = JsonFileDatabase::new(&path);

        // a non-empty directory at the target cannot be replaced by a file
        fs::create_dir_all(path.join("occupied")).unwrap();

        assert!(matches!(db.write("[1]"), Err(Error::FailedStorageIo(_))));
        assert!(!dir.path().join("campaigns.json.tmp").exists());
        assert!(path.join("occupied").is_dir());
    }

    #[test]
    fn memory_slot_starts_empty() {
        let db = MemoryDatabase::new();
        assert_eq!(db.read(), None);

        db.write("[]".into());
        assert_eq!(db.read().as_deref(), Some("[]"));

        db.drop();
        assert_eq!(db.read(), None);
    }
}
