//! Order store
//!
//! A two-slot key-value store holding the current order and the current
//! failure. Backends only move strings; [`OrderStoreExt`] layers JSON records
//! on top.

use std::{collections::HashMap, fmt, io, path::PathBuf, sync::Mutex};
#[cfg(not(target_arch = "wasm32"))]
use std::{fs, io::Write, path::Path};

use mockall::automock;
use serde::{Serialize, de::DeserializeOwned};
#[cfg(not(target_arch = "wasm32"))]
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

use crate::orders::{FailureRecord, OrderRecord};

/// Storage slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Most recent successful order
    Order,
    /// Most recent failed attempt
    Failure,
}

impl Slot {
    /// Every slot.
    pub const ALL: [Self; 2] = [Self::Order, Self::Failure];

    /// Storage key.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Order => "orderData",
            Self::Failure => "failureData",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure
    #[error("failed to access {}", path.display())]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Record could not be serialized
    #[error("failed to encode {slot} record")]
    Encode {
        /// Target slot
        slot: Slot,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Stored value is not a valid record
    #[error("stored {slot} record is malformed")]
    Decode {
        /// Source slot
        slot: Slot,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Backend cannot be reached
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Raw slot storage.
///
/// `set` replaces the whole value; `get` returns `None` before any `set` and
/// after `clear`.
#[automock]
pub trait OrderStore: Send + Sync {
    /// Read a slot.
    fn get(&self, slot: Slot) -> Result<Option<String>, StoreError>;

    /// Replace a slot's value.
    fn set(&self, slot: Slot, value: String) -> Result<(), StoreError>;

    /// Empty a slot.
    fn clear(&self, slot: Slot) -> Result<(), StoreError>;
}

/// JSON record access for any [`OrderStore`].
pub trait OrderStoreExt: OrderStore {
    /// Read and decode a slot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Decode`] if the slot holds something other than a `T`.
    fn read_record<T: DeserializeOwned>(&self, slot: Slot) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.get(slot)? else {
            debug!(%slot, "slot is empty");
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Decode { slot, source })
    }

    /// Encode and write a record.
    ///
    /// The record is fully encoded before the backend is touched.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the backend write fails.
    fn write_record<T: Serialize>(&self, slot: Slot, record: &T) -> Result<(), StoreError> {
        let raw =
            serde_json::to_string(record).map_err(|source| StoreError::Encode { slot, source })?;

        debug!(%slot, bytes = raw.len(), "writing record");

        self.set(slot, raw)
    }

    /// Current order, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read or decoded.
    fn read_order(&self) -> Result<Option<OrderRecord>, StoreError> {
        self.read_record(Slot::Order)
    }

    /// Current failure, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read or decoded.
    fn read_failure(&self) -> Result<Option<FailureRecord>, StoreError> {
        self.read_record(Slot::Failure)
    }

    /// Replace the current order.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the write fails.
    fn write_order(&self, order: &OrderRecord) -> Result<(), StoreError> {
        self.write_record(Slot::Order, order)
    }

    /// Replace the current failure.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the write fails.
    fn write_failure(&self, failure: &FailureRecord) -> Result<(), StoreError> {
        self.write_record(Slot::Failure, failure)
    }
}

impl<S: OrderStore + ?Sized> OrderStoreExt for S {}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<Slot, String>>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_slots<T>(
        &self,
        f: impl FnOnce(&mut HashMap<Slot, String>) -> T,
    ) -> Result<T, StoreError> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|error| StoreError::Unavailable(error.to_string()))?;

        Ok(f(&mut slots))
    }
}

impl OrderStore for MemoryStore {
    fn get(&self, slot: Slot) -> Result<Option<String>, StoreError> {
        self.with_slots(|slots| slots.get(&slot).cloned())
    }

    fn set(&self, slot: Slot, value: String) -> Result<(), StoreError> {
        self.with_slots(|slots| {
            slots.insert(slot, value);
        })
    }

    fn clear(&self, slot: Slot) -> Result<(), StoreError> {
        self.with_slots(|slots| {
            slots.remove(&slot);
        })
    }
}

/// Directory-backed store: one `<key>.json` file per slot.
///
/// Writes land in a temporary file beside the target and are renamed into
/// place, so readers see either the old record or the new one.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    /// Store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing a slot.
    pub fn path(&self, slot: Slot) -> PathBuf {
        self.dir.join(format!("{}.json", slot.key()))
    }

    fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
        move |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl OrderStore for FileStore {
    fn get(&self, slot: Slot) -> Result<Option<String>, StoreError> {
        let path = self.path(slot);

        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(Self::io_error(&path)(error)),
        }
    }

    fn set(&self, slot: Slot, value: String) -> Result<(), StoreError> {
        let path = self.path(slot);

        fs::create_dir_all(&self.dir).map_err(Self::io_error(&self.dir))?;

        let mut staged = NamedTempFile::new_in(&self.dir).map_err(Self::io_error(&self.dir))?;

        let staged_path = staged.path().to_path_buf();

        staged
            .write_all(value.as_bytes())
            .map_err(Self::io_error(&staged_path))?;

        staged
            .persist(&path)
            .map_err(|error| Self::io_error(&path)(error.error))?;

        Ok(())
    }

    fn clear(&self, slot: Slot) -> Result<(), StoreError> {
        let path = self.path(slot);

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(Self::io_error(&path)(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn slot_keys_match_browser_storage_keys() {
        assert_eq!(Slot::Order.key(), "orderData");
        assert_eq!(Slot::Failure.key(), "failureData");
    }

    #[test]
    fn memory_store_is_empty_before_any_write() -> TestResult {
        let store = MemoryStore::new();

        for slot in Slot::ALL {
            assert_eq!(store.get(slot)?, None);
        }

        Ok(())
    }

    #[test]
    fn memory_store_set_replaces_whole_value() -> TestResult {
        let store = MemoryStore::new();

        store.set(Slot::Order, "{\"a\":1}".to_string())?;
        store.set(Slot::Order, "{\"b\":2}".to_string())?;

        assert_eq!(store.get(Slot::Order)?.as_deref(), Some("{\"b\":2}"));
        assert_eq!(store.get(Slot::Failure)?, None);

        Ok(())
    }

    #[test]
    fn memory_store_clear_empties_only_that_slot() -> TestResult {
        let store = MemoryStore::new();

        store.set(Slot::Order, "order".to_string())?;
        store.set(Slot::Failure, "failure".to_string())?;
        store.clear(Slot::Failure)?;

        assert_eq!(store.get(Slot::Failure)?, None);
        assert_eq!(store.get(Slot::Order)?.as_deref(), Some("order"));

        Ok(())
    }

    #[test]
    fn read_record_reports_malformed_slot() -> TestResult {
        let store = MemoryStore::new();

        store.set(Slot::Order, "not json".to_string())?;

        assert!(matches!(
            store.read_order(),
            Err(StoreError::Decode {
                slot: Slot::Order,
                ..
            })
        ));

        Ok(())
    }

    #[test]
    fn read_record_on_empty_slot_is_none() -> TestResult {
        let store = MemoryStore::new();

        assert!(store.read_failure()?.is_none());

        Ok(())
    }

    #[test]
    fn write_record_sets_encoded_json_once() -> TestResult {
        let mut store = MockOrderStore::new();

        store
            .expect_set()
            .withf(|slot, value| *slot == Slot::Order && value == "[1,2,3]")
            .times(1)
            .returning(|_, _| Ok(()));

        store.write_record(Slot::Order, &[1, 2, 3])?;

        Ok(())
    }

    #[test]
    fn file_store_round_trips_and_clears() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileStore::new(dir.path().join("state"));

        assert_eq!(store.get(Slot::Order)?, None);

        store.set(Slot::Order, "first".to_string())?;
        store.set(Slot::Order, "second".to_string())?;

        assert_eq!(store.get(Slot::Order)?.as_deref(), Some("second"));
        assert!(store.path(Slot::Order).ends_with("orderData.json"));

        store.clear(Slot::Order)?;
        store.clear(Slot::Order)?;

        assert_eq!(store.get(Slot::Order)?, None);

        Ok(())
    }

    #[test]
    fn file_store_leaves_no_staging_files_behind() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileStore::new(dir.path());

        store.set(Slot::Failure, "x".to_string())?;

        let names: Vec<String> = fs::read_dir(dir.path())?
            .map(|entry| entry.map(|entry| entry.file_name().to_string_lossy().into_owned()))
            .collect::<Result<_, _>>()?;

        assert_eq!(names, ["failureData.json"]);

        Ok(())
    }
}
