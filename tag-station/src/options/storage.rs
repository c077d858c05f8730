//! Catalog storage backends
//!
//! The whole catalog lives in one slot as JSON bytes. The slot key carries
//! a schema version so an incompatible layout can move to a new key.

use redb::{Database, ReadableDatabase, TableDefinition};
use shared::error::AppError;
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Catalog table: key = slot name, value = JSON
const CATALOG_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("catalog");

/// Slot holding the current catalog schema
pub const CATALOG_KEY: &str = "disposal_options_v2";

#[derive(Debug, Error)]
pub enum CatalogStorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Storage lock poisoned")]
    Poisoned,
}

pub type CatalogStorageResult<T> = Result<T, CatalogStorageError>;

impl From<CatalogStorageError> for AppError {
    fn from(err: CatalogStorageError) -> Self {
        AppError::storage(err.to_string())
    }
}

/// Single-slot durable storage for the serialized catalog
pub trait CatalogStorage: Send + Sync {
    /// Read the slot; `None` when nothing was ever written
    fn read(&self) -> CatalogStorageResult<Option<Vec<u8>>>;

    /// Replace the slot contents
    fn write(&self, bytes: &[u8]) -> CatalogStorageResult<()>;
}

/// redb-backed catalog storage
#[derive(Clone)]
pub struct RedbCatalogStorage {
    db: Arc<Database>,
}

impl RedbCatalogStorage {
    /// Open or create database
    pub fn open(path: impl AsRef<Path>) -> CatalogStorageResult<Self> {
        Self::init(Database::create(path)?)
    }

    /// Open in-memory database
    pub fn open_in_memory() -> CatalogStorageResult<Self> {
        Self::init(Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?)
    }

    fn init(db: Database) -> CatalogStorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(CATALOG_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl CatalogStorage for RedbCatalogStorage {
    fn read(&self) -> CatalogStorageResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CATALOG_TABLE)?;
        Ok(table.get(CATALOG_KEY)?.map(|guard| guard.value().to_vec()))
    }

    fn write(&self, bytes: &[u8]) -> CatalogStorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(CATALOG_TABLE)?;
            table.insert(CATALOG_KEY, bytes)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

/// In-process storage
///
/// Clones share the slot, so a test can keep a handle, inspect what was
/// written and hand a second clone to a "restarted" store.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalogStorage {
    slot: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MemoryCatalogStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with raw bytes
    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(bytes.into()))),
        }
    }

    /// Copy of the current slot contents
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl CatalogStorage for MemoryCatalogStorage {
    fn read(&self) -> CatalogStorageResult<Option<Vec<u8>>> {
        let slot = self.slot.lock().map_err(|_| CatalogStorageError::Poisoned)?;
        Ok(slot.clone())
    }

    fn write(&self, bytes: &[u8]) -> CatalogStorageResult<()> {
        let mut slot = self.slot.lock().map_err(|_| CatalogStorageError::Poisoned)?;
        *slot = Some(bytes.to_vec());
        Ok(())
    }
}
