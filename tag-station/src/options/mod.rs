//! Option catalog: in-memory store plus durable backends

pub mod storage;
pub mod store;

pub use storage::{
    CATALOG_KEY, CatalogStorage, CatalogStorageError, CatalogStorageResult, MemoryCatalogStorage,
    RedbCatalogStorage,
};
pub use store::OptionsStore;
