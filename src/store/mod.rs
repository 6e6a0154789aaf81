//! Process-wide key-value persistence
//!
//! Everything the tool remembers between runs (saved credentials and the
//! history log) goes through `KeyValueStore`, so tests can swap the on-disk
//! store for an in-memory one.

use crate::utils::errors::StoreError;

pub mod file_store;
#[cfg(test)]
pub mod memory_store;

pub use file_store::FileStore;
#[cfg(test)]
pub use memory_store::MemoryStore;

/// Keys used in the store
pub mod keys {
    pub const BILLER_GUID: &str = "billerGUID";
    pub const WEB_SERVICE_KEY: &str = "webServiceKey";
    pub const INVOICE_HISTORY: &str = "invoiceHistory";
}

/// String-to-string persistent map
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
