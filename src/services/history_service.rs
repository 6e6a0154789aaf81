//! History Service - capped log of completed runs
//!
//! Entries are stored oldest-first as a JSON array under `invoiceHistory`.
//! Once the log exceeds `MAX_HISTORY_ENTRIES` the oldest entries are dropped.

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::models::HistoryEntry;
use crate::store::{keys, KeyValueStore};
use crate::utils::errors::{HistoryError, StoreError};

pub const MAX_HISTORY_ENTRIES: usize = 50;

pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
    // Serializes read-modify-write in `append`
    write_lock: Mutex<()>,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn append(&self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| HistoryError::Store(StoreError::Poisoned))?;

        let mut entries = self.load()?;
        entries.push(entry);
        if entries.len() > MAX_HISTORY_ENTRIES {
            let excess = entries.len() - MAX_HISTORY_ENTRIES;
            entries.drain(..excess);
        }

        let json = serde_json::to_string(&entries)?;
        self.store.set(keys::INVOICE_HISTORY, &json)?;
        debug!("History now holds {} entries", entries.len());
        Ok(())
    }

    /// All entries, most recent first
    pub fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let mut entries = self.load()?;
        entries.reverse();
        Ok(entries)
    }

    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        match self.store.get(keys::INVOICE_HISTORY)? {
            Some(json) if !json.trim().is_empty() => Ok(serde_json::from_str(&json)?),
            _ => Ok(Vec::new()),
        }
    }
}
