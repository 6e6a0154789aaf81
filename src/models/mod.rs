//! Data models for invoice lookups
//!
//! `InvoiceResult` is the one record every lookup path produces, whether the
//! request succeeded, failed in transport, or never left the input gate.
//! `HistoryEntry` is what gets persisted after a run completes.

pub mod invoice;
pub mod history;
pub mod credentials;

pub use invoice::InvoiceResult;
pub use history::HistoryEntry;
pub use credentials::Credentials;
