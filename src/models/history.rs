//! History log models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::invoice::serialize_iso_millis;
use super::InvoiceResult;

/// Number of results kept as a sample on batch entries
pub const BATCH_SAMPLE_SIZE: usize = 3;

/// One completed run, as persisted under `invoiceHistory`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HistoryEntry {
    /// A single invoice lookup
    Single {
        #[serde(rename = "data")]
        result: InvoiceResult,
        #[serde(serialize_with = "serialize_iso_millis")]
        timestamp: DateTime<Utc>,
    },
    /// Summary of a batch run
    #[serde(rename_all = "camelCase")]
    Batch {
        count: usize,
        success_count: usize,
        failure_count: usize,
        sample: Vec<InvoiceResult>,
        #[serde(serialize_with = "serialize_iso_millis")]
        timestamp: DateTime<Utc>,
    },
}

impl HistoryEntry {
    pub fn single(result: InvoiceResult) -> Self {
        HistoryEntry::Single {
            result,
            timestamp: Utc::now(),
        }
    }

    /// Summarize a batch: totals plus the first few results in list order
    pub fn batch(results: &[InvoiceResult]) -> Self {
        let success_count = results.iter().filter(|r| r.success).count();
        HistoryEntry::Batch {
            count: results.len(),
            success_count,
            failure_count: results.len() - success_count,
            sample: results.iter().take(BATCH_SAMPLE_SIZE).cloned().collect(),
            timestamp: Utc::now(),
        }
    }
}
