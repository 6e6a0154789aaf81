//! Command-line handlers. Each renders its output to stdout; logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use crate::api::invoicecloud::InvoiceCloudClient;
use crate::config::AppConfig;
use crate::models::InvoiceResult;
use crate::services::history_service::HistoryStore;
use crate::store::{FileStore, KeyValueStore};
use crate::utils::errors::AppError;
use crate::utils::format::format_currency;

pub mod batch;
pub mod history;
pub mod lookup;
pub mod template;

/// Shared handles for a command invocation
pub struct AppContext {
    pub store: Arc<dyn KeyValueStore>,
    pub history: HistoryStore,
    pub client: InvoiceCloudClient,
    pub output_dir: PathBuf,
    pub config: AppConfig,
}

impl AppContext {
    pub fn new(config: AppConfig, output_dir: Option<PathBuf>) -> Result<Self, AppError> {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.data_dir)?);
        Ok(Self {
            history: HistoryStore::new(Arc::clone(&store)),
            store,
            client: InvoiceCloudClient::with_endpoint(config.service_url.clone()),
            output_dir: output_dir.unwrap_or_else(|| config.output_dir.clone()),
            config,
        })
    }
}

pub(crate) fn status_label(result: &InvoiceResult) -> &'static str {
    if result.success {
        "Success"
    } else {
        "Failed"
    }
}

/// Balance cell: formatted amount for successes, blank otherwise
pub(crate) fn balance_label(result: &InvoiceResult) -> String {
    if result.success {
        format!("${}", format_currency(&result.balance_due))
    } else {
        String::new()
    }
}
