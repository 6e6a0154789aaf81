//! Batch Service - CSV-driven multi-row lookups
//!
//! Row `i` is dispatched `i × stagger` after the batch starts, each on its own
//! task, with no cap on how many are in flight. Invalid rows resolve at once.
//! Results are gathered in completion order by a single aggregating loop;
//! completion order generally differs from row order.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use crate::models::{HistoryEntry, InvoiceResult};
use crate::services::export_service;
use crate::services::history_service::HistoryStore;
use crate::services::lookup_service::{validate_input, InvoiceLookup};
use crate::utils::csv_rows::{parse_rows, CsvRow};
use crate::utils::errors::{AppError, BatchError, HistoryError};

pub const DEFAULT_STAGGER: Duration = Duration::from_millis(300);

/// Snapshot reported after every completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    pub completed: usize,
    pub total: usize,
}

impl BatchProgress {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }
}

/// Running tally for one batch, owned by the aggregating loop
#[derive(Debug)]
pub struct BatchState {
    total: usize,
    completed: usize,
    results: Vec<InvoiceResult>,
}

impl BatchState {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            completed: 0,
            results: Vec::with_capacity(total),
        }
    }

    pub fn record(&mut self, result: InvoiceResult) -> BatchProgress {
        self.results.push(result);
        self.completed += 1;
        self.progress()
    }

    pub fn progress(&self) -> BatchProgress {
        BatchProgress {
            completed: self.completed,
            total: self.total,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed >= self.total
    }

    pub fn into_results(self) -> Vec<InvoiceResult> {
        self.results
    }
}

/// Outcome of a finished batch. Results are kept even when logging or
/// exporting them failed.
#[derive(Debug)]
pub struct BatchReport {
    pub results: Vec<InvoiceResult>,
    pub history: Result<(), HistoryError>,
    pub export: Result<PathBuf, AppError>,
}

pub struct BatchRunner {
    lookup: Arc<dyn InvoiceLookup>,
    stagger: Duration,
}

impl BatchRunner {
    pub fn new(lookup: Arc<dyn InvoiceLookup>, stagger: Duration) -> Self {
        Self { lookup, stagger }
    }

    /// `start + index × stagger`; rows past the representable range go out immediately
    fn dispatch_time(&self, start: Instant, index: usize) -> Instant {
        u32::try_from(index)
            .ok()
            .and_then(|i| self.stagger.checked_mul(i))
            .and_then(|offset| start.checked_add(offset))
            .unwrap_or_else(|| {
                warn!("Stagger offset for row {} overflows; dispatching now", index + 1);
                start
            })
    }

    /// Look up every row of `csv`, reporting progress after each completion.
    /// Returns one result per non-blank line, in completion order.
    pub async fn run<F>(&self, csv: &str, mut on_progress: F) -> Result<Vec<InvoiceResult>, BatchError>
    where
        F: FnMut(BatchProgress),
    {
        let rows: Vec<CsvRow> = parse_rows(csv).collect();
        if rows.is_empty() {
            return Err(BatchError::EmptyCsv);
        }

        let total = rows.len();
        info!("Starting batch of {} rows", total);

        let (tx, mut rx) = mpsc::unbounded_channel::<InvoiceResult>();
        let start = Instant::now();

        for (index, row) in rows.into_iter().enumerate() {
            let input = validate_input(
                row.biller_guid.as_deref(),
                row.web_service_key.as_deref(),
                row.invoice_number.as_deref(),
            );

            let Some(input) = input else {
                debug!("Row {} failed validation", index + 1);
                // Receiver is alive until every row has reported
                let _ = tx.send(InvoiceResult::invalid_input(row.invoice_number.as_deref()));
                continue;
            };

            let biller_guid = input.biller_guid.to_string();
            let web_service_key = input.web_service_key.to_string();
            let invoice_number = input.invoice_number.to_string();
            let dispatch_at = self.dispatch_time(start, index);
            let lookup = Arc::clone(&self.lookup);
            let tx = tx.clone();

            tokio::spawn(async move {
                sleep_until(dispatch_at).await;
                debug!("Dispatching row {} (invoice {})", index + 1, invoice_number);

                let task_invoice = invoice_number.clone();
                let handle = tokio::spawn(async move {
                    lookup
                        .lookup_invoice(&biller_guid, &web_service_key, &task_invoice)
                        .await
                });
                let result = match handle.await {
                    Ok(result) => result,
                    Err(e) => InvoiceResult::failed(&invoice_number, format!("Lookup task failed: {}", e)),
                };
                let _ = tx.send(result);
            });
        }
        drop(tx);

        let mut state = BatchState::new(total);
        while let Some(result) = rx.recv().await {
            let progress = state.record(result);
            info!(
                "Processed {}/{} ({:.0}%)",
                progress.completed,
                progress.total,
                progress.percent()
            );
            on_progress(progress);
            if state.is_complete() {
                break;
            }
        }

        Ok(state.into_results())
    }
}

/// Run a batch to completion, then log history and write the export file once each.
/// Only an empty upload is an error; history and export failures are carried
/// in the report next to the results.
pub async fn process_batch<F>(
    runner: &BatchRunner,
    history: &HistoryStore,
    output_dir: &Path,
    csv: &str,
    on_progress: F,
) -> Result<BatchReport, BatchError>
where
    F: FnMut(BatchProgress),
{
    let results = runner.run(csv, on_progress).await?;

    let history_outcome = history.append(HistoryEntry::batch(&results));
    if let Err(e) = &history_outcome {
        warn!("Failed to save batch to history: {}", e);
    }

    let export = export_service::write_results(output_dir, &results, chrono::Utc::now())
        .map_err(|e| AppError::io(format!("Failed to write results to {}", output_dir.display()), e));
    match &export {
        Ok(path) => info!("Results written to {}", path.display()),
        Err(e) => warn!("{}", e),
    }

    Ok(BatchReport {
        results,
        history: history_outcome,
        export,
    })
}
