use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use super::{balance_label, status_label, AppContext};
use crate::models::InvoiceResult;
use crate::services::batch_service::{process_batch, BatchRunner};
use crate::utils::errors::AppError;
use crate::utils::format::format_file_size;
use crate::utils::Table;

/// Rows shown in the terminal summary; the export file has all of them
const DISPLAY_LIMIT: usize = 5;

/// Uploads must be `.csv` files
pub fn ensure_csv_file(file: &Path) -> Result<(), AppError> {
    let is_csv = file
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if is_csv {
        Ok(())
    } else {
        Err(AppError::InvalidInput("Please select a valid CSV file".to_string()))
    }
}

pub async fn execute(ctx: &AppContext, file: &Path) -> Result<(), AppError> {
    ensure_csv_file(file)?;
    let csv = fs::read_to_string(file)
        .map_err(|e| AppError::io(format!("Failed to read {}", file.display()), e))?;
    info!("Loaded {} ({})", file.display(), format_file_size(csv.len() as u64));

    let runner = BatchRunner::new(Arc::new(ctx.client.clone()), ctx.config.stagger);
    let report = process_batch(&runner, &ctx.history, &ctx.output_dir, &csv, |_| {}).await?;

    println!("{}", render_batch_results(&report.results));
    let export_path = report.export?;
    println!("Results saved to {}", export_path.display());
    report.history?;
    Ok(())
}

pub fn render_batch_results(results: &[InvoiceResult]) -> String {
    let success_count = results.iter().filter(|r| r.success).count();

    let mut output = format!(
        "Processing Results\nTotal Processed: {}\nSuccessful: {}\nFailed: {}\n\n",
        results.len(),
        success_count,
        results.len() - success_count
    );

    let mut table = Table::new(&["Invoice", "Status", "Balance Due", "Error"]);
    for result in results.iter().take(DISPLAY_LIMIT) {
        table.add_row(vec![
            result.invoice_number.clone(),
            status_label(result).to_string(),
            balance_label(result),
            result.error.clone().unwrap_or_default(),
        ]);
    }
    output.push_str(&table.render());

    if results.len() > DISPLAY_LIMIT {
        output.push_str(&format!(
            "+ {} more results (see exported CSV)\n",
            results.len() - DISPLAY_LIMIT
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_and_overflow_line() {
        let mut results: Vec<InvoiceResult> = (0..6)
            .map(|n| InvoiceResult::resolved(&format!("INV{}", n), true, "10", None))
            .collect();
        results.push(InvoiceResult::invalid_input(None));

        let rendered = render_batch_results(&results);
        assert!(rendered.contains("Total Processed: 7"));
        assert!(rendered.contains("Successful: 6"));
        assert!(rendered.contains("Failed: 1"));
        assert!(rendered.contains("INV4"));
        assert!(!rendered.contains("INV5"));
        assert!(rendered.ends_with("+ 2 more results (see exported CSV)\n"));
    }

    #[test]
    fn test_only_csv_files_are_accepted() {
        assert!(ensure_csv_file(Path::new("invoices.csv")).is_ok());
        assert!(ensure_csv_file(Path::new("/tmp/INVOICES.CSV")).is_ok());

        for path in ["invoices.txt", "invoices", "csv", "invoices.csv.bak"] {
            let err = ensure_csv_file(Path::new(path)).unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)));
            assert_eq!(err.to_string(), "Please select a valid CSV file");
        }
    }

    #[test]
    fn test_small_batch_has_no_overflow_line() {
        let rendered = render_batch_results(&[InvoiceResult::failed("INV1", "boom")]);
        assert!(rendered.contains("boom"));
        assert!(!rendered.contains("more results"));
    }
}
