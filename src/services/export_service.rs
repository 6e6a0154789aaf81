//! Export Service - result CSV and upload template files

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::models::InvoiceResult;
use crate::utils::format::format_filename_timestamp;

pub const RESULTS_HEADER: &str = "Invoice Number,Success,Balance Due,Error Message,Timestamp";

pub const TEMPLATE_FILE_NAME: &str = "invoice_template.csv";

const TEMPLATE_CONTENT: &str = "BillerGUID,WebServiceKey,InvoiceNumber\n\
xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx,xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx,INV12345\n\
xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx,xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx,INV67890\n";

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Serialize results: invoice number and error quoted, everything else bare
pub fn to_csv(results: &[InvoiceResult]) -> String {
    let mut csv = String::from(RESULTS_HEADER);
    csv.push('\n');

    for result in results {
        let error = match result.error.as_deref() {
            Some(e) if !e.is_empty() => quoted(e),
            _ => String::new(),
        };
        let row = [
            quoted(&result.invoice_number),
            result.success.to_string(),
            result.balance_due.clone(),
            error,
            result.timestamp_iso(),
        ];
        csv.push_str(&row.join(","));
        csv.push('\n');
    }

    csv
}

pub fn results_file_name(now: DateTime<Utc>) -> String {
    format!("invoice_results_{}.csv", format_filename_timestamp(&now))
}

/// Write `invoice_results_<timestamp>.csv` into `dir` and return its path
pub fn write_results(dir: &Path, results: &[InvoiceResult], now: DateTime<Utc>) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(results_file_name(now));
    fs::write(&path, to_csv(results))?;
    Ok(path)
}

/// Write the upload template into `dir` and return its path
pub fn write_template(dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(TEMPLATE_FILE_NAME);
    fs::write(&path, TEMPLATE_CONTENT)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_new_year(mut result: InvoiceResult) -> InvoiceResult {
        result.timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        result
    }

    #[test]
    fn test_to_csv_header_and_success_row() {
        let mut result = at_new_year(InvoiceResult::resolved("INV1", true, "12.34", None));
        result.error = Some(String::new());

        let csv = to_csv(&[result]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Invoice Number,Success,Balance Due,Error Message,Timestamp");
        assert_eq!(lines[1], "\"INV1\",true,12.34,,2024-01-01T00:00:00.000Z");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_to_csv_quotes_errors() {
        let result = at_new_year(InvoiceResult::failed("INV2", "Server said \"no\", twice"));
        let csv = to_csv(&[result]);
        assert_eq!(
            csv.lines().nth(1),
            Some("\"INV2\",false,0.00,\"Server said \"\"no\"\", twice\",2024-01-01T00:00:00.000Z")
        );
    }

    #[test]
    fn test_to_csv_empty_results_is_header_only() {
        assert_eq!(to_csv(&[]), format!("{}\n", RESULTS_HEADER));
    }

    #[test]
    fn test_write_results_and_template() {
        let dir = tempfile::tempdir().unwrap();
        let now = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        let results = vec![InvoiceResult::invalid_input(None)];

        let path = write_results(dir.path(), &results, now).unwrap();
        assert_eq!(path.file_name().unwrap(), "invoice_results_20240506070809.csv");
        assert_eq!(fs::read_to_string(&path).unwrap(), to_csv(&results));

        let template = write_template(dir.path()).unwrap();
        let content = fs::read_to_string(template).unwrap();
        assert!(content.starts_with("BillerGUID,WebServiceKey,InvoiceNumber\n"));
        assert_eq!(content.lines().count(), 3);
    }
}
