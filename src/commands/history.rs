use super::{status_label, AppContext};
use crate::models::HistoryEntry;
use crate::utils::errors::AppError;
use crate::utils::format::{format_currency, format_local_date};

pub fn execute(ctx: &AppContext) -> Result<(), AppError> {
    let entries = ctx.history.list()?;
    println!("{}", render_history(&entries));
    Ok(())
}

/// Render entries in the order given (most recent first from the store)
pub fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No processing history available".to_string();
    }

    let mut blocks = Vec::with_capacity(entries.len());
    for entry in entries {
        let mut lines = Vec::new();
        match entry {
            HistoryEntry::Batch {
                count,
                success_count,
                failure_count,
                sample,
                timestamp,
            } => {
                lines.push(format!("Batch Processing  ({})", format_local_date(timestamp)));
                lines.push(format!("  Processed {} invoices", count));
                lines.push(format!("  Success: {}, Failed: {}", success_count, failure_count));
                if !sample.is_empty() {
                    lines.push("  Sample invoices:".to_string());
                }
                for result in sample {
                    let outcome = if result.success {
                        format!("${}", format_currency(&result.balance_due))
                    } else {
                        "Failed".to_string()
                    };
                    lines.push(format!("    Invoice #{}: {}", result.invoice_number, outcome));
                }
            }
            HistoryEntry::Single { result, timestamp } => {
                lines.push(format!(
                    "Single Invoice #{}  ({})",
                    result.invoice_number,
                    format_local_date(timestamp)
                ));
                lines.push(format!("  Status: {}", status_label(result)));
                if result.success {
                    lines.push(format!("  Balance Due: ${}", format_currency(&result.balance_due)));
                }
                if let Some(error) = result.error.as_deref().filter(|e| !e.is_empty()) {
                    lines.push(format!("  Error: {}", error));
                }
            }
        }
        blocks.push(lines.join("\n"));
    }

    blocks.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InvoiceResult;

    #[test]
    fn test_empty_history() {
        assert_eq!(render_history(&[]), "No processing history available");
    }

    #[test]
    fn test_renders_both_kinds() {
        let single = HistoryEntry::single(InvoiceResult::resolved("INV9", true, "2500.5", None));
        let batch = HistoryEntry::batch(&[
            InvoiceResult::resolved("A1", true, "1", None),
            InvoiceResult::failed("A2", "nope"),
        ]);

        let rendered = render_history(&[batch, single]);
        assert!(rendered.starts_with("Batch Processing"));
        assert!(rendered.contains("Processed 2 invoices"));
        assert!(rendered.contains("Success: 1, Failed: 1"));
        assert!(rendered.contains("Invoice #A1: $1.00"));
        assert!(rendered.contains("Invoice #A2: Failed"));
        assert!(rendered.contains("Single Invoice #INV9"));
        assert!(rendered.contains("Balance Due: $2,500.50"));
    }
}
