use tracing::info;

use super::{balance_label, status_label, AppContext};
use crate::models::{Credentials, HistoryEntry, InvoiceResult};
use crate::services::credential_service;
use crate::services::lookup_service::InvoiceLookup;
use crate::utils::errors::AppError;
use crate::utils::format::format_local_date;
use crate::utils::is_valid_guid;

pub struct LookupArgs {
    pub biller_guid: Option<String>,
    pub web_service_key: Option<String>,
    pub invoice_number: String,
    pub save_credentials: bool,
}

/// Resolve the form fields, falling back to saved credentials, and check them
/// before anything is sent
fn resolve_credentials(ctx: &AppContext, args: &LookupArgs) -> Result<Credentials, AppError> {
    let (saved_biller, saved_key) = credential_service::load_credentials(ctx.store.as_ref())?;

    let biller_guid = args.biller_guid.clone().or(saved_biller).unwrap_or_default();
    let web_service_key = args.web_service_key.clone().or(saved_key).unwrap_or_default();

    if biller_guid.trim().is_empty()
        || web_service_key.trim().is_empty()
        || args.invoice_number.trim().is_empty()
    {
        return Err(AppError::InvalidInput("Please fill in all fields".to_string()));
    }
    if !is_valid_guid(&biller_guid) || !is_valid_guid(&web_service_key) {
        return Err(AppError::InvalidInput("Please enter valid GUIDs".to_string()));
    }

    Ok(Credentials {
        biller_guid,
        web_service_key,
    })
}

pub async fn execute(ctx: &AppContext, args: LookupArgs) -> Result<(), AppError> {
    let credentials = resolve_credentials(ctx, &args)?;

    if args.save_credentials {
        credential_service::save_credentials(ctx.store.as_ref(), &credentials)?;
        info!("Credentials saved");
    }

    let result = ctx
        .client
        .lookup_invoice(
            &credentials.biller_guid,
            &credentials.web_service_key,
            args.invoice_number.trim(),
        )
        .await;

    println!("{}", render_single_result(&result));
    ctx.history.append(HistoryEntry::single(result))?;
    Ok(())
}

pub fn render_single_result(result: &InvoiceResult) -> String {
    let mut lines = vec![
        format!("Invoice #{}  [{}]", result.invoice_number, status_label(result)),
        format!(
            "Status: {}",
            if result.success { "Successfully processed" } else { "Processing failed" }
        ),
    ];
    if result.success {
        lines.push(format!("Balance Due: {}", balance_label(result)));
    }
    if let Some(error) = result.error.as_deref().filter(|e| !e.is_empty()) {
        lines.push(format!("Error: {}", error));
    }
    lines.push(format!("Processed: {}", format_local_date(&result.timestamp)));
    lines.join("\n")
}
