//! Invoice lookup result model

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Error text for rows rejected before any request is made
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input data";

/// Balance reported for every failed lookup
pub const ZERO_BALANCE: &str = "0.00";

/// Outcome of looking up a single invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResult {
    pub invoice_number: String,
    pub success: bool,
    pub balance_due: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl InvoiceResult {
    /// A successful (or service-reported) result
    pub fn resolved(
        invoice_number: &str,
        success: bool,
        balance_due: &str,
        error: Option<String>,
    ) -> Self {
        Self {
            invoice_number: invoice_number.to_string(),
            success,
            balance_due: normalize_amount(balance_due),
            error,
            timestamp: Utc::now(),
        }
    }

    /// A failed result carrying an error description
    pub fn failed(invoice_number: &str, error: impl Into<String>) -> Self {
        Self {
            invoice_number: invoice_number.to_string(),
            success: false,
            balance_due: ZERO_BALANCE.to_string(),
            error: Some(error.into()),
            timestamp: Utc::now(),
        }
    }

    /// Result for a row that failed input validation.
    /// A missing or empty invoice number is reported as `Invalid`.
    pub fn invalid_input(invoice_number: Option<&str>) -> Self {
        let number = match invoice_number {
            Some(n) if !n.is_empty() => n,
            _ => "Invalid",
        };
        Self::failed(number, INVALID_INPUT_MESSAGE)
    }

    /// ISO-8601 timestamp with millisecond precision, e.g. `2024-01-01T00:00:00.000Z`
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Persist timestamps as `2024-01-01T00:00:00.000Z`
pub fn serialize_iso_millis<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Render a decimal amount with two fractional digits.
/// Values that are not numbers are kept verbatim.
fn normalize_amount(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => format!("{:.2}", value),
        _ => trimmed.to_string(),
    }
}
