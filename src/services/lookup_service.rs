//! Lookup Service - the single-invoice lookup contract
//!
//! `InvoiceLookup::lookup_invoice` always resolves to an `InvoiceResult`.
//! Transport and service failures are folded into the result here so that
//! batch aggregation can count on one result per call.

use async_trait::async_trait;
use tracing::warn;

use crate::api::invoicecloud::{ApiError, InvoiceCloudClient, ViewInvoiceResponse};
use crate::models::InvoiceResult;
use crate::utils::is_valid_guid;

/// Anything that can resolve an invoice number to a result
#[async_trait]
pub trait InvoiceLookup: Send + Sync {
    async fn lookup_invoice(
        &self,
        biller_guid: &str,
        web_service_key: &str,
        invoice_number: &str,
    ) -> InvoiceResult;
}

#[async_trait]
impl InvoiceLookup for InvoiceCloudClient {
    async fn lookup_invoice(
        &self,
        biller_guid: &str,
        web_service_key: &str,
        invoice_number: &str,
    ) -> InvoiceResult {
        let outcome = self
            .view_invoice_by_invoice_number(biller_guid, web_service_key, invoice_number)
            .await;
        normalize_response(invoice_number, outcome)
    }
}

/// Inputs that may be sent to the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedInput<'a> {
    pub biller_guid: &'a str,
    pub web_service_key: &'a str,
    pub invoice_number: &'a str,
}

/// Gate for issuing a request: both ids must be GUIDs and the invoice number non-empty
pub fn validate_input<'a>(
    biller_guid: Option<&'a str>,
    web_service_key: Option<&'a str>,
    invoice_number: Option<&'a str>,
) -> Option<ValidatedInput<'a>> {
    let biller_guid = biller_guid.filter(|g| is_valid_guid(g))?;
    let web_service_key = web_service_key.filter(|k| is_valid_guid(k))?;
    let invoice_number = invoice_number.filter(|n| !n.is_empty())?;
    Some(ValidatedInput {
        biller_guid,
        web_service_key,
        invoice_number,
    })
}

/// Fold a service response (or failure) into a result
pub fn normalize_response(
    invoice_number: &str,
    outcome: Result<ViewInvoiceResponse, ApiError>,
) -> InvoiceResult {
    match outcome {
        Ok(ViewInvoiceResponse {
            success: Some(flag),
            balance_due: Some(balance),
            error_message,
        }) => InvoiceResult::resolved(
            invoice_number,
            flag.eq_ignore_ascii_case("true"),
            &balance,
            error_message,
        ),
        Ok(response) => {
            let message = response
                .error_message
                .unwrap_or_else(|| "Unknown error".to_string());
            InvoiceResult::failed(invoice_number, message)
        }
        Err(e) => {
            if e.is_connection() {
                warn!(
                    "Invoice service is unreachable; check network access to the endpoint: {}",
                    e
                );
            } else {
                warn!("Lookup for invoice {} failed: {}", invoice_number, e);
            }
            InvoiceResult::failed(invoice_number, format!("API connection failed: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const BILLER: &str = "11111111-1111-1111-1111-111111111111";
    const KEY: &str = "22222222-2222-2222-2222-222222222222";

    #[test]
    fn test_validate_input() {
        assert!(validate_input(Some(BILLER), Some(KEY), Some("INV1")).is_some());
        assert!(validate_input(Some(BILLER), Some(KEY), Some("")).is_none());
        assert!(validate_input(Some(BILLER), Some(KEY), None).is_none());
        assert!(validate_input(Some("bad"), Some(KEY), Some("INV1")).is_none());
        assert!(validate_input(Some(BILLER), Some("bad"), Some("INV1")).is_none());
        assert!(validate_input(None, Some(KEY), Some("INV1")).is_none());
    }

    #[test]
    fn test_normalize_success() {
        let response = ViewInvoiceResponse {
            success: Some("True".to_string()),
            balance_due: Some("42.1".to_string()),
            error_message: None,
        };
        let result = normalize_response("INV1", Ok(response));
        assert!(result.success);
        assert_eq!(result.balance_due, "42.10");
        assert_eq!(result.error, None);
    }

    #[test]
    fn test_normalize_service_reported_failure() {
        let response = ViewInvoiceResponse {
            success: Some("false".to_string()),
            balance_due: Some("0".to_string()),
            error_message: Some("Invoice is closed".to_string()),
        };
        let result = normalize_response("INV1", Ok(response));
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Invoice is closed"));
    }

    #[test]
    fn test_normalize_missing_fields() {
        let response = ViewInvoiceResponse {
            success: Some("true".to_string()),
            balance_due: None,
            error_message: None,
        };
        let result = normalize_response("INV1", Ok(response));
        assert!(!result.success);
        assert_eq!(result.balance_due, "0.00");
        assert_eq!(result.error.as_deref(), Some("Unknown error"));

        let response = ViewInvoiceResponse {
            error_message: Some("Bad key".to_string()),
            ..Default::default()
        };
        let result = normalize_response("INV1", Ok(response));
        assert_eq!(result.error.as_deref(), Some("Bad key"));
    }

    #[test]
    fn test_normalize_transport_error() {
        let result = normalize_response(
            "INV1",
            Err(ApiError::HttpError(503, "Service Unavailable".to_string())),
        );
        assert!(!result.success);
        assert_eq!(result.balance_due, "0.00");
        assert_eq!(
            result.error.as_deref(),
            Some("API connection failed: Server returned: 503 Service Unavailable")
        );
    }

    #[tokio::test]
    async fn test_client_lookup_never_fails_on_transport_errors() {
        let unreachable = InvoiceCloudClient::with_endpoint("http://127.0.0.1:1/".to_string());
        let result = unreachable.lookup_invoice(BILLER, KEY, "INV1").await;
        assert_eq!(result.invoice_number, "INV1");
        assert!(!result.success);
        assert!(result.error.unwrap().starts_with("API connection failed:"));

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not xml at all <"))
            .mount(&server)
            .await;
        let client = InvoiceCloudClient::with_endpoint(server.uri());
        let result = client.lookup_invoice(BILLER, KEY, "INV2").await;
        assert!(!result.success);
        assert_eq!(result.balance_due, "0.00");
    }

    #[tokio::test]
    async fn test_client_lookup_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"><soap:Body>
                   <R><Success>true</Success><BalanceDue>1234.5</BalanceDue></R>
                   </soap:Body></soap:Envelope>"#,
            ))
            .mount(&server)
            .await;

        let client = InvoiceCloudClient::with_endpoint(server.uri());
        let result = client.lookup_invoice(BILLER, KEY, "INV3").await;
        assert!(result.success);
        assert_eq!(result.invoice_number, "INV3");
        assert_eq!(result.balance_due, "1234.50");
    }
}
