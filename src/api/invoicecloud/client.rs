use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client as HttpClient;
use tracing::debug;

use super::envelope::{build_envelope, parse_response};
use super::models::{ApiError, ViewInvoiceResponse};

/// InvoiceCloud `CloudInvoicing` SOAP client
#[derive(Clone)]
pub struct InvoiceCloudClient {
    http_client: HttpClient,
    endpoint: String,
}

impl InvoiceCloudClient {
    pub const DEFAULT_ENDPOINT: &'static str =
        "https://www.invoicecloud.com/portal/webservices/CloudInvoicing.asmx";
    pub const VIEW_INVOICE_ACTION: &'static str =
        "https://www.invoicecloud.com/portal/webservices/CloudInvoicing/ViewInvoiceByInvoiceNumber";

    pub fn new() -> Self {
        Self::with_endpoint(Self::DEFAULT_ENDPOINT.to_string())
    }

    /// Create a client against another endpoint (proxies, tests)
    pub fn with_endpoint(endpoint: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            endpoint,
        }
    }

    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/xml; charset=utf-8"));
        headers.insert("SOAPAction", HeaderValue::from_static(Self::VIEW_INVOICE_ACTION));
        headers
    }

    /// POST ViewInvoiceByInvoiceNumber
    ///
    /// Inputs are embedded escaped; they are not validated here.
    ///
    /// # Returns
    /// * `Ok(ViewInvoiceResponse)` - whatever fields the response carried
    /// * `Err(ApiError)` - connection failure, non-2xx status, or an unparseable body
    pub async fn view_invoice_by_invoice_number(
        &self,
        biller_guid: &str,
        web_service_key: &str,
        invoice_number: &str,
    ) -> Result<ViewInvoiceResponse, ApiError> {
        let body = build_envelope(biller_guid, web_service_key, invoice_number);
        debug!("POST {} for invoice {}", self.endpoint, invoice_number);

        let response = self
            .http_client
            .post(&self.endpoint)
            .headers(Self::create_headers())
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ApiError::Connection(e.to_string())
                } else {
                    ApiError::RequestError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpError(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default().to_string(),
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::RequestError(format!("Failed to read response: {}", e)))?;

        parse_response(&text)
    }
}

impl Default for InvoiceCloudClient {
    fn default() -> Self {
        Self::new()
    }
}
