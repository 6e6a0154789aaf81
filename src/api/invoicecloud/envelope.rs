//! SOAP envelope construction and response parsing for
//! `ViewInvoiceByInvoiceNumber`

use roxmltree::{Document, Node};

use super::models::{ApiError, ViewInvoiceResponse};

pub const SERVICE_NAMESPACE: &str =
    "https://www.invoicecloud.com/portal/webservices/CloudInvoicing/";

/// Escape a value for use as XML element text
pub fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn build_envelope(biller_guid: &str, web_service_key: &str, invoice_number: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema" xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <ViewInvoiceByInvoiceNumber xmlns="{ns}">
      <Req>
        <BillerGUID>{biller}</BillerGUID>
        <WebServiceKey>{key}</WebServiceKey>
        <InvoiceNumber>{invoice}</InvoiceNumber>
      </Req>
    </ViewInvoiceByInvoiceNumber>
  </soap:Body>
</soap:Envelope>"#,
        ns = SERVICE_NAMESPACE,
        biller = escape_xml(biller_guid),
        key = escape_xml(web_service_key),
        invoice = escape_xml(invoice_number),
    )
}

/// Pull `Success`, `BalanceDue` and `ErrorMessage` out of a response body.
/// Elements are matched by local name anywhere in the document.
pub fn parse_response(body: &str) -> Result<ViewInvoiceResponse, ApiError> {
    let doc = Document::parse(body).map_err(|e| ApiError::ParseError(e.to_string()))?;

    Ok(ViewInvoiceResponse {
        success: first_text(&doc, "Success"),
        balance_due: first_text(&doc, "BalanceDue"),
        error_message: first_text(&doc, "ErrorMessage"),
    })
}

fn first_text(doc: &Document, local_name: &str) -> Option<String> {
    let node = doc
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == local_name)?;
    let text = text_content(node);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn text_content(node: Node) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}
