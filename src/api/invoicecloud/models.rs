/// Fields of interest in a `ViewInvoiceByInvoiceNumber` response.
/// Each is `None` when the element is absent or has no text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewInvoiceResponse {
    pub success: Option<String>,
    pub balance_due: Option<String>,
    pub error_message: Option<String>,
}

/// Failure talking to the InvoiceCloud service
#[derive(Debug, Clone)]
pub enum ApiError {
    /// Could not reach the service at all
    Connection(String),
    /// Request failed after connecting (timeout, body read, ...)
    RequestError(String),
    /// Non-2xx status
    HttpError(u16, String),
    /// Response body is not a well-formed XML document
    ParseError(String),
}

impl ApiError {
    pub fn is_connection(&self) -> bool {
        matches!(self, ApiError::Connection(_))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Connection(msg) => write!(f, "Failed to connect: {}", msg),
            ApiError::RequestError(msg) => write!(f, "Request failed: {}", msg),
            ApiError::HttpError(code, reason) => write!(f, "Server returned: {} {}", code, reason),
            ApiError::ParseError(msg) => write!(f, "Invalid XML response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}
