//! Saved service credentials

/// Biller GUID and web service key as entered by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub biller_guid: String,
    pub web_service_key: String,
}
