pub mod client;
pub mod envelope;
pub mod models;

pub use client::InvoiceCloudClient;
pub use models::{ApiError, ViewInvoiceResponse};
