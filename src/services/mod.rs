pub mod batch_service;
pub mod credential_service;
pub mod export_service;
pub mod history_service;
pub mod lookup_service;
