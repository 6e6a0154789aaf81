//! Runtime configuration read from the environment (after `.env` is loaded)

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;

use crate::api::invoicecloud::InvoiceCloudClient;
use crate::services::batch_service::DEFAULT_STAGGER;
use crate::utils::errors::ConfigError;

pub const ENV_SERVICE_URL: &str = "INVOICE_SERVICE_URL";
pub const ENV_STAGGER_MS: &str = "BATCH_STAGGER_MS";
pub const ENV_DATA_DIR: &str = "INVOICE_DATA_DIR";
pub const ENV_OUTPUT_DIR: &str = "INVOICE_OUTPUT_DIR";

/// Largest accepted `BATCH_STAGGER_MS` (one minute per row)
pub const MAX_STAGGER_MS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub service_url: String,
    pub stagger: Duration,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let stagger = match var(ENV_STAGGER_MS) {
            Some(raw) => {
                let ms: u64 = raw
                    .parse()
                    .ok()
                    .filter(|ms| *ms <= MAX_STAGGER_MS)
                    .ok_or_else(|| ConfigError::InvalidValue {
                        name: ENV_STAGGER_MS,
                        value: raw.clone(),
                    })?;
                Duration::from_millis(ms)
            }
            None => DEFAULT_STAGGER,
        };

        Ok(Self {
            service_url: var(ENV_SERVICE_URL)
                .unwrap_or_else(|| InvoiceCloudClient::DEFAULT_ENDPOINT.to_string()),
            stagger,
            data_dir: var(ENV_DATA_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(default_data_dir),
            output_dir: var(ENV_OUTPUT_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        })
    }
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "invoicecloud", "invoice-lookup")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.service_url, InvoiceCloudClient::DEFAULT_ENDPOINT);
        assert_eq!(config.stagger, Duration::from_millis(300));
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            (ENV_SERVICE_URL, "http://localhost:8080/svc.asmx"),
            (ENV_STAGGER_MS, " 50 "),
            (ENV_DATA_DIR, "/tmp/il-data"),
            (ENV_OUTPUT_DIR, ""),
        ])
        .unwrap();
        assert_eq!(config.service_url, "http://localhost:8080/svc.asmx");
        assert_eq!(config.stagger, Duration::from_millis(50));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/il-data"));
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_bad_stagger_is_rejected() {
        let err = config_from(&[(ENV_STAGGER_MS, "fast")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for BATCH_STAGGER_MS: fast");
    }

    #[test]
    fn test_stagger_is_capped() {
        let config = config_from(&[(ENV_STAGGER_MS, "60000")]).unwrap();
        assert_eq!(config.stagger, Duration::from_secs(60));

        let err = config_from(&[(ENV_STAGGER_MS, "60001")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for BATCH_STAGGER_MS: 60001");
        assert!(config_from(&[(ENV_STAGGER_MS, "18446744073709551615")]).is_err());
    }
}
