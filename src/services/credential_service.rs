//! Saved credential handling. Values are stored as entered, unencrypted.

use crate::models::Credentials;
use crate::store::{keys, KeyValueStore};
use crate::utils::errors::StoreError;

pub fn save_credentials(store: &dyn KeyValueStore, credentials: &Credentials) -> Result<(), StoreError> {
    store.set(keys::BILLER_GUID, &credentials.biller_guid)?;
    store.set(keys::WEB_SERVICE_KEY, &credentials.web_service_key)?;
    Ok(())
}

/// Load whatever was saved; either half may be missing
pub fn load_credentials(store: &dyn KeyValueStore) -> Result<(Option<String>, Option<String>), StoreError> {
    let biller = store.get(keys::BILLER_GUID)?.filter(|v| !v.is_empty());
    let key = store.get(keys::WEB_SERVICE_KEY)?.filter(|v| !v.is_empty());
    Ok((biller, key))
}
