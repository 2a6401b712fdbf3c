//! `localStorage` access for the auth token.
//!
//! Only the browser has persistent client storage. Outside `hydrate` builds
//! every call reports [`StorageError::Unavailable`] so server rendering never
//! depends on browser state.
//!
//! ERROR HANDLING
//! ==============
//! `web-sys` surfaces failures as opaque `JsValue`s; they are flattened into
//! strings here so callers can log them and carry on.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use crate::config::GuardConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("local storage is unavailable")]
    Unavailable,
    #[error("local storage {op} failed: {detail}")]
    Access { op: &'static str, detail: String },
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    let window = web_sys::window().ok_or(StorageError::Unavailable)?;
    window
        .local_storage()
        .map_err(|e| access_error("open", &e))?
        .ok_or(StorageError::Unavailable)
}

#[cfg(feature = "hydrate")]
fn access_error(op: &'static str, err: &wasm_bindgen::JsValue) -> StorageError {
    StorageError::Access { op, detail: format!("{err:?}") }
}

/// Read a raw entry. `Ok(None)` means the key is not set.
///
/// # Errors
///
/// Fails when storage is missing or the browser denies access.
pub fn read_item(key: &str) -> Result<Option<String>, StorageError> {
    #[cfg(feature = "hydrate")]
    {
        local_storage()?.get_item(key).map_err(|e| access_error("read", &e))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        Err(StorageError::Unavailable)
    }
}

/// Write a raw entry, replacing any previous value.
///
/// # Errors
///
/// Fails when storage is missing, the browser denies access, or the quota is
/// exhausted.
pub fn write_item(key: &str, value: &str) -> Result<(), StorageError> {
    #[cfg(feature = "hydrate")]
    {
        local_storage()?.set_item(key, value).map_err(|e| access_error("write", &e))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, value);
        Err(StorageError::Unavailable)
    }
}

/// Remove a raw entry. Removing a missing key succeeds.
///
/// # Errors
///
/// Fails when storage is missing or the browser denies access.
pub fn remove_item(key: &str) -> Result<(), StorageError> {
    #[cfg(feature = "hydrate")]
    {
        local_storage()?.remove_item(key).map_err(|e| access_error("remove", &e))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        Err(StorageError::Unavailable)
    }
}

/// Read the token under the configured key.
///
/// # Errors
///
/// See [`read_item`].
pub fn read_token(config: &GuardConfig) -> Result<Option<String>, StorageError> {
    read_item(&config.token_key)
}

/// Persist a token after a successful login.
///
/// # Errors
///
/// See [`write_item`].
pub fn store_token(config: &GuardConfig, token: &str) -> Result<(), StorageError> {
    write_item(&config.token_key, token)?;
    log::debug!("stored auth token under {:?}", config.token_key);
    Ok(())
}

/// Drop the token, typically on logout.
///
/// # Errors
///
/// See [`remove_item`].
pub fn clear_token(config: &GuardConfig) -> Result<(), StorageError> {
    remove_item(&config.token_key)?;
    log::debug!("cleared auth token under {:?}", config.token_key);
    Ok(())
}
