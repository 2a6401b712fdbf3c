//! Guard configuration: which storage entry holds the token and where to send
//! visitors who lack one.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided once near the router root through Leptos context; `RequireToken`
//! falls back to the defaults when nothing was provided.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use leptos::prelude::*;
use serde::Deserialize;

pub const DEFAULT_TOKEN_KEY: &str = "token";
pub const DEFAULT_LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("token storage key must not be empty")]
    EmptyTokenKey,
    #[error("login path must be absolute, got {0:?}")]
    RelativeLoginPath(String),
}

/// Storage key and redirect target used by the route guard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    pub token_key: String,
    pub login_path: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self { token_key: DEFAULT_TOKEN_KEY.to_owned(), login_path: DEFAULT_LOGIN_PATH.to_owned() }
    }
}

impl GuardConfig {
    #[must_use]
    pub fn with_token_key(mut self, key: impl Into<String>) -> Self {
        self.token_key = key.into();
        self
    }

    #[must_use]
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Reject configs the guard cannot act on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the key is empty or the login path is not
    /// rooted at `/`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token_key.is_empty() {
            return Err(ConfigError::EmptyTokenKey);
        }
        if !self.login_path.starts_with('/') {
            return Err(ConfigError::RelativeLoginPath(self.login_path.clone()));
        }
        Ok(())
    }

    /// True when `path` points at the login page itself, ignoring any
    /// trailing slash.
    pub fn is_login_path(&self, path: &str) -> bool {
        strip_trailing_slash(path) == strip_trailing_slash(&self.login_path)
    }
}

fn strip_trailing_slash(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Validate `config` and make it available to every `RequireToken` below.
///
/// # Errors
///
/// Returns the validation error without providing anything.
pub fn provide_guard_config(config: GuardConfig) -> Result<(), ConfigError> {
    config.validate()?;
    provide_context(config);
    Ok(())
}

/// The provided config, or the defaults when none was provided.
pub fn use_guard_config() -> GuardConfig {
    use_context::<GuardConfig>().unwrap_or_default()
}
