//! # token-guard
//!
//! Client-side route guard for Leptos front ends. Pages wrapped in
//! [`guard::RequireToken`] send visitors without a stored auth token to the
//! login page; server rendering passes through untouched.
//!
//! Token issuance and verification live elsewhere. This crate only checks
//! that `localStorage` holds something under the configured key, and offers
//! helpers for the login and logout flows to write or drop that entry.

pub mod config;
pub mod guard;
pub mod util;

pub use config::{GuardConfig, provide_guard_config, use_guard_config};
pub use guard::{GuardDecision, RenderEnv, RequireToken, RequireTokenProps};
pub use util::logging::init_logging;
