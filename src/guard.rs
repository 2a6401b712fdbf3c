//! Token route guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs once per navigation. In the browser it looks up the auth token in
//! `localStorage` and sends visitors without one to the login page. During
//! server rendering it always lets navigation through and never touches
//! storage.
//!
//! The token is opaque: presence is the only thing checked. Access control
//! still has to happen wherever the token is consumed.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::config::{GuardConfig, use_guard_config};
use crate::util::storage::{self, StorageError};

/// Where the current code is executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderEnv {
    Client,
    Server,
}

impl RenderEnv {
    /// `Client` in `hydrate` builds, `Server` everywhere else.
    pub const fn current() -> Self {
        if cfg!(feature = "hydrate") { Self::Client } else { Self::Server }
    }
}

/// Outcome of a single navigation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

/// An empty stored value counts as no token.
pub fn has_token(token: Option<&str>) -> bool {
    token.is_some_and(|t| !t.is_empty())
}

/// Decide whether navigation to `target_path` may proceed.
pub fn evaluate(
    env: RenderEnv,
    target_path: &str,
    token: Option<&str>,
    config: &GuardConfig,
) -> GuardDecision {
    if env == RenderEnv::Server || has_token(token) {
        return GuardDecision::Allow;
    }
    // Already headed to login; redirecting again would loop.
    if config.is_login_path(target_path) {
        return GuardDecision::Allow;
    }
    GuardDecision::Redirect(config.login_path.clone())
}

/// Environment check, storage lookup, then [`evaluate`].
///
/// Unreadable storage is treated like a missing token.
pub fn check_navigation(target_path: &str, config: &GuardConfig) -> GuardDecision {
    check_with(RenderEnv::current(), storage::read_token, target_path, config)
}

fn check_with<R>(
    env: RenderEnv,
    read: R,
    target_path: &str,
    config: &GuardConfig,
) -> GuardDecision
where
    R: FnOnce(&GuardConfig) -> Result<Option<String>, StorageError>,
{
    if env == RenderEnv::Server {
        return GuardDecision::Allow;
    }
    let token = read(config).unwrap_or_else(|e| {
        log::warn!("token lookup failed, treating as signed out: {e}");
        None
    });
    let decision = evaluate(env, target_path, token.as_deref(), config);
    log::debug!("guard {target_path}: {decision:?}");
    decision
}

fn redirect_options() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// One navigation: check, and call `navigate` at most once on redirect.
fn guard_navigation<R, F>(
    env: RenderEnv,
    read: R,
    target_path: &str,
    config: &GuardConfig,
    navigate: &F,
) -> GuardDecision
where
    R: FnOnce(&GuardConfig) -> Result<Option<String>, StorageError>,
    F: Fn(&str, NavigateOptions),
{
    let decision = check_with(env, read, target_path, config);
    if let GuardDecision::Redirect(to) = &decision {
        log::info!("no auth token, redirecting {target_path} -> {to}");
        navigate(to, redirect_options());
    }
    decision
}

/// Path getter that also subscribes to the query and hash, so navigations
/// that only change those still re-run the guard.
pub fn tracked_path(
    pathname: Signal<String>,
    search: Signal<String>,
    hash: Signal<String>,
) -> impl Fn() -> String + Clone + Send + Sync + 'static {
    move || {
        search.track();
        hash.track();
        pathname.get()
    }
}

fn hydrating() -> bool {
    Owner::current_shared_context().is_some_and(|ctx| ctx.during_hydration())
}

/// Whether to mount the guarded view before the first effect run.
///
/// During hydration the server already rendered the children, so start
/// allowed and leave the redirect to the effect.
fn initially_allowed<R>(
    env: RenderEnv,
    read: R,
    target_path: &str,
    config: &GuardConfig,
) -> bool
where
    R: FnOnce(&GuardConfig) -> Result<Option<String>, StorageError>,
{
    hydrating() || check_with(env, read, target_path, config) == GuardDecision::Allow
}

/// Re-check on every navigation reported by `path` and redirect when the
/// token is missing.
///
/// The redirect replaces the history entry so "back" does not land on the
/// guarded page again. The returned signal is `false` while the current
/// navigation is being turned away.
pub fn install_token_guard<P, F>(config: GuardConfig, path: P, navigate: F) -> Signal<bool>
where
    P: Fn() -> String + 'static,
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    install_with(RenderEnv::current(), storage::read_token, config, path, navigate)
}

fn install_with<R, P, F>(
    env: RenderEnv,
    read: R,
    config: GuardConfig,
    path: P,
    navigate: F,
) -> Signal<bool>
where
    R: Fn(&GuardConfig) -> Result<Option<String>, StorageError> + 'static,
    P: Fn() -> String + 'static,
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let allowed = RwSignal::new(initially_allowed(env, &read, &untrack(&path), &config));

    Effect::new(move || {
        let target = path();
        let decision = guard_navigation(env, &read, &target, &config, &navigate);
        allowed.set(decision == GuardDecision::Allow);
    });

    allowed.into()
}

/// Renders `children` only while the browser holds an auth token, and
/// redirects to the login page otherwise.
#[component]
pub fn RequireToken(children: ChildrenFn) -> impl IntoView {
    let config = use_guard_config();
    let location = use_location();
    let navigate = use_navigate();

    let path = tracked_path(location.pathname.into(), location.search.into(), location.hash.into());
    let allowed = install_token_guard(config, path, navigate);

    view! {
        <Show when=move || allowed.get()>
            {children()}
        </Show>
    }
}
