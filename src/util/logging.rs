//! Browser console logging.

#[cfg(test)]
#[path = "logging_test.rs"]
mod logging_test;

/// Route `log` records and panics to the browser console.
///
/// Safe to call more than once; later calls keep the first logger. Does
/// nothing outside `hydrate` builds, where the host installs its own logger.
pub fn init_logging() {
    #[cfg(feature = "hydrate")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Debug);
    }
}
