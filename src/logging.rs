//! Logger bootstrap for the scenario runner and host integrations.
use env_logger::{Builder, Env};
use log::{debug, LevelFilter};

/// Default level for this crate's own modules.
const fn pilot_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Installs the global `env_logger`.
///
/// Verbose mode prints per-tick decisions and roll candidate scores; `RUST_LOG`
/// overrides either default. A logger installed earlier stays in place.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(pilot_level(verbose).to_string());
    let installed = Builder::from_env(env)
        .format_timestamp_millis()
        .format_module_path(verbose)
        .try_init();
    if installed.is_err() {
        debug!("logger already installed; keeping it");
    }
}
