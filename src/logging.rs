//! Logger setup for the demo binary and tests.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// `RUST_LOG` takes precedence. Without it, `verbose` selects debug output
/// (grab starts, releases and landings); otherwise only info and above are
/// shown. Per-frame carrier updates are logged at trace level.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);

    // `try_init` only fails if a logger was already set. Ignore that case so
    // tests can call `init` multiple times without panicking.
    if builder.try_init().is_err() {
        log::debug!("logger already initialised");
    }
}
