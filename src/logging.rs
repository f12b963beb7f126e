//! Logging utilities for llm-relay
//!
//! Re-exports tracing macros with log_* naming convention for consistency,
//! plus the subscriber setup used by the command-line binary.

// Re-export tracing macros with log_* naming
#[allow(unused_imports)]
pub(crate) use tracing::{
    debug as log_debug, error as log_error, info as log_info, warn as log_warn,
};

use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber for the CLI.
///
/// `RUST_LOG` wins when set; otherwise `debug` when verbose, `warn` when not.
/// Stdout is left untouched because it carries the answer text.
pub fn init_cli_logging(verbose: bool) {
    let default_level = if verbose { "llm_relay=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (e.g. from tests) is harmless, so ignore the error.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
