//! Tracing bootstrap for binaries and tests that embed the engine.
//!
//! The engine only emits `tracing` events; installing a subscriber is the
//! embedder's choice. `init_tracing` and `init_json_tracing` share one
//! guard: only the first call of either installs anything.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive, e.g. `faultline_engine=debug`.
pub const LOG_ENV_VAR: &str = "FAULTLINE_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

static INIT: Once = Once::new();

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install a fmt subscriber filtered by `FAULTLINE_LOG` (default `info`).
///
/// Returns `true` only when this call installed the subscriber. Later calls,
/// and calls made after the host process installed its own subscriber,
/// return `false`.
pub fn init_tracing() -> bool {
    let mut installed = false;
    INIT.call_once(|| {
        installed = tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_target(true)
            .try_init()
            .is_ok();
    });
    installed
}

/// Same as [`init_tracing`] but emits newline-delimited JSON.
pub fn init_json_tracing() -> bool {
    let mut installed = false;
    INIT.call_once(|| {
        installed = tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter())
            .try_init()
            .is_ok();
    });
    installed
}
