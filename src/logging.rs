//! Structured logging setup.
//!
//! The terminal belongs to the UI, so events go to a file:
//! - `RUST_LOG` environment filter support, default `typetastic=info`
//! - JSON lines when `RUST_LOG_FORMAT=json`
//! - Human-readable lines otherwise

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "typetastic=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber writing to `path`.
///
/// Returns false when the file cannot be opened or a subscriber is already
/// installed; logging is then simply off.
pub fn init(path: &Path) -> bool {
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return false;
        }
    }
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(_) => return false,
    };

    let is_json = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false);

    if is_json {
        subscriber.json().try_init().is_ok()
    } else {
        subscriber.try_init().is_ok()
    }
}
