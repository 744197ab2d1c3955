//! Tracing subscriber setup for the `pokedex` binary.
//!
//! Logs go to stderr so they never interleave with the text the CLI prints on
//! stdout. `RUST_LOG` controls the filter, falling back to the caller's level; setting
//! `POKEDEX_LOG_JSON=1` switches to one JSON object per line.

use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_JSON_ENV: &str = "POKEDEX_LOG_JSON";

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

/// Install the global subscriber. `default_level` applies when `RUST_LOG` is
/// unset; the CLI passes `warn` unless `--verbose` was given.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if env_bool(LOG_JSON_ENV, false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
