//! Structured logging setup.
//!
//! Diagnostics go through `tracing` and are written to stderr, so stdout
//! carries only node output. The filter comes from the first of:
//!
//! - the `--log-level` flag
//! - `CODEPROMPT_LOG` (full `EnvFilter` syntax, e.g. `codeprompt=debug`)
//! - `RUST_LOG`
//! - `warn`

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable read before `RUST_LOG`.
pub const LOG_ENV: &str = "CODEPROMPT_LOG";

/// Level used when nothing else is configured.
pub const DEFAULT_LEVEL: Level = Level::WARN;

/// Level names accepted by `--log-level`.
pub const LEVEL_NAMES: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

static INIT: Once = Once::new();

/// Parse a level name, case-insensitively.
pub fn parse_level(level_str: &str) -> Option<Level> {
    match level_str.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Pick the filter directive from the flag and the two environment values.
///
/// Blank environment values count as unset.
pub fn filter_directive(
    cli_level: Option<&str>,
    codeprompt_log: Option<&str>,
    rust_log: Option<&str>,
) -> String {
    if let Some(level) = cli_level.and_then(parse_level) {
        return level.to_string().to_lowercase();
    }

    [codeprompt_log, rust_log]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(String::from)
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string().to_lowercase())
}

fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|e| {
        eprintln!(
            "Invalid log filter '{}' ({}), defaulting to {}. Valid levels: {}",
            directive,
            e,
            DEFAULT_LEVEL,
            LEVEL_NAMES.join(", ")
        );
        EnvFilter::new(DEFAULT_LEVEL.to_string().to_lowercase())
    })
}

/// Initialize the global subscriber.
///
/// Only the first call has an effect. A subscriber installed elsewhere (for
/// example by an embedding host) is left in place.
pub fn init(cli_level: Option<&str>) {
    INIT.call_once(|| {
        let directive = filter_directive(
            cli_level,
            env::var(LOG_ENV).ok().as_deref(),
            env::var("RUST_LOG").ok().as_deref(),
        );

        let _ = tracing_subscriber::registry()
            .with(build_filter(&directive))
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init();
    });
}
