//! Observability utilities.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::types::ObservabilityConfig;

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Env var that switches log output to JSON.
pub const LOG_FORMAT_ENV: &str = "PROCESS_ENVELOPE_LOG_FORMAT";

/// Initialize tracing subscriber once for the process.
///
/// `RUST_LOG` wins over `config.log_level`. JSON output is on when
/// `config.json_logs` is set or `PROCESS_ENVELOPE_LOG_FORMAT=json`.
/// Logs go to stderr so stdout stays clean for payloads and curl commands.
pub fn init_tracing(config: &ObservabilityConfig) {
    TRACING_INIT.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
        let json = config.json_logs
            || std::env::var(LOG_FORMAT_ENV)
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false);

        let result = if json {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .try_init()
        };

        if let Err(err) = result {
            eprintln!("tracing init skipped: {err}");
        }
    });
}
