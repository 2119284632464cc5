//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "entmine=info,entmine_core=info,entmine_analysis=info";

/// Initialize the entmine tracing/logging system.
///
/// Reads `ENTMINE_LOG` for per-crate log levels, e.g.
/// `ENTMINE_LOG=entmine_analysis=debug,entmine_core=warn`.
///
/// Falls back to info level for the entmine crates if `ENTMINE_LOG` is not
/// set or is invalid. Events go to stderr; stdout carries result lines.
///
/// This function is idempotent.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();
    });
}
