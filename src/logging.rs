//! Tracing setup for the demo binary.
//!
//! `HYPERSPAN_LOG` holds an `EnvFilter` directive (default `hyperspan=info`).
//! When `HYPERSPAN_LOG_FILE` is set, events go to that file. Otherwise they
//! go to stderr, but only when the terminal UI is not running.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub const LOG_FILTER_ENV: &str = "HYPERSPAN_LOG";
pub const LOG_FILE_ENV: &str = "HYPERSPAN_LOG_FILE";

const DEFAULT_FILTER: &str = "hyperspan=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. `allow_stderr` is false while the TUI owns
/// the screen.
pub fn init(allow_stderr: bool) -> color_eyre::Result<()> {
    if let Ok(path) = std::env::var(LOG_FILE_ENV) {
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        tracing_subscriber::registry()
            .with(env_filter())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true),
            )
            .try_init()?;
        tracing::info!(%path, "tracing initialized");
        return Ok(());
    }

    if allow_stderr {
        tracing_subscriber::registry()
            .with(env_filter())
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    }
    Ok(())
}
