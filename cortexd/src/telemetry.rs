//! Telemetry initialization (fmt subscriber + env filter).
//!
//! Log levels follow the standard `RUST_LOG` conventions, e.g.:
//!
//! ```bash
//! export RUST_LOG="cortexd=debug,tower_http=debug,info"
//! ```
//!
//! Defaults to `info` when `RUST_LOG` is unset.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initialize tracing with console output
pub fn init_telemetry() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    Ok(())
}
