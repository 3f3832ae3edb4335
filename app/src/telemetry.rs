// productvault/src/telemetry.rs

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "info";

pub fn env_filter() -> EnvFilter {
  EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

pub fn init_tracing() {
  tracing_subscriber::fmt()
    .with_env_filter(env_filter())
    .with_span_events(FmtSpan::CLOSE)
    .init();
}
