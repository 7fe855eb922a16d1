//! Process-level setup for the demo binary: logging and dispatch policy.

use anyhow::Result;
use flagcmd::DispatchConfig;

/// Set to `1` (or `true`) to get the legacy dispatch behavior.
pub const LEGACY_ENV: &str = "FLAGCMD_DEMO_LEGACY";

/// Initialize the tracing subscriber.
///
/// Honors `RUST_LOG`, defaults to INFO and writes to stderr.
///
/// # Errors
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))
}

pub fn dispatch_config() -> DispatchConfig {
    dispatch_config_from(std::env::var(LEGACY_ENV).ok().as_deref())
}

fn dispatch_config_from(legacy: Option<&str>) -> DispatchConfig {
    match legacy.map(str::trim) {
        Some(v) if v == "1" || v.eq_ignore_ascii_case("true") => DispatchConfig::legacy(),
        _ => DispatchConfig::default(),
    }
}
