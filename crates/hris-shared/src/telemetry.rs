//! Telemetry setup

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directives applied when `RUST_LOG` is unset: this service's crates at
/// debug, everything else at info.
const DEFAULT_DIRECTIVES: &str =
    "info,hris_core=debug,hris_infrastructure=debug,hris_api=debug,hris_server=debug";

/// Install the global subscriber: compact human-readable output in
/// development, JSON lines everywhere else.
pub fn init_telemetry() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let registry = tracing_subscriber::registry().with(env_filter);

    let development = std::env::var("APP_ENV")
        .map(|env| env == "development")
        .unwrap_or(true);
    if development {
        registry.with(fmt::layer().compact()).init();
    } else {
        registry.with(fmt::layer().json()).init();
    }
}
