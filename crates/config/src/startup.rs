//! Startup logging and tracing initialization

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::settings::{LogFormat, LoggingSettings, Settings};

/// Install the global tracing subscriber per the logging settings.
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init_tracing(settings: &LoggingSettings) {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

	let builder = tracing_subscriber::fmt().with_env_filter(filter);
	match settings.format {
		LogFormat::Json => builder.json().init(),
		LogFormat::Pretty => builder.pretty().init(),
		LogFormat::Compact => builder.compact().init(),
	}
}

/// Logs client configuration at startup
pub fn log_startup(settings: &Settings) {
	info!("=== Quad Client Starting ===");
	info!("🚀 Client: quad-client v{}", env!("CARGO_PKG_VERSION"));

	if settings.rpc.endpoint.is_empty() {
		info!("🔌 Provider: none configured (missing-provider state)");
	} else {
		info!("🔌 Provider: {}", settings.rpc.endpoint);
	}

	info!("🔭 Discovery contract: {}", settings.discovery.address);
	info!("⛓️ Allowed chains: {:?}", settings.network.allowed_chain_ids);
	info!("📈 Price feed: {}", settings.subgraph.endpoint);
	info!("🔄 Refresh interval: {}ms", settings.polling.refresh_interval_ms);
}
