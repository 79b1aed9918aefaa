//! Quad Config
//!
//! Configuration structures and loading for the Quad protocol client.
//! Settings are constructed once at process start and threaded explicitly
//! through the client; nothing in the workspace reads module-level state.

pub mod loader;
pub mod settings;
pub mod startup;

pub use loader::load_config;
pub use settings::{
	DiscoverySettings, LogFormat, LoggingSettings, NetworkSettings, PollingSettings, RpcSettings,
	Settings, SubgraphSettings,
};
pub use startup::{init_tracing, log_startup};
