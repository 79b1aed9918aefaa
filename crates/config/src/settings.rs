//! Configuration settings structures

use serde::{Deserialize, Serialize};

/// Main client settings
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
	pub rpc: RpcSettings,
	pub discovery: DiscoverySettings,
	pub network: NetworkSettings,
	pub subgraph: SubgraphSettings,
	pub polling: PollingSettings,
	pub logging: LoggingSettings,
}

/// Execution-endpoint configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RpcSettings {
	/// JSON-RPC endpoint of the wallet/node. Empty means no provider is
	/// available and the client stays in the missing-provider state.
	pub endpoint: String,
	/// Request timeout for HTTP calls
	pub request_timeout_ms: u64,
	/// How often to poll for a submitted transaction's receipt
	pub receipt_poll_interval_ms: u64,
	/// How long to wait for a receipt before giving up
	pub receipt_timeout_ms: u64,
}

/// Discovery contract configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DiscoverySettings {
	/// Address of the contract answering `getRoleMembers`
	pub address: String,
}

/// Chain allow-list configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct NetworkSettings {
	/// Chain IDs the wallet session may activate against
	pub allowed_chain_ids: Vec<u64>,
}

/// Price-feed configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SubgraphSettings {
	/// GraphQL endpoint serving ETH and per-token prices
	pub endpoint: String,
}

/// Refresh cadence for polled read models
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PollingSettings {
	pub refresh_interval_ms: u64,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	#[default]
	Pretty,
	Compact,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			rpc: RpcSettings::default(),
			discovery: DiscoverySettings::default(),
			network: NetworkSettings::default(),
			subgraph: SubgraphSettings::default(),
			polling: PollingSettings::default(),
			logging: LoggingSettings::default(),
		}
	}
}

impl Default for RpcSettings {
	fn default() -> Self {
		Self {
			endpoint: String::new(),
			request_timeout_ms: 5000,
			receipt_poll_interval_ms: 1000,
			receipt_timeout_ms: 120_000,
		}
	}
}

impl Default for NetworkSettings {
	fn default() -> Self {
		Self {
			// Mainnet and the Kovan test network
			allowed_chain_ids: vec![1, 42],
		}
	}
}

impl Default for SubgraphSettings {
	fn default() -> Self {
		Self {
			endpoint: "https://api.thegraph.com/subgraphs/name/uniswap/uniswap-v2".to_string(),
		}
	}
}

impl Default for PollingSettings {
	fn default() -> Self {
		Self {
			refresh_interval_ms: 30_000,
		}
	}
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
		}
	}
}

impl NetworkSettings {
	pub fn allows(&self, chain_id: u64) -> bool {
		self.allowed_chain_ids.contains(&chain_id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_allow_list() {
		let settings = Settings::default();
		assert!(settings.network.allows(1));
		assert!(settings.network.allows(42));
		assert!(!settings.network.allows(1337));
	}

	#[test]
	fn test_default_polling_cadence() {
		assert_eq!(PollingSettings::default().refresh_interval_ms, 30_000);
	}

	#[test]
	fn test_settings_deserialize_partial() {
		let toml = r#"
			[rpc]
			endpoint = "http://localhost:8545"

			[network]
			allowed_chain_ids = [42]
		"#;
		let settings: Settings = toml_from_str(toml);
		assert_eq!(settings.rpc.endpoint, "http://localhost:8545");
		assert_eq!(settings.rpc.request_timeout_ms, 5000);
		assert_eq!(settings.network.allowed_chain_ids, vec![42]);
		assert_eq!(settings.logging.level, "info");
	}

	fn toml_from_str(input: &str) -> Settings {
		config::Config::builder()
			.add_source(config::File::from_str(input, config::FileFormat::Toml))
			.build()
			.unwrap()
			.try_deserialize()
			.unwrap()
	}
}
