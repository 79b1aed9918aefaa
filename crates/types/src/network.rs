//! Blockchain network models

use serde::{Deserialize, Serialize};

/// A blockchain network the client may activate against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Network {
	/// Chain ID (e.g., 1 for Ethereum mainnet)
	pub chain_id: u64,
	/// Human-readable name
	pub name: Option<String>,
	/// Whether the network is a testnet
	pub is_testnet: Option<bool>,
}

impl Network {
	pub fn new(chain_id: u64, name: Option<String>, is_testnet: Option<bool>) -> Self {
		Self {
			chain_id,
			name,
			is_testnet,
		}
	}
}

/// Networks the protocol is deployed on
impl Network {
	/// Ethereum mainnet
	pub fn ethereum() -> Self {
		Self::new(1, Some("Ethereum".to_string()), Some(false))
	}

	/// Kovan test network
	pub fn kovan() -> Self {
		Self::new(42, Some("Kovan".to_string()), Some(true))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_known_networks() {
		assert_eq!(Network::ethereum().chain_id, 1);
		assert_eq!(Network::ethereum().is_testnet, Some(false));
		assert_eq!(Network::kovan().chain_id, 42);
		assert_eq!(Network::kovan().is_testnet, Some(true));
	}
}
