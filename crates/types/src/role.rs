//! Protocol roles and the call interfaces associated with them

use alloy_primitives::{keccak256, B256};
use serde::{Deserialize, Serialize};

/// Semantic category of a deployed protocol contract.
///
/// The set is fixed at process start; each role resolves to zero or more
/// addresses through the discovery contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
	/// The initial liquidity generation event (sale) contract.
	Sale,
	/// The staking vault tracking locked positions and rewards.
	Vault,
	/// The protocol token.
	Token,
	/// Wrappers representing deposited liquidity-pool positions.
	WrappedLp,
	/// The underlying liquidity pairs.
	LiquidityPair,
}

impl Role {
	pub const ALL: [Role; 5] = [
		Role::Sale,
		Role::Vault,
		Role::Token,
		Role::WrappedLp,
		Role::LiquidityPair,
	];

	/// The access-control identifier the discovery contract keys members by.
	pub fn id(&self) -> B256 {
		keccak256(self.id_string().as_bytes())
	}

	/// The on-chain role string this identifier is derived from.
	pub fn id_string(&self) -> &'static str {
		match self {
			Role::Sale => "LGE_ROLE",
			Role::Vault => "QUAD_VAULT_ROLE",
			Role::Token => "QUAD_TOKEN_ROLE",
			Role::WrappedLp => "WRAPPED_LP_ROLE",
			Role::LiquidityPair => "LP_TOKEN_ROLE",
		}
	}

	/// The call interface spoken by contracts registered under this role.
	pub fn shape(&self) -> InterfaceShape {
		match self {
			Role::Sale => InterfaceShape::Sale,
			Role::Vault => InterfaceShape::Vault,
			Role::Token => InterfaceShape::Token,
			Role::WrappedLp => InterfaceShape::WrappedLp,
			Role::LiquidityPair => InterfaceShape::LiquidityPair,
		}
	}
}

impl std::fmt::Display for Role {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.id_string())
	}
}

/// Shape of the call interface a contract handle is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceShape {
	Discovery,
	Token,
	Vault,
	WrappedLp,
	LiquidityPair,
	Sale,
}
