//! Vault staking models

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::amount::from_wei;

/// A user's position in the staking vault for one wrapped-LP token.
///
/// All fields are decimal strings normalized from 10^18 fixed-point integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultUserData {
	pub staked_amount: String,
	pub paid_amount: String,
	pub pending_rewards: String,
	pub locked_tokens: String,
}

impl VaultUserData {
	/// Normalize the raw fixed-point values returned by the vault contract.
	pub fn from_raw(staked: U256, paid: U256, pending: U256, locked: U256) -> Self {
		Self {
			staked_amount: from_wei(staked),
			paid_amount: from_wei(paid),
			pending_rewards: from_wei(pending),
			locked_tokens: from_wei(locked),
		}
	}
}

/// One aggregated fee-analytics window reported by the vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeAnalytic {
	pub start_block: u64,
	pub end_block: u64,
	/// Collected fees over the window, normalized to a decimal string.
	pub fee_amount: String,
}

#[derive(Debug, Error)]
pub enum AnalyticError {
	#[error("block number does not fit in 64 bits: {0}")]
	BlockNumber(U256),
}

impl FeeAnalytic {
	pub fn from_raw(start_block: U256, end_block: U256, fee_amount: U256) -> Result<Self, AnalyticError> {
		Ok(Self {
			start_block: u64::try_from(start_block)
				.map_err(|_| AnalyticError::BlockNumber(start_block))?,
			end_block: u64::try_from(end_block).map_err(|_| AnalyticError::BlockNumber(end_block))?,
			fee_amount: from_wei(fee_amount),
		})
	}
}
