//! Error taxonomies for chain and price-feed operations

use alloy_primitives::B256;
use thiserror::Error;

use crate::amount::AmountError;

/// Errors raised by provider, wallet and contract operations.
#[derive(Debug, Error)]
pub enum ChainError {
	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("RPC error {code}: {message}")]
	Rpc { code: i64, message: String },

	#[error("invalid response: {0}")]
	InvalidResponse(String),

	#[error("ABI decode failed for {method}: {reason}")]
	Decode {
		method: &'static str,
		reason: String,
	},

	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("invalid endpoint: {0}")]
	InvalidEndpoint(String),

	#[error("no account connected")]
	NoAccount,

	#[error("chain {chain_id} is not in the allow list")]
	UnsupportedChain { chain_id: u64 },

	#[error("transaction {tx_hash} not mined within {timeout_ms}ms")]
	ReceiptTimeout { tx_hash: B256, timeout_ms: u64 },

	#[error("amount error: {0}")]
	Amount(#[from] AmountError),
}

pub type ChainResult<T> = Result<T, ChainError>;

/// Errors raised by the subgraph price feed.
#[derive(Debug, Error)]
pub enum SubgraphError {
	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("query rejected: {0}")]
	Query(String),

	#[error("malformed response: {0}")]
	Malformed(String),

	#[error("invalid endpoint: {0}")]
	InvalidEndpoint(String),
}

pub type SubgraphResult<T> = Result<T, SubgraphError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_chain_error_messages() {
		let err = ChainError::Rpc {
			code: -32000,
			message: "execution reverted".to_string(),
		};
		assert!(err.to_string().contains("-32000"));
		assert!(err.to_string().contains("execution reverted"));

		let err = ChainError::UnsupportedChain { chain_id: 1337 };
		assert!(err.to_string().contains("1337"));
	}

	#[test]
	fn test_amount_error_converts() {
		fn fails() -> ChainResult<()> {
			crate::amount::to_wei("not-a-number")?;
			Ok(())
		}
		assert!(matches!(fails(), Err(ChainError::Amount(_))));
	}
}
