//! Provider abstraction over an execution-layer endpoint
//!
//! The rest of the workspace only ever talks to the chain through this trait,
//! so tests can substitute a scripted implementation.

use alloy_primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;

use crate::errors::ChainResult;

/// Read and write surface of an execution-layer endpoint.
///
/// All methods are non-blocking; failures propagate to the caller without
/// retry.
#[async_trait]
pub trait Provider: Send + Sync {
	/// Execute a read-only contract call against the latest block.
	async fn call(&self, to: Address, data: Bytes) -> ChainResult<Bytes>;

	/// Native balance of an address.
	async fn get_balance(&self, address: Address) -> ChainResult<U256>;

	/// Sign and submit a transaction through the endpoint's managed account,
	/// then wait for its receipt.
	async fn send_transaction(&self, tx: TransactionRequest) -> ChainResult<TxReceipt>;

	/// Chain ID the endpoint is serving.
	async fn chain_id(&self) -> ChainResult<u64>;

	/// Accounts the endpoint can sign for.
	async fn accounts(&self) -> ChainResult<Vec<Address>>;
}

/// A transaction to be signed and submitted by the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
	pub from: Address,
	pub to: Address,
	/// ABI-encoded method call.
	pub data: Bytes,
	/// Native value to attach, if any.
	pub value: Option<U256>,
}

/// Minimal receipt surfaced from transaction submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
	pub transaction_hash: B256,
	pub block_number: Option<u64>,
	/// Whether the transaction executed successfully.
	pub status: bool,
	pub gas_used: Option<u64>,
}
