//! Scripted provider and session fixtures shared by the unit tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy_primitives::{address, Address, Bytes, B256, U256};
use async_trait::async_trait;
use quad_chain::{ContractCache, RoleRegistry, WalletSession};
use quad_types::{ChainError, ChainResult, Provider, TransactionRequest, TxReceipt};

pub const DISCOVERY: Address = address!("00000000000000000000000000000000000000d1");
pub const ACCOUNT: Address = address!("00000000000000000000000000000000000000aa");

/// Provider answering contract calls per-selector with scripted payloads,
/// optional delays, and recorded transactions.
pub struct ScriptedChain {
	responses: Mutex<HashMap<[u8; 4], (Duration, Result<Bytes, String>)>>,
	balances: Mutex<HashMap<Address, U256>>,
	sent: Mutex<Vec<TransactionRequest>>,
}

impl ScriptedChain {
	pub fn new() -> Self {
		Self {
			responses: Mutex::new(HashMap::new()),
			balances: Mutex::new(HashMap::new()),
			sent: Mutex::new(Vec::new()),
		}
	}

	pub fn respond(self, selector: [u8; 4], payload: Result<Bytes, String>) -> Self {
		self.respond_after(selector, Duration::ZERO, payload)
	}

	pub fn respond_after(
		self,
		selector: [u8; 4],
		delay: Duration,
		payload: Result<Bytes, String>,
	) -> Self {
		self.responses
			.lock()
			.unwrap()
			.insert(selector, (delay, payload));
		self
	}

	pub fn with_balance(self, address: Address, balance: U256) -> Self {
		self.balances.lock().unwrap().insert(address, balance);
		self
	}

	pub fn sent(&self) -> Vec<TransactionRequest> {
		self.sent.lock().unwrap().clone()
	}
}

#[async_trait]
impl Provider for ScriptedChain {
	async fn call(&self, _to: Address, data: Bytes) -> ChainResult<Bytes> {
		let mut selector = [0u8; 4];
		selector.copy_from_slice(&data[..4]);
		let scripted = self.responses.lock().unwrap().get(&selector).cloned();

		let Some((delay, payload)) = scripted else {
			return Err(ChainError::Rpc {
				code: -32000,
				message: "execution reverted".to_string(),
			});
		};
		if !delay.is_zero() {
			tokio::time::sleep(delay).await;
		}
		payload.map_err(|message| ChainError::Rpc {
			code: -32000,
			message,
		})
	}

	async fn get_balance(&self, address: Address) -> ChainResult<U256> {
		Ok(self
			.balances
			.lock()
			.unwrap()
			.get(&address)
			.copied()
			.unwrap_or(U256::ZERO))
	}

	async fn send_transaction(&self, tx: TransactionRequest) -> ChainResult<TxReceipt> {
		self.sent.lock().unwrap().push(tx);
		Ok(TxReceipt {
			transaction_hash: B256::repeat_byte(0x11),
			block_number: Some(1),
			status: true,
			gas_used: Some(21_000),
		})
	}

	async fn chain_id(&self) -> ChainResult<u64> {
		Ok(1)
	}

	async fn accounts(&self) -> ChainResult<Vec<Address>> {
		Ok(vec![ACCOUNT])
	}
}

/// A connected session plus registry and cache over the scripted chain.
/// The chain itself is returned so tests can inspect recorded transactions.
pub async fn connected(
	chain: ScriptedChain,
) -> (
	Arc<ScriptedChain>,
	Arc<WalletSession>,
	Arc<RoleRegistry>,
	ContractCache,
) {
	let chain = Arc::new(chain);
	let session = Arc::new(WalletSession::new(chain.clone(), vec![1]));
	session.connect().await.unwrap();
	let cache = ContractCache::new();
	let registry = Arc::new(RoleRegistry::new(session.clone(), DISCOVERY, cache.clone()));
	(chain, session, registry, cache)
}

/// Session without any provider; everything built on it stays loading.
pub fn detached() -> (Arc<WalletSession>, Arc<RoleRegistry>, ContractCache) {
	let session = Arc::new(WalletSession::detached(vec![1]));
	let cache = ContractCache::new();
	let registry = Arc::new(RoleRegistry::new(session.clone(), DISCOVERY, cache.clone()));
	(session, registry, cache)
}
