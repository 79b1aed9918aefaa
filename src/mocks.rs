//! Centralized mock provider and fixtures for testing
//!
//! A programmable chain double keyed by exact calldata, so integration tests
//! can wire the full client without a network.

use std::sync::{Arc, Mutex, PoisonError};

use alloy_primitives::{address, Address, Bytes, B256, U256};
use alloy_sol_types::{SolCall, SolValue};
use async_trait::async_trait;
use dashmap::DashMap;

use quad_chain::abi::IDiscovery;
use quad_types::{ChainError, ChainResult, Provider, Role, TransactionRequest, TxReceipt};

/// Account the mock chain signs for by default.
pub const MOCK_ACCOUNT: Address = address!("00000000000000000000000000000000000000aa");

/// Discovery contract address used by the fixtures.
pub const MOCK_DISCOVERY: Address = address!("00000000000000000000000000000000000000d1");

/// ABI-encode a value as contract return data.
pub fn abi_ret<T: SolValue>(value: T) -> Bytes {
	Bytes::from(value.abi_encode())
}

/// Scripted provider answering calls by exact (address, calldata) match.
///
/// Unscripted calls revert, like a contract that does not implement the
/// method. Submitted transactions are recorded and acknowledged with a
/// successful receipt.
pub struct MockChain {
	accounts: Vec<Address>,
	chain_id: u64,
	calls: DashMap<(Address, Bytes), Result<Bytes, String>>,
	call_counts: DashMap<(Address, Bytes), usize>,
	balances: DashMap<Address, U256>,
	sent: Mutex<Vec<TransactionRequest>>,
}

impl MockChain {
	/// A chain with one connected account on mainnet.
	pub fn new() -> Self {
		Self {
			accounts: vec![MOCK_ACCOUNT],
			chain_id: 1,
			calls: DashMap::new(),
			call_counts: DashMap::new(),
			balances: DashMap::new(),
			sent: Mutex::new(Vec::new()),
		}
	}

	/// A chain whose wallet exposes no accounts.
	pub fn disconnected() -> Self {
		Self {
			accounts: Vec::new(),
			..Self::new()
		}
	}

	pub fn with_chain_id(mut self, chain_id: u64) -> Self {
		self.chain_id = chain_id;
		self
	}

	/// Script the response for one exact call.
	pub fn on_call<C: SolCall>(self, to: Address, call: C, ret: Bytes) -> Self {
		self.calls
			.insert((to, Bytes::from(call.abi_encode())), Ok(ret));
		self
	}

	/// Script a revert for one exact call.
	pub fn on_call_revert<C: SolCall>(self, to: Address, call: C, message: &str) -> Self {
		self.calls
			.insert((to, Bytes::from(call.abi_encode())), Err(message.to_string()));
		self
	}

	/// Register role members on the fixture discovery contract.
	pub fn on_role(self, role: Role, members: Vec<Address>) -> Self {
		let call = IDiscovery::getRoleMembersCall { role: role.id() };
		self.on_call(MOCK_DISCOVERY, call, abi_ret(members))
	}

	pub fn with_balance(self, address: Address, balance: U256) -> Self {
		self.balances.insert(address, balance);
		self
	}

	/// Change a balance after construction, e.g. between poll ticks.
	pub fn set_balance(&self, address: Address, balance: U256) {
		self.balances.insert(address, balance);
	}

	/// Transactions submitted through this chain, in order.
	pub fn sent(&self) -> Vec<TransactionRequest> {
		self.sent
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.clone()
	}

	/// How often one exact call has been made.
	pub fn call_count<C: SolCall>(&self, to: Address, call: C) -> usize {
		self.call_counts
			.get(&(to, Bytes::from(call.abi_encode())))
			.map(|entry| *entry)
			.unwrap_or(0)
	}
}

impl Default for MockChain {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl Provider for MockChain {
	async fn call(&self, to: Address, data: Bytes) -> ChainResult<Bytes> {
		let key = (to, data);
		*self.call_counts.entry(key.clone()).or_insert(0) += 1;

		match self.calls.get(&key) {
			Some(entry) => match entry.value() {
				Ok(ret) => Ok(ret.clone()),
				Err(message) => Err(ChainError::Rpc {
					code: -32000,
					message: message.clone(),
				}),
			},
			None => Err(ChainError::Rpc {
				code: -32000,
				message: "execution reverted".to_string(),
			}),
		}
	}

	async fn get_balance(&self, address: Address) -> ChainResult<U256> {
		Ok(self
			.balances
			.get(&address)
			.map(|entry| *entry)
			.unwrap_or(U256::ZERO))
	}

	async fn send_transaction(&self, tx: TransactionRequest) -> ChainResult<TxReceipt> {
		self.sent
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.push(tx);
		Ok(TxReceipt {
			transaction_hash: B256::repeat_byte(0x42),
			block_number: Some(1),
			status: true,
			gas_used: Some(21_000),
		})
	}

	async fn chain_id(&self) -> ChainResult<u64> {
		Ok(self.chain_id)
	}

	async fn accounts(&self) -> ChainResult<Vec<Address>> {
		Ok(self.accounts.clone())
	}
}

/// A client wired over the given mock chain, with the fixture discovery
/// address configured.
pub fn mock_client(chain: Arc<MockChain>) -> crate::QuadClient {
	let mut settings = crate::Settings::default();
	settings.discovery.address = MOCK_DISCOVERY.to_string();

	crate::QuadClientBuilder::new()
		.with_settings(settings)
		.with_provider(chain)
		.build()
		.expect("mock client construction cannot fail")
}
