//! Wallet session and connection state

use std::sync::{Arc, PoisonError, RwLock};

use alloy_primitives::Address;
use quad_types::{ChainResult, Provider};
use tracing::{info, warn};

/// Connection state of the wallet session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
	/// No provider endpoint is available at all. This is a static state, not
	/// an error.
	MissingProvider,
	/// A provider exists but no account is activated.
	Disconnected,
	/// The provider's chain is not in the allow list.
	UnsupportedChain { chain_id: u64 },
	/// An account is active on an allowed chain.
	Connected { account: Address, chain_id: u64 },
}

/// Session binding the client to a wallet provider and an account.
///
/// Activation is restricted to the configured chain allow list.
pub struct WalletSession {
	provider: Option<Arc<dyn Provider>>,
	allowed_chain_ids: Vec<u64>,
	status: RwLock<ConnectionStatus>,
}

impl WalletSession {
	pub fn new(provider: Arc<dyn Provider>, allowed_chain_ids: Vec<u64>) -> Self {
		Self {
			provider: Some(provider),
			allowed_chain_ids,
			status: RwLock::new(ConnectionStatus::Disconnected),
		}
	}

	/// Session without any provider endpoint; stays in the missing-provider
	/// state forever.
	pub fn detached(allowed_chain_ids: Vec<u64>) -> Self {
		Self {
			provider: None,
			allowed_chain_ids,
			status: RwLock::new(ConnectionStatus::MissingProvider),
		}
	}

	/// Activate the session: query the provider's accounts and chain and
	/// transition the connection state accordingly.
	///
	/// Provider failures propagate; an empty account list or a disallowed
	/// chain are states, not errors.
	pub async fn connect(&self) -> ChainResult<ConnectionStatus> {
		let Some(provider) = self.provider.clone() else {
			return Ok(ConnectionStatus::MissingProvider);
		};

		let accounts = provider.accounts().await?;
		let Some(account) = accounts.first().copied() else {
			let status = ConnectionStatus::Disconnected;
			self.set_status(status);
			return Ok(status);
		};

		let chain_id = provider.chain_id().await?;
		let status = if self.allowed_chain_ids.contains(&chain_id) {
			ConnectionStatus::Connected { account, chain_id }
		} else {
			warn!(chain_id, allowed = ?self.allowed_chain_ids, "chain not in allow list");
			ConnectionStatus::UnsupportedChain { chain_id }
		};
		self.set_status(status);
		info!(?status, "wallet session activated");
		Ok(status)
	}

	pub fn disconnect(&self) {
		let status = if self.provider.is_none() {
			ConnectionStatus::MissingProvider
		} else {
			ConnectionStatus::Disconnected
		};
		self.set_status(status);
	}

	pub fn status(&self) -> ConnectionStatus {
		*self.status.read().unwrap_or_else(PoisonError::into_inner)
	}

	/// The connected account, if any.
	pub fn account(&self) -> Option<Address> {
		match self.status() {
			ConnectionStatus::Connected { account, .. } => Some(account),
			_ => None,
		}
	}

	pub fn is_connected(&self) -> bool {
		matches!(self.status(), ConnectionStatus::Connected { .. })
	}

	/// The underlying provider, when one is configured.
	pub fn provider(&self) -> Option<Arc<dyn Provider>> {
		self.provider.clone()
	}

	fn set_status(&self, status: ConnectionStatus) {
		*self.status.write().unwrap_or_else(PoisonError::into_inner) = status;
	}
}

impl std::fmt::Debug for WalletSession {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("WalletSession")
			.field("status", &self.status())
			.field("allowed_chain_ids", &self.allowed_chain_ids)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::{address, Bytes, U256};
	use async_trait::async_trait;
	use quad_types::{ChainResult, TransactionRequest, TxReceipt};

	mockall::mock! {
		Rpc {}

		#[async_trait]
		impl Provider for Rpc {
			async fn call(&self, to: Address, data: Bytes) -> ChainResult<Bytes>;
			async fn get_balance(&self, address: Address) -> ChainResult<U256>;
			async fn send_transaction(&self, tx: TransactionRequest) -> ChainResult<TxReceipt>;
			async fn chain_id(&self) -> ChainResult<u64>;
			async fn accounts(&self) -> ChainResult<Vec<Address>>;
		}
	}

	const ACCOUNT: Address = address!("00000000000000000000000000000000000000aa");

	#[tokio::test]
	async fn test_connect_on_allowed_chain() {
		let mut rpc = MockRpc::new();
		rpc.expect_accounts().returning(|| Ok(vec![ACCOUNT]));
		rpc.expect_chain_id().returning(|| Ok(42));

		let session = WalletSession::new(Arc::new(rpc), vec![1, 42]);
		let status = session.connect().await.unwrap();

		assert_eq!(
			status,
			ConnectionStatus::Connected {
				account: ACCOUNT,
				chain_id: 42
			}
		);
		assert!(session.is_connected());
		assert_eq!(session.account(), Some(ACCOUNT));
	}

	#[tokio::test]
	async fn test_connect_rejects_disallowed_chain() {
		let mut rpc = MockRpc::new();
		rpc.expect_accounts().returning(|| Ok(vec![ACCOUNT]));
		rpc.expect_chain_id().returning(|| Ok(1337));

		let session = WalletSession::new(Arc::new(rpc), vec![1, 42]);
		let status = session.connect().await.unwrap();

		assert_eq!(status, ConnectionStatus::UnsupportedChain { chain_id: 1337 });
		assert!(!session.is_connected());
		assert_eq!(session.account(), None);
	}

	#[tokio::test]
	async fn test_connect_without_accounts_stays_disconnected() {
		let mut rpc = MockRpc::new();
		rpc.expect_accounts().returning(|| Ok(vec![]));

		let session = WalletSession::new(Arc::new(rpc), vec![1]);
		let status = session.connect().await.unwrap();

		assert_eq!(status, ConnectionStatus::Disconnected);
	}

	#[tokio::test]
	async fn test_detached_session_is_missing_provider() {
		let session = WalletSession::detached(vec![1]);

		assert_eq!(session.status(), ConnectionStatus::MissingProvider);
		assert_eq!(session.connect().await.unwrap(), ConnectionStatus::MissingProvider);
		assert!(session.provider().is_none());
	}

	#[tokio::test]
	async fn test_disconnect_returns_to_base_state() {
		let mut rpc = MockRpc::new();
		rpc.expect_accounts().returning(|| Ok(vec![ACCOUNT]));
		rpc.expect_chain_id().returning(|| Ok(1));

		let session = WalletSession::new(Arc::new(rpc), vec![1]);
		session.connect().await.unwrap();
		assert!(session.is_connected());

		session.disconnect();
		assert_eq!(session.status(), ConnectionStatus::Disconnected);
	}
}
