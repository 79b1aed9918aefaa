//! Vault read models and staking actions

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, Bytes, U256};
use quad_chain::abi::IVault;
use quad_chain::{ContractHandle, RoleRegistry, WalletSession};
use quad_types::amount::to_wei;
use quad_types::{
	ChainResult, FeeAnalytic, Provider, Remote, Role, TransactionRequest, TxReceipt, VaultUserData,
};

use crate::poller::{self, PollHandle};

/// Read accessors for the staking vault.
#[derive(Clone, Debug)]
pub struct VaultService {
	session: Arc<WalletSession>,
	registry: Arc<RoleRegistry>,
}

impl VaultService {
	pub fn new(session: Arc<WalletSession>, registry: Arc<RoleRegistry>) -> Self {
		Self { session, registry }
	}

	/// The connected account's position for one wrapped-LP token, normalized.
	pub async fn user_data(&self, token: Address) -> Remote<VaultUserData> {
		let Some(account) = self.session.account() else {
			return Remote::Loading;
		};
		match self.vault().await {
			Remote::Ready(vault) => {
				match vault.call(IVault::getUserDataCall { token, account }).await {
					Ok(ret) => Remote::Ready(VaultUserData::from_raw(
						ret.stakedAmount,
						ret.paidAmount,
						ret.pendingRewards,
						ret.lockedTokens,
					)),
					Err(err) => Remote::Failed(err.to_string()),
				}
			},
			Remote::Loading => Remote::Loading,
			Remote::Failed(msg) => Remote::Failed(msg),
		}
	}

	/// Index of the most recent fee-analytics window.
	pub async fn current_analytic_index(&self) -> Remote<u64> {
		match self.vault().await {
			Remote::Ready(vault) => match vault.call(IVault::currentAnalyticIndexCall {}).await {
				Ok(ret) => match u64::try_from(ret.index) {
					Ok(index) => Remote::Ready(index),
					Err(_) => Remote::Failed(format!("analytic index out of range: {}", ret.index)),
				},
				Err(err) => Remote::Failed(err.to_string()),
			},
			Remote::Loading => Remote::Loading,
			Remote::Failed(msg) => Remote::Failed(msg),
		}
	}

	/// Aggregated fee analytics over a window of indices.
	pub async fn analytics(&self, start_index: u64, end_index: u64) -> Remote<FeeAnalytic> {
		match self.vault().await {
			Remote::Ready(vault) => {
				let call = IVault::getMultipleAnalyticsCall {
					startIndex: U256::from(start_index),
					endIndex: U256::from(end_index),
				};
				match vault.call(call).await {
					Ok(ret) => Remote::from_result(FeeAnalytic::from_raw(
						ret.startBlock,
						ret.endBlock,
						ret.feeAmount,
					)),
					Err(err) => Remote::Failed(err.to_string()),
				}
			},
			Remote::Loading => Remote::Loading,
			Remote::Failed(msg) => Remote::Failed(msg),
		}
	}

	/// Keep the user's vault position fresh on a fixed period.
	pub fn watch_user_data(&self, token: Address, period: Duration) -> PollHandle<VaultUserData> {
		let service = self.clone();
		poller::spawn(period, move || {
			let service = service.clone();
			async move { service.user_data(token).await }
		})
	}

	/// Write accessors, available once the wallet is connected and the vault
	/// is resolved.
	pub async fn actions(&self) -> Remote<VaultActions> {
		let (Some(provider), Some(account)) = (self.session.provider(), self.session.account())
		else {
			return Remote::Loading;
		};
		match self.vault().await {
			Remote::Ready(vault) => Remote::Ready(VaultActions {
				provider,
				account,
				vault: vault.address(),
			}),
			Remote::Loading => Remote::Loading,
			Remote::Failed(msg) => Remote::Failed(msg),
		}
	}

	async fn vault(&self) -> Remote<Arc<ContractHandle>> {
		match self.registry.resolve_singleton(Role::Vault).await {
			Remote::Ready(Some(handle)) => Remote::Ready(handle),
			Remote::Ready(None) | Remote::Loading => Remote::Loading,
			Remote::Failed(msg) => Remote::Failed(msg),
		}
	}
}

/// Vault write accessors bound to the connected account.
///
/// Amounts are decimal strings; submission failures propagate directly with
/// no retry.
#[derive(Clone)]
pub struct VaultActions {
	provider: Arc<dyn Provider>,
	account: Address,
	vault: Address,
}

impl VaultActions {
	/// Stake an already-wrapped LP amount. Assumes the wrapped tokens are
	/// approved for the vault.
	pub async fn deposit(&self, token: Address, amount: &str) -> ChainResult<TxReceipt> {
		let amount = to_wei(amount)?;
		self.submit(ContractHandle::encode(&IVault::depositCall { token, amount }))
			.await
	}

	/// Withdraw a staked amount.
	pub async fn withdraw(&self, token: Address, amount: &str) -> ChainResult<TxReceipt> {
		let amount = to_wei(amount)?;
		self.submit(ContractHandle::encode(&IVault::withdrawCall { token, amount }))
			.await
	}

	/// Collect pending rewards without unstaking: a zero-amount withdraw.
	pub async fn claim(&self, token: Address) -> ChainResult<TxReceipt> {
		self.submit(ContractHandle::encode(&IVault::withdrawCall {
			token,
			amount: U256::ZERO,
		}))
		.await
	}

	/// Wrap raw LP tokens and stake them in one transaction. Assumes the LP
	/// tokens are approved.
	pub async fn wrap_and_deposit(&self, token: Address, amount: &str) -> ChainResult<TxReceipt> {
		let amount = to_wei(amount)?;
		self.submit(ContractHandle::encode(&IVault::wrapAndDepositCall {
			token,
			amount,
		}))
		.await
	}

	async fn submit(&self, data: Bytes) -> ChainResult<TxReceipt> {
		self.provider
			.send_transaction(TransactionRequest {
				from: self.account,
				to: self.vault,
				data,
				value: None,
			})
			.await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_support::{connected, detached, ScriptedChain, ACCOUNT};
	use alloy_primitives::address;
	use alloy_sol_types::{SolCall, SolValue};
	use quad_chain::abi::IDiscovery;

	const VAULT: Address = address!("00000000000000000000000000000000000000e1");
	const WLP: Address = address!("00000000000000000000000000000000000000e2");

	fn with_vault_registered(chain: ScriptedChain) -> ScriptedChain {
		chain.respond(
			IDiscovery::getRoleMembersCall::SELECTOR,
			Ok(alloy_primitives::Bytes::from(vec![VAULT].abi_encode())),
		)
	}

	#[tokio::test]
	async fn test_user_data_is_normalized() {
		let raw = (
			U256::from(1_500_000_000_000_000_000u64),
			U256::ZERO,
			U256::from(250_000_000_000_000_000u64),
			U256::from(3_000_000_000_000_000_000u64),
		);
		let chain = with_vault_registered(ScriptedChain::new()).respond(
			IVault::getUserDataCall::SELECTOR,
			Ok(alloy_primitives::Bytes::from(raw.abi_encode())),
		);

		let (_, session, registry, _) = connected(chain).await;
		let service = VaultService::new(session, registry);

		let data = service.user_data(WLP).await.into_ready().unwrap();
		assert_eq!(data.staked_amount, "1.5");
		assert_eq!(data.paid_amount, "0");
		assert_eq!(data.pending_rewards, "0.25");
		assert_eq!(data.locked_tokens, "3");
	}

	#[tokio::test]
	async fn test_user_data_without_wallet_stays_loading() {
		let (session, registry, _) = detached();
		let service = VaultService::new(session, registry);

		assert!(service.user_data(WLP).await.is_loading());
		assert!(service.actions().await.is_loading());
	}

	#[tokio::test]
	async fn test_analytics_window() {
		let raw = (U256::from(100u64), U256::from(200u64), U256::from(500_000_000_000_000_000u64));
		let chain = with_vault_registered(ScriptedChain::new()).respond(
			IVault::getMultipleAnalyticsCall::SELECTOR,
			Ok(alloy_primitives::Bytes::from(raw.abi_encode())),
		);

		let (_, session, registry, _) = connected(chain).await;
		let service = VaultService::new(session, registry);

		let analytic = service.analytics(0, 3).await.into_ready().unwrap();
		assert_eq!(analytic.start_block, 100);
		assert_eq!(analytic.end_block, 200);
		assert_eq!(analytic.fee_amount, "0.5");
	}

	#[tokio::test]
	async fn test_claim_is_a_zero_amount_withdraw() {
		let chain = with_vault_registered(ScriptedChain::new());
		let (chain, session, registry, _) = connected(chain).await;
		let service = VaultService::new(session, registry);

		let actions = service.actions().await.into_ready().unwrap();
		actions.claim(WLP).await.unwrap();

		let sent = chain.sent();
		assert_eq!(sent.len(), 1);
		assert_eq!(sent[0].from, ACCOUNT);
		assert_eq!(sent[0].to, VAULT);
		let expected = IVault::withdrawCall {
			token: WLP,
			amount: U256::ZERO,
		};
		assert_eq!(sent[0].data, ContractHandle::encode(&expected));
	}

	#[tokio::test]
	async fn test_deposit_rejects_malformed_amounts() {
		let chain = with_vault_registered(ScriptedChain::new());
		let (chain, session, registry, _) = connected(chain).await;
		let service = VaultService::new(session, registry);

		let actions = service.actions().await.into_ready().unwrap();
		assert!(actions.deposit(WLP, "not-a-number").await.is_err());
		assert!(chain.sent().is_empty());
	}

	#[tokio::test]
	async fn test_deposit_encodes_scaled_amount() {
		let chain = with_vault_registered(ScriptedChain::new());
		let (chain, session, registry, _) = connected(chain).await;
		let service = VaultService::new(session, registry);

		let actions = service.actions().await.into_ready().unwrap();
		actions.deposit(WLP, "1.5").await.unwrap();

		let expected = IVault::depositCall {
			token: WLP,
			amount: U256::from(1_500_000_000_000_000_000u64),
		};
		assert_eq!(chain.sent()[0].data, ContractHandle::encode(&expected));
	}
}
