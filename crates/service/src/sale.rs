//! Liquidity-generation-event read models and actions

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use quad_chain::abi::ISale;
use quad_chain::{ContractHandle, RoleRegistry, SubgraphClient, WalletSession};
use quad_types::amount::{from_wei, to_wei};
use quad_types::{ChainResult, Provider, Remote, Role, TransactionRequest, TxReceipt};

use crate::poller::{self, PollHandle};
use crate::tokens::TokenService;

/// The raise is split evenly across this many liquidity pools.
const POOL_COUNT: f64 = 4.0;

/// Read accessors for the sale (initial LGE) contract.
#[derive(Clone, Debug)]
pub struct SaleService {
	session: Arc<WalletSession>,
	registry: Arc<RoleRegistry>,
	tokens: TokenService,
	subgraph: Arc<SubgraphClient>,
}

impl SaleService {
	pub fn new(
		session: Arc<WalletSession>,
		registry: Arc<RoleRegistry>,
		tokens: TokenService,
		subgraph: Arc<SubgraphClient>,
	) -> Self {
		Self {
			session,
			registry,
			tokens,
			subgraph,
		}
	}

	/// Total ETH contributed to the sale so far: the native balance of the
	/// sale contract.
	pub async fn total_contributed_eth(&self) -> Remote<String> {
		let Some(provider) = self.session.provider() else {
			return Remote::Loading;
		};
		match self.sale().await {
			Remote::Ready(sale) => {
				Remote::from_result(provider.get_balance(sale.address()).await.map(from_wei))
			},
			Remote::Loading => Remote::Loading,
			Remote::Failed(msg) => Remote::Failed(msg),
		}
	}

	/// ETH the connected account has contributed.
	pub async fn user_contributed_eth(&self) -> Remote<String> {
		let Some(account) = self.session.account() else {
			return Remote::Loading;
		};
		match self.sale().await {
			Remote::Ready(sale) => Remote::from_result(
				sale.call(ISale::_contributionsCall { account })
					.await
					.map(|ret| from_wei(ret.contributed)),
			),
			Remote::Loading => Remote::Loading,
			Remote::Failed(msg) => Remote::Failed(msg),
		}
	}

	/// ETH destined for each of the liquidity pools the raise seeds.
	pub async fn eth_per_pool(&self) -> Remote<String> {
		match self.total_contributed_eth().await {
			Remote::Ready(total) => match total.parse::<f64>() {
				Ok(value) => Remote::Ready((value / POOL_COUNT).to_string()),
				Err(_) => Remote::Failed(format!("unparseable contribution total: {total}")),
			},
			other => other,
		}
	}

	/// Projected token price in USD at the current raise level: supply per
	/// pool priced against contributed ETH, quoted through the feed's
	/// ETH/USD price.
	pub async fn expected_token_price(&self) -> Remote<String> {
		let joined = self
			.eth_per_pool()
			.await
			.zip(self.tokens.total_supply().await);
		let (per_pool, supply) = match joined {
			Remote::Ready(pair) => pair,
			Remote::Loading => return Remote::Loading,
			Remote::Failed(msg) => return Remote::Failed(msg),
		};
		let eth_price = match self.subgraph.eth_price().await {
			Ok(price) => price,
			Err(err) => return Remote::Failed(err.to_string()),
		};

		let (Ok(per_pool), Ok(supply)) = (per_pool.parse::<f64>(), supply.parse::<f64>()) else {
			return Remote::Failed("unparseable sale amounts".to_string());
		};
		if per_pool == 0.0 {
			return Remote::Failed("sale has no contributions yet".to_string());
		}

		let supply_per_pool = supply / POOL_COUNT;
		let price = supply_per_pool / per_pool * eth_price;
		Remote::Ready(price.to_string())
	}

	/// When the sale closes, or `Ready(None)` while no sale contract is
	/// registered.
	pub async fn end_timestamp(&self) -> Remote<Option<DateTime<Utc>>> {
		match self.registry.resolve_singleton(Role::Sale).await {
			Remote::Ready(Some(sale)) => match sale.call(ISale::_endTimestampCall {}).await {
				Ok(ret) => {
					let parsed = i64::try_from(ret.timestamp)
						.ok()
						.and_then(|secs| DateTime::from_timestamp(secs, 0));
					match parsed {
						Some(when) => Remote::Ready(Some(when)),
						None => Remote::Failed(format!("timestamp out of range: {}", ret.timestamp)),
					}
				},
				Err(err) => Remote::Failed(err.to_string()),
			},
			Remote::Ready(None) => Remote::Ready(None),
			Remote::Loading => Remote::Loading,
			Remote::Failed(msg) => Remote::Failed(msg),
		}
	}

	/// LP tokens the connected account can claim once the sale has closed.
	pub async fn claimable_lps(&self) -> Remote<String> {
		if self.session.account().is_none() {
			return Remote::Loading;
		}
		match self.sale().await {
			Remote::Ready(sale) => Remote::from_result(
				sale.call(ISale::getClaimableTokensCall {})
					.await
					.map(|ret| from_wei(ret.claimable)),
			),
			Remote::Loading => Remote::Loading,
			Remote::Failed(msg) => Remote::Failed(msg),
		}
	}

	/// Keep the total raised fresh on a fixed period.
	pub fn watch_total_contributed(&self, period: Duration) -> PollHandle<String> {
		let service = self.clone();
		poller::spawn(period, move || {
			let service = service.clone();
			async move { service.total_contributed_eth().await }
		})
	}

	/// Keep the account's contribution fresh on a fixed period.
	pub fn watch_user_contributed(&self, period: Duration) -> PollHandle<String> {
		let service = self.clone();
		poller::spawn(period, move || {
			let service = service.clone();
			async move { service.user_contributed_eth().await }
		})
	}

	/// Write accessors, available once the wallet is connected and the sale
	/// contract is resolved.
	pub async fn actions(&self) -> Remote<SaleActions> {
		let (Some(provider), Some(account)) = (self.session.provider(), self.session.account())
		else {
			return Remote::Loading;
		};
		match self.sale().await {
			Remote::Ready(sale) => Remote::Ready(SaleActions {
				provider,
				account,
				sale: sale.address(),
			}),
			Remote::Loading => Remote::Loading,
			Remote::Failed(msg) => Remote::Failed(msg),
		}
	}

	async fn sale(&self) -> Remote<Arc<ContractHandle>> {
		match self.registry.resolve_singleton(Role::Sale).await {
			Remote::Ready(Some(handle)) => Remote::Ready(handle),
			Remote::Ready(None) | Remote::Loading => Remote::Loading,
			Remote::Failed(msg) => Remote::Failed(msg),
		}
	}
}

/// Sale write accessors bound to the connected account.
#[derive(Clone)]
pub struct SaleActions {
	provider: Arc<dyn Provider>,
	account: Address,
	sale: Address,
}

impl SaleActions {
	/// Contribute ETH to the raise. The amount is a decimal string and rides
	/// along as the transaction's native value.
	pub async fn contribute(&self, eth_amount: &str) -> ChainResult<TxReceipt> {
		let value = to_wei(eth_amount)?;
		self.provider
			.send_transaction(TransactionRequest {
				from: self.account,
				to: self.sale,
				data: ContractHandle::encode(&ISale::contributeCall {}),
				value: Some(value),
			})
			.await
	}

	/// Claim the LP tokens owed after the sale has closed.
	pub async fn claim_lps(&self) -> ChainResult<TxReceipt> {
		self.provider
			.send_transaction(TransactionRequest {
				from: self.account,
				to: self.sale,
				data: ContractHandle::encode(&ISale::claimTokensCall {}),
				value: None,
			})
			.await
	}
}
