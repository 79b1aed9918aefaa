//! Token read models and the approve action

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::Address;
use futures::stream::{self, StreamExt};
use quad_chain::abi::{ILiquidityPair, IToken, IWrappedLp};
use quad_chain::{ContractCache, ContractHandle, RoleRegistry, WalletSession};
use quad_types::amount::{from_wei, MAX_APPROVAL};
use quad_types::{
	BackingPair, ChainResult, InterfaceShape, Provider, Remote, Role, TransactionRequest, TxReceipt,
};

use crate::poller::{self, PollHandle};

/// Read accessors for token balances, metadata and backing pairs.
///
/// Every read yields `Loading` while a required dependency (provider,
/// account, resolved handle) is missing, and `Failed` when a call rejects.
#[derive(Clone, Debug)]
pub struct TokenService {
	session: Arc<WalletSession>,
	registry: Arc<RoleRegistry>,
	cache: ContractCache,
}

impl TokenService {
	pub fn new(session: Arc<WalletSession>, registry: Arc<RoleRegistry>, cache: ContractCache) -> Self {
		Self {
			session,
			registry,
			cache,
		}
	}

	/// Addresses of every wrapped-LP token registered with the protocol.
	pub async fn wlp_addresses(&self) -> Remote<Vec<Address>> {
		self.registry
			.resolve(Role::WrappedLp)
			.await
			.map(|handles| handles.iter().map(|handle| handle.address()).collect())
	}

	pub async fn token_name(&self, token: Address) -> Remote<String> {
		let Some(provider) = self.session.provider() else {
			return Remote::Loading;
		};
		let handle = self.cache.get_or_bind(&provider, token, InterfaceShape::Token);
		Remote::from_result(handle.call(IToken::nameCall {}).await.map(|ret| ret.name))
	}

	pub async fn token_symbol(&self, token: Address) -> Remote<String> {
		let Some(provider) = self.session.provider() else {
			return Remote::Loading;
		};
		let handle = self.cache.get_or_bind(&provider, token, InterfaceShape::Token);
		Remote::from_result(handle.call(IToken::symbolCall {}).await.map(|ret| ret.symbol))
	}

	/// The liquidity pair a wrapped-LP token is backed by.
	pub async fn backing_lp(&self, wlp: Address) -> Remote<Address> {
		let Some(provider) = self.session.provider() else {
			return Remote::Loading;
		};
		let handle = self
			.cache
			.get_or_bind(&provider, wlp, InterfaceShape::WrappedLp);
		Remote::from_result(
			handle
				.call(IWrappedLp::_lpTokenCall {})
				.await
				.map(|ret| ret.lpToken),
		)
	}

	/// The two tokens backing a liquidity pair.
	///
	/// The two reads are one logical unit: they run as an explicit join, so a
	/// partial pair is never observable and either completion order yields
	/// the same result. Either side failing fails the pair.
	pub async fn backing_tokens(&self, lp: Address) -> Remote<BackingPair> {
		let Some(provider) = self.session.provider() else {
			return Remote::Loading;
		};
		let handle = self
			.cache
			.get_or_bind(&provider, lp, InterfaceShape::LiquidityPair);

		let joined = tokio::try_join!(
			handle.call(ILiquidityPair::token0Call {}),
			handle.call(ILiquidityPair::token1Call {}),
		);
		Remote::from_result(joined.map(|(t0, t1)| BackingPair::new(t0.token, t1.token)))
	}

	/// Balance of an ERC-20 token held by the connected account, normalized
	/// to a decimal string. `Loading` for as long as no wallet is connected.
	pub async fn token_balance(&self, token: Address) -> Remote<String> {
		let (Some(provider), Some(account)) = (self.session.provider(), self.session.account())
		else {
			return Remote::Loading;
		};
		let handle = self.cache.get_or_bind(&provider, token, InterfaceShape::Token);
		Remote::from_result(
			handle
				.call(IToken::balanceOfCall { owner: account })
				.await
				.map(|ret| from_wei(ret.balance)),
		)
	}

	/// Balance of the protocol token itself, resolved through the registry.
	pub async fn quad_balance(&self) -> Remote<String> {
		match self.registry.resolve_singleton(Role::Token).await {
			Remote::Ready(Some(handle)) => self.token_balance(handle.address()).await,
			Remote::Ready(None) | Remote::Loading => Remote::Loading,
			Remote::Failed(msg) => Remote::Failed(msg),
		}
	}

	/// Native balance of the connected account.
	pub async fn eth_balance(&self) -> Remote<String> {
		let (Some(provider), Some(account)) = (self.session.provider(), self.session.account())
		else {
			return Remote::Loading;
		};
		Remote::from_result(provider.get_balance(account).await.map(from_wei))
	}

	/// Total supply of the protocol token.
	pub async fn total_supply(&self) -> Remote<String> {
		match self.registry.resolve_singleton(Role::Token).await {
			Remote::Ready(Some(handle)) => Remote::from_result(
				handle
					.call(IToken::totalSupplyCall {})
					.await
					.map(|ret| from_wei(ret.supply)),
			),
			Remote::Ready(None) | Remote::Loading => Remote::Loading,
			Remote::Failed(msg) => Remote::Failed(msg),
		}
	}

	/// Balances of every wrapped-LP token held by the connected account,
	/// keyed by token address. One logical unit: partial results are not
	/// observable.
	pub async fn wlp_balances(&self) -> Remote<HashMap<Address, String>> {
		let addresses = match self.wlp_addresses().await {
			Remote::Ready(addresses) => addresses,
			Remote::Loading => return Remote::Loading,
			Remote::Failed(msg) => return Remote::Failed(msg),
		};
		if self.session.account().is_none() {
			return Remote::Loading;
		}

		let fetches = addresses.into_iter().map(|address| {
			let service = self.clone();
			async move { (address, service.token_balance(address).await) }
		});
		let results: Vec<(Address, Remote<String>)> =
			stream::iter(fetches).buffer_unordered(4).collect().await;

		let mut balances = HashMap::new();
		for (address, balance) in results {
			match balance {
				Remote::Ready(value) => {
					balances.insert(address, value);
				},
				Remote::Loading => return Remote::Loading,
				Remote::Failed(msg) => return Remote::Failed(msg),
			}
		}
		Remote::Ready(balances)
	}

	/// Keep a token balance fresh on a fixed period.
	pub fn watch_token_balance(&self, token: Address, period: Duration) -> PollHandle<String> {
		let service = self.clone();
		poller::spawn(period, move || {
			let service = service.clone();
			async move { service.token_balance(token).await }
		})
	}

	/// Write accessors, available once the wallet is connected.
	pub fn actions(&self) -> Remote<TokenActions> {
		let (Some(provider), Some(account)) = (self.session.provider(), self.session.account())
		else {
			return Remote::Loading;
		};
		Remote::Ready(TokenActions { provider, account })
	}
}

/// Token write accessors bound to the connected account.
#[derive(Clone)]
pub struct TokenActions {
	provider: Arc<dyn Provider>,
	account: Address,
}

impl TokenActions {
	/// Grant the spender an unlimited allowance on the token.
	pub async fn approve(&self, token: Address, spender: Address) -> ChainResult<TxReceipt> {
		let data = ContractHandle::encode(&IToken::approveCall {
			spender,
			amount: MAX_APPROVAL,
		});
		self.provider
			.send_transaction(TransactionRequest {
				from: self.account,
				to: token,
				data,
				value: None,
			})
			.await
	}
}
