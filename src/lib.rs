//! Quad Client Library
//!
//! A headless client for the Quad token and liquidity-staking protocol:
//! role-based contract discovery, normalized read models for balances,
//! staking state and sale progress, a periodic refresh poller, a price feed,
//! and transaction submission through a wallet session.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::Address;
use thiserror::Error;
use tracing::{info, warn};

// Core domain types - the most commonly used types
pub use quad_types::{
	chrono,
	// External dependencies for convenience
	serde_json,
	from_wei,
	to_wei,
	AmountError,
	BackingPair,
	// Error types
	ChainError,
	ChainResult,
	FeeAnalytic,
	InterfaceShape,
	Network,
	Provider,
	// Primary domain entities
	Remote,
	Role,
	SubgraphError,
	TransactionRequest,
	TxReceipt,
	VaultUserData,
};

// Chain layer
pub use quad_chain::{
	ConnectionStatus, ContractCache, ContractHandle, HttpProvider, RoleRegistry, SubgraphClient,
	WalletSession,
};

// Service layer
pub use quad_service::{
	PollHandle, SaleActions, SaleService, TokenActions, TokenService, VaultActions, VaultService,
};

// Config
pub use quad_config::{init_tracing, load_config, log_startup, Settings};

// Module aliases for direct access to the underlying crates
pub mod types {
	pub use quad_types::*;
}

pub mod chain {
	pub use quad_chain::*;
}

pub mod service {
	pub use quad_service::*;
}

pub mod config {
	pub use quad_config::*;
}

pub mod mocks;

/// Errors raised while constructing a [`QuadClient`].
#[derive(Debug, Error)]
pub enum BuildError {
	#[error("invalid discovery address: {0}")]
	InvalidDiscoveryAddress(String),

	#[error("invalid rpc endpoint: {0}")]
	InvalidEndpoint(String),

	#[error("invalid subgraph endpoint: {0}")]
	InvalidSubgraphEndpoint(String),
}

/// Builder pattern for configuring the client
///
/// Settings are threaded explicitly from here through every layer; nothing
/// reads module-level state. A custom provider can be injected for tests.
#[derive(Default)]
pub struct QuadClientBuilder {
	settings: Option<Settings>,
	provider: Option<Arc<dyn Provider>>,
}

impl QuadClientBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Use the given provider instead of constructing one from the settings.
	pub fn with_provider(mut self, provider: Arc<dyn Provider>) -> Self {
		self.provider = Some(provider);
		self
	}

	pub fn build(self) -> Result<QuadClient, BuildError> {
		let settings = self.settings.unwrap_or_default();

		let provider: Option<Arc<dyn Provider>> = match self.provider {
			Some(injected) => Some(injected),
			None if settings.rpc.endpoint.is_empty() => None,
			None => {
				let http = HttpProvider::new(&settings.rpc)
					.map_err(|err| BuildError::InvalidEndpoint(err.to_string()))?;
				Some(Arc::new(http))
			},
		};

		let session = Arc::new(match provider {
			Some(provider) => {
				WalletSession::new(provider, settings.network.allowed_chain_ids.clone())
			},
			None => {
				info!("no provider endpoint configured; client stays in missing-provider state");
				WalletSession::detached(settings.network.allowed_chain_ids.clone())
			},
		});

		let discovery = if settings.discovery.address.is_empty() {
			warn!("discovery address not configured; role resolution will fail");
			Address::ZERO
		} else {
			Address::from_str(&settings.discovery.address)
				.map_err(|_| BuildError::InvalidDiscoveryAddress(settings.discovery.address.clone()))?
		};

		let cache = ContractCache::new();
		let registry = Arc::new(RoleRegistry::new(session.clone(), discovery, cache.clone()));
		let subgraph = Arc::new(
			SubgraphClient::new(&settings.subgraph)
				.map_err(|err| BuildError::InvalidSubgraphEndpoint(err.to_string()))?,
		);

		let tokens = TokenService::new(session.clone(), registry.clone(), cache.clone());
		let vault = VaultService::new(session.clone(), registry.clone());
		let sale = SaleService::new(
			session.clone(),
			registry.clone(),
			tokens.clone(),
			subgraph.clone(),
		);

		Ok(QuadClient {
			settings,
			session,
			registry,
			cache,
			subgraph,
			tokens,
			vault,
			sale,
		})
	}
}

/// The assembled client: wallet session, role registry, and the read-model
/// and action services over them.
pub struct QuadClient {
	settings: Settings,
	session: Arc<WalletSession>,
	registry: Arc<RoleRegistry>,
	cache: ContractCache,
	subgraph: Arc<SubgraphClient>,
	tokens: TokenService,
	vault: VaultService,
	sale: SaleService,
}

impl QuadClient {
	/// Activate the wallet session. A change of account or chain invalidates
	/// every cached handle and role resolution.
	pub async fn connect(&self) -> ChainResult<ConnectionStatus> {
		let before = self.session.status();
		let status = self.session.connect().await?;
		if status != before {
			self.registry.invalidate();
		}
		Ok(status)
	}

	/// Deactivate the session and drop all cached resolutions.
	pub fn disconnect(&self) {
		self.session.disconnect();
		self.registry.invalidate();
	}

	pub fn status(&self) -> ConnectionStatus {
		self.session.status()
	}

	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	/// The configured refresh cadence for polled read models.
	pub fn refresh_interval(&self) -> Duration {
		Duration::from_millis(self.settings.polling.refresh_interval_ms)
	}

	pub fn session(&self) -> &Arc<WalletSession> {
		&self.session
	}

	pub fn registry(&self) -> &Arc<RoleRegistry> {
		&self.registry
	}

	pub fn contract_cache(&self) -> &ContractCache {
		&self.cache
	}

	pub fn subgraph(&self) -> &Arc<SubgraphClient> {
		&self.subgraph
	}

	pub fn tokens(&self) -> &TokenService {
		&self.tokens
	}

	pub fn vault(&self) -> &VaultService {
		&self.vault
	}

	pub fn sale(&self) -> &SaleService {
		&self.sale
	}
}

impl std::fmt::Debug for QuadClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("QuadClient")
			.field("status", &self.session.status())
			.field("cached_handles", &self.cache.len())
			.finish()
	}
}
