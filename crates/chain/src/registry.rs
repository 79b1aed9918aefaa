//! Role registry: resolves semantic roles to contract handles
//!
//! Member addresses come from a single discovery-contract call per role; the
//! result is memoized so a successful resolution transitions state exactly
//! once, no matter how many callers race on it.

use std::sync::Arc;

use alloy_primitives::Address;
use dashmap::DashMap;
use quad_types::{ChainError, InterfaceShape, Remote, Role};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::abi::IDiscovery;
use crate::cache::ContractCache;
use crate::handle::ContractHandle;
use crate::wallet::WalletSession;

pub struct RoleRegistry {
	session: Arc<WalletSession>,
	discovery: Address,
	cache: ContractCache,
	members: DashMap<Role, Arc<OnceCell<Vec<Address>>>>,
}

impl RoleRegistry {
	pub fn new(session: Arc<WalletSession>, discovery: Address, cache: ContractCache) -> Self {
		Self {
			session,
			discovery,
			cache,
			members: DashMap::new(),
		}
	}

	/// Resolve every contract registered under a role.
	///
	/// Returns `Loading` while no provider is available, `Ready` with one
	/// handle per member address (possibly none) after a successful discovery
	/// call, and `Failed` when discovery rejects. Failures are not memoized;
	/// a later call retries the discovery.
	pub async fn resolve(&self, role: Role) -> Remote<Vec<Arc<ContractHandle>>> {
		let Some(provider) = self.session.provider() else {
			return Remote::Loading;
		};

		let cell = self
			.members
			.entry(role)
			.or_insert_with(|| Arc::new(OnceCell::new()))
			.clone();

		let members = cell
			.get_or_try_init(|| async {
				let discovery =
					self.cache
						.get_or_bind(&provider, self.discovery, InterfaceShape::Discovery);
				let returned = discovery
					.call(IDiscovery::getRoleMembersCall { role: role.id() })
					.await?;
				debug!(%role, members = returned.members.len(), "resolved role members");
				Ok::<_, ChainError>(returned.members)
			})
			.await;

		match members {
			Ok(addresses) => Remote::Ready(
				addresses
					.iter()
					.map(|address| self.cache.get_or_bind(&provider, *address, role.shape()))
					.collect(),
			),
			Err(err) => {
				warn!(%role, error = %err, "role discovery failed");
				Remote::Failed(err.to_string())
			},
		}
	}

	/// The first handle registered under a role, or `Ready(None)` when the
	/// role has no members. Never an error for an empty role.
	pub async fn resolve_singleton(&self, role: Role) -> Remote<Option<Arc<ContractHandle>>> {
		self.resolve(role)
			.await
			.map(|handles| handles.into_iter().next())
	}

	/// Snapshot of a role's member addresses without triggering a discovery
	/// call: `Loading` until some caller has resolved it.
	pub fn peek(&self, role: Role) -> Remote<Vec<Address>> {
		match self
			.members
			.get(&role)
			.and_then(|cell| cell.get().cloned())
		{
			Some(addresses) => Remote::Ready(addresses),
			None => Remote::Loading,
		}
	}

	/// Forget every resolution and cached handle. Called when the connection
	/// or account changes.
	pub fn invalidate(&self) {
		self.members.clear();
		self.cache.clear();
		debug!("role registry invalidated");
	}
}

impl std::fmt::Debug for RoleRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RoleRegistry")
			.field("discovery", &self.discovery)
			.field("resolved_roles", &self.members.len())
			.finish()
	}
}
