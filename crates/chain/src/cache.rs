//! Contract handle cache keyed by (address, interface shape)
//!
//! Repeated lookups return the same shared handle instead of reconstructing
//! the binding.

use std::sync::Arc;

use alloy_primitives::Address;
use dashmap::DashMap;
use quad_types::{InterfaceShape, Provider};
use tracing::debug;

use crate::handle::ContractHandle;

/// Thread-safe cache of constructed contract handles.
#[derive(Clone, Debug, Default)]
pub struct ContractCache {
	handles: Arc<DashMap<(Address, InterfaceShape), Arc<ContractHandle>>>,
}

impl ContractCache {
	pub fn new() -> Self {
		Self {
			handles: Arc::new(DashMap::new()),
		}
	}

	/// Get the cached handle for this binding, constructing it on first use.
	pub fn get_or_bind(
		&self,
		provider: &Arc<dyn Provider>,
		address: Address,
		shape: InterfaceShape,
	) -> Arc<ContractHandle> {
		if let Some(existing) = self.handles.get(&(address, shape)) {
			return existing.clone();
		}

		let handle = Arc::new(ContractHandle::bind(provider.clone(), address, shape));

		// Entry API to resolve the construction race in favor of one handle
		use dashmap::mapref::entry::Entry;
		match self.handles.entry((address, shape)) {
			Entry::Occupied(entry) => entry.get().clone(),
			Entry::Vacant(entry) => {
				debug!(%address, ?shape, "bound new contract handle");
				entry.insert(handle.clone());
				handle
			},
		}
	}

	pub fn len(&self) -> usize {
		self.handles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.handles.is_empty()
	}

	/// Drop every cached handle. Called when the connection changes, so stale
	/// bindings cannot outlive the provider they were created against.
	pub fn clear(&self) {
		let count = self.handles.len();
		self.handles.clear();
		debug!(count, "cleared contract cache");
	}
}
