//! Contract handles: an address bound to a call interface and a provider

use std::sync::Arc;

use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolCall;
use quad_types::{ChainError, ChainResult, InterfaceShape, Provider};

/// A resolved binding between a contract address and its call interface.
///
/// Handles are created lazily on first resolution and shared through the
/// [`ContractCache`](crate::ContractCache); they are never persisted.
pub struct ContractHandle {
	address: Address,
	shape: InterfaceShape,
	provider: Arc<dyn Provider>,
}

impl ContractHandle {
	pub(crate) fn bind(provider: Arc<dyn Provider>, address: Address, shape: InterfaceShape) -> Self {
		Self {
			address,
			shape,
			provider,
		}
	}

	pub fn address(&self) -> Address {
		self.address
	}

	pub fn shape(&self) -> InterfaceShape {
		self.shape
	}

	/// Issue a read-only call through the bound provider and decode the
	/// typed return value.
	pub async fn call<C>(&self, call: C) -> ChainResult<C::Return>
	where
		C: SolCall + Send,
	{
		let data = Bytes::from(call.abi_encode());
		let raw = self.provider.call(self.address, data).await?;
		C::abi_decode_returns(&raw, true).map_err(|err| ChainError::Decode {
			method: C::SIGNATURE,
			reason: err.to_string(),
		})
	}

	/// ABI-encode a method call for transaction submission.
	pub fn encode<C: SolCall>(call: &C) -> Bytes {
		Bytes::from(call.abi_encode())
	}
}

impl PartialEq for ContractHandle {
	fn eq(&self, other: &Self) -> bool {
		self.address == other.address && self.shape == other.shape
	}
}

impl Eq for ContractHandle {}

impl std::fmt::Debug for ContractHandle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ContractHandle")
			.field("address", &self.address)
			.field("shape", &self.shape)
			.finish()
	}
}
