//! Token and liquidity-pair models

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// The two tokens backing a liquidity pool.
///
/// Only ever constructed once both sides are known; a partially fetched pair
/// is not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackingPair {
	pub token0: Address,
	pub token1: Address,
}

impl BackingPair {
	pub fn new(token0: Address, token1: Address) -> Self {
		Self { token0, token1 }
	}

	/// The side of the pair that is not the given token, if the token is one
	/// of the two sides at all.
	pub fn counterpart(&self, token: Address) -> Option<Address> {
		if token == self.token0 {
			Some(self.token1)
		} else if token == self.token1 {
			Some(self.token0)
		} else {
			None
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;

	#[test]
	fn test_counterpart() {
		let a = address!("00000000000000000000000000000000000000aa");
		let b = address!("00000000000000000000000000000000000000bb");
		let c = address!("00000000000000000000000000000000000000cc");

		let pair = BackingPair::new(a, b);
		assert_eq!(pair.counterpart(a), Some(b));
		assert_eq!(pair.counterpart(b), Some(a));
		assert_eq!(pair.counterpart(c), None);
	}
}
