//! Exact conversion between 10^18 fixed-point integers and decimal strings

use alloy_primitives::U256;
use thiserror::Error;

/// Scale of every fixed-point amount the protocol contracts return.
pub const WEI_PER_TOKEN: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Unlimited ERC-20 allowance, 2^256 - 1.
pub const MAX_APPROVAL: U256 = U256::MAX;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
	#[error("amount is empty")]
	Empty,

	#[error("invalid digit in amount: {0}")]
	InvalidDigit(String),

	#[error("more than 18 fractional digits: {0}")]
	TooManyDecimals(String),

	#[error("amount does not fit in 256 bits: {0}")]
	Overflow(String),
}

/// Convert a fixed-point integer to its decimal-string representation.
///
/// The result is exactly `value / 10^18` with no precision loss beyond the
/// string formatting itself: integer quotient, then the remainder zero-padded
/// to 18 digits with trailing zeros trimmed.
pub fn from_wei(value: U256) -> String {
	let (quot, rem) = value.div_rem(WEI_PER_TOKEN);
	if rem.is_zero() {
		return quot.to_string();
	}

	let mut frac = format!("{:0>18}", rem);
	while frac.ends_with('0') {
		frac.pop();
	}
	format!("{quot}.{frac}")
}

/// Parse a decimal string into a fixed-point integer at 10^18 scale.
///
/// Accepts at most 18 fractional digits; a missing integer or fractional part
/// is treated as zero ("5.", ".5").
pub fn to_wei(amount: &str) -> Result<U256, AmountError> {
	let trimmed = amount.trim();
	if trimmed.is_empty() || trimmed == "." {
		return Err(AmountError::Empty);
	}

	let (int_part, frac_part) = match trimmed.split_once('.') {
		Some((int_part, frac_part)) => (int_part, frac_part),
		None => (trimmed, ""),
	};

	if frac_part.len() > 18 {
		return Err(AmountError::TooManyDecimals(trimmed.to_string()));
	}
	if !int_part.chars().all(|c| c.is_ascii_digit()) || !frac_part.chars().all(|c| c.is_ascii_digit())
	{
		return Err(AmountError::InvalidDigit(trimmed.to_string()));
	}

	let digits = format!("{}{:0<18}", int_part, frac_part);
	U256::from_str_radix(&digits, 10).map_err(|_| AmountError::Overflow(trimmed.to_string()))
}
