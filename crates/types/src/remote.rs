//! Loading-state union for asynchronously fetched values

use serde::{Deserialize, Serialize};

/// State of an asynchronously fetched value.
///
/// Every read surface in the client yields one of these three states.
/// `Ready` is the only state whose payload may be trusted. `Loading` covers
/// both an in-flight fetch and an unresolved dependency (a wallet that is not
/// connected yet, a contract handle that has not been resolved). `Failed`
/// carries the error of a fetch that completed unsuccessfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum Remote<T> {
	Loading,
	Ready(T),
	Failed(String),
}

impl<T> Remote<T> {
	/// Build from a completed fetch, mapping the error to `Failed`.
	pub fn from_result<E: std::fmt::Display>(result: Result<T, E>) -> Self {
		match result {
			Ok(value) => Remote::Ready(value),
			Err(err) => Remote::Failed(err.to_string()),
		}
	}

	pub fn is_loading(&self) -> bool {
		matches!(self, Remote::Loading)
	}

	pub fn is_ready(&self) -> bool {
		matches!(self, Remote::Ready(_))
	}

	pub fn is_failed(&self) -> bool {
		matches!(self, Remote::Failed(_))
	}

	/// The payload, if and only if the value is `Ready`.
	pub fn ready(&self) -> Option<&T> {
		match self {
			Remote::Ready(value) => Some(value),
			_ => None,
		}
	}

	pub fn into_ready(self) -> Option<T> {
		match self {
			Remote::Ready(value) => Some(value),
			_ => None,
		}
	}

	/// The failure message, if the value is `Failed`.
	pub fn failure(&self) -> Option<&str> {
		match self {
			Remote::Failed(msg) => Some(msg),
			_ => None,
		}
	}

	pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Remote<U> {
		match self {
			Remote::Loading => Remote::Loading,
			Remote::Ready(value) => Remote::Ready(f(value)),
			Remote::Failed(msg) => Remote::Failed(msg),
		}
	}

	/// Join two independently fetched values into one logical unit.
	///
	/// The pair is `Ready` only when both sides are; a failure on either side
	/// fails the pair; otherwise the pair is still loading. Completion order
	/// of the two sides cannot be observed through the result.
	pub fn zip<U>(self, other: Remote<U>) -> Remote<(T, U)> {
		match (self, other) {
			(Remote::Failed(msg), _) | (_, Remote::Failed(msg)) => Remote::Failed(msg),
			(Remote::Ready(a), Remote::Ready(b)) => Remote::Ready((a, b)),
			_ => Remote::Loading,
		}
	}
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for Remote<T> {
	fn from(result: Result<T, E>) -> Self {
		Remote::from_result(result)
	}
}
