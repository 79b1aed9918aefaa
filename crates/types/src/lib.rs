//! Quad Types
//!
//! Shared domain models for the Quad protocol client.
//! This crate contains the loading-state union, role definitions, amount
//! conversion, and the provider abstraction the rest of the workspace builds on.

pub mod amount;
pub mod errors;
pub mod network;
pub mod provider;
pub mod remote;
pub mod role;
pub mod token;
pub mod vault;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

// Re-export commonly used types for convenience
pub use amount::{from_wei, to_wei, AmountError, MAX_APPROVAL, WEI_PER_TOKEN};
pub use errors::{ChainError, ChainResult, SubgraphError, SubgraphResult};
pub use network::Network;
pub use provider::{Provider, TransactionRequest, TxReceipt};
pub use remote::Remote;
pub use role::{InterfaceShape, Role};
pub use token::BackingPair;
pub use vault::{FeeAnalytic, VaultUserData};
