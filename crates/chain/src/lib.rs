//! Quad Chain
//!
//! Everything that touches an external endpoint: the JSON-RPC provider, the
//! wallet session, typed contract interfaces, the contract cache, the role
//! registry and the subgraph price feed.

pub mod abi;
pub mod cache;
pub mod handle;
pub mod provider;
pub mod registry;
pub mod subgraph;
pub mod wallet;

pub use cache::ContractCache;
pub use handle::ContractHandle;
pub use provider::HttpProvider;
pub use registry::RoleRegistry;
pub use subgraph::SubgraphClient;
pub use wallet::{ConnectionStatus, WalletSession};

pub use quad_types::{ChainError, ChainResult, Provider, TransactionRequest, TxReceipt};
