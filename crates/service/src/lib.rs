//! Quad Service
//!
//! Read-model and action services over the resolved protocol contracts, plus
//! the periodic poller that keeps read models fresh.

pub mod poller;
pub mod sale;
pub mod tokens;
pub mod vault;

#[cfg(test)]
pub(crate) mod test_support;

pub use poller::{spawn, PollHandle};
pub use sale::{SaleActions, SaleService};
pub use tokens::{TokenActions, TokenService};
pub use vault::{VaultActions, VaultService};
