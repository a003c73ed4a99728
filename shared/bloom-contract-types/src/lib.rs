//! Shared value types for the Bloom contract bindings.
//!
//! Nothing in here performs I/O; these are the shapes that flow in and out of contract calls.

pub mod grants;
pub mod transaction;

pub use alloy_primitives::{Address, Bytes, B256, U256};
pub use grants::{CloneTokenParams, TokenGrant, TokenGrantStatus};
pub use transaction::{Transaction, TransactionOptions};
