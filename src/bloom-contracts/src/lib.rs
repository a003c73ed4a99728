//! Typed call surface for the Bloom registry, BLT and MiniMe token contracts.
//!
//! Every contract role has an instance type (operations on a deployed address) and a factory
//! ([`ContractFactory`]) with three ways to get an instance:
//! - `deploy`: send creation code plus constructor arguments and bind the fresh address;
//! - `deployed`: the canonical deployment on the connected network;
//! - `at`: bind an existing address without touching the network.
//!
//! Operations shared by several roles live in [`capabilities`]; bring them into scope with
//! [`prelude`].
//!
//! ```no_run
//! use bloom_contracts::prelude::*;
//!
//! # async fn run() -> bloom_contracts::Result<()> {
//! let env = Environment::connect(&ClientConfig::from_env()?).await?;
//! let blt = env.factory::<BltInstance>().deployed().await?;
//! let holder: Address = "0x0000000000000000000000000000000000000001".parse().unwrap();
//! let spendable = blt.spendable_balance_of(holder, None).await?;
//! # let _ = spendable;
//! # Ok(())
//! # }
//! ```

pub mod artifacts;
pub mod capabilities;
pub mod config;
pub mod contract;
pub mod contracts;
pub mod deployments;
pub mod environment;
pub mod errors;
pub mod interfaces;
pub mod transport;

#[cfg(test)]
mod tests;

pub use bloom_contract_types::{
    Address, Bytes, CloneTokenParams, TokenGrant, TokenGrantStatus, Transaction,
    TransactionOptions, B256, U256,
};

pub use artifacts::{Artifact, ArtifactStore};
pub use config::ClientConfig;
pub use contract::{ConstructorArgs, Contract, ContractFactory, ContractHandle, Sent};
pub use deployments::Deployments;
pub use environment::Environment;
pub use errors::{Error, Result};
pub use transport::{MockTransport, RpcTransport, Transport};

pub mod prelude {
    pub use crate::capabilities::{Controlled, Erc20, Erc20Basic, MiniMeToken, Ownable, VestedToken};
    pub use crate::contracts::*;
    pub use crate::{
        Address, Bytes, ClientConfig, CloneTokenParams, Contract, ContractFactory, Environment,
        Sent, TransactionOptions, U256,
    };
}
