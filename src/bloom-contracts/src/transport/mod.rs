//! The seam between the call surface and the contract-execution platform.
//!
//! Contract handles only ever speak [`Transport`]; the JSON-RPC implementation talks to a node,
//! while [`mock::MockTransport`] answers from scripted responses.

pub mod mock;
pub mod rpc;

use std::fmt;

use alloy_primitives::{Address, Bytes, Log};
use async_trait::async_trait;
use bloom_contract_types::{Transaction, TransactionOptions};

use crate::errors::Result;

pub use mock::MockTransport;
pub use rpc::RpcTransport;

/// A call or transaction to dispatch. `to == None` creates a contract from `data`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionRequest {
    pub to: Option<Address>,
    pub data: Bytes,
    pub options: TransactionOptions,
}

impl TransactionRequest {
    pub fn call(to: Address, data: impl Into<Bytes>, options: TransactionOptions) -> Self {
        Self {
            to: Some(to),
            data: data.into(),
            options,
        }
    }

    pub fn create(code: impl Into<Bytes>, options: TransactionOptions) -> Self {
        Self {
            to: None,
            data: code.into(),
            options,
        }
    }

    /// First four bytes of the calldata, if this is a call.
    pub fn selector(&self) -> Option<[u8; 4]> {
        if self.to.is_none() || self.data.len() < 4 {
            return None;
        }
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&self.data[..4]);
        Some(selector)
    }
}

/// A mined transaction together with the contract it created, if any, and the receipt logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Confirmation {
    pub transaction: Transaction,
    pub contract_address: Option<Address>,
    pub logs: Vec<Log>,
}

#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Network id used to key artifact deployments (`net_version`).
    async fn network_id(&self) -> Result<u64>;

    /// Accounts the node can sign for.
    async fn accounts(&self) -> Result<Vec<Address>>;

    /// Execute without submitting (`eth_call`) and return the raw output.
    async fn call(&self, request: &TransactionRequest) -> Result<Bytes>;

    /// Submit and wait until the transaction is mined. A failed receipt is an error.
    async fn send(&self, request: &TransactionRequest) -> Result<Confirmation>;
}
