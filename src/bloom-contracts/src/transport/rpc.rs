//! JSON-RPC transport backed by an `ethers` HTTP provider.
//!
//! Transactions are sent with `eth_sendTransaction`, so the node must hold the sender's key
//! (ganache / truffle develop style). Signing is left to the node.

use std::time::Duration;

use alloy_primitives::{Address, Bytes, Log, B256, U256};
use async_trait::async_trait;
use bloom_contract_types::Transaction;
use ethers::{
    providers::{Http, Middleware, Provider, ProviderError, RpcError},
    types::{self as eth, transaction::eip2718::TypedTransaction},
};
use tracing::{debug, info, warn};

use crate::{
    errors::{Error, Result},
    transport::{Confirmation, Transport, TransactionRequest},
};

#[derive(Clone, Debug)]
pub struct RpcTransport {
    provider: Provider<Http>,
    confirmations: usize,
}

impl RpcTransport {
    pub fn new(rpc_url: &str) -> Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .map_err(|e| Error::Config(format!("invalid rpc url `{rpc_url}`: {e}")))?;
        Ok(Self {
            provider,
            confirmations: 1,
        })
    }

    /// Number of blocks to wait for after inclusion before `send` resolves.
    pub fn with_confirmations(mut self, confirmations: usize) -> Self {
        self.confirmations = confirmations.max(1);
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.provider = self.provider.interval(interval);
        self
    }

    pub fn provider(&self) -> &Provider<Http> {
        &self.provider
    }
}

#[async_trait]
impl Transport for RpcTransport {
    async fn network_id(&self) -> Result<u64> {
        let version = self
            .provider
            .get_net_version()
            .await
            .map_err(|e| rpc_error(None, e))?;
        version.trim().parse::<u64>().map_err(|_| {
            Error::Transport(format!("node returned non-numeric net_version `{version}`"))
        })
    }

    async fn accounts(&self) -> Result<Vec<Address>> {
        let accounts = self
            .provider
            .get_accounts()
            .await
            .map_err(|e| rpc_error(None, e))?;
        Ok(accounts.into_iter().map(from_h160).collect())
    }

    async fn call(&self, request: &TransactionRequest) -> Result<Bytes> {
        let tx = to_typed_transaction(request);
        let out = self
            .provider
            .call(&tx, None)
            .await
            .map_err(|e| rpc_error(request.to, e))?;
        Ok(Bytes::from(out.to_vec()))
    }

    async fn send(&self, request: &TransactionRequest) -> Result<Confirmation> {
        let tx = to_typed_transaction(request);
        let pending = self
            .provider
            .send_transaction(tx, None)
            .await
            .map_err(|e| rpc_error(request.to, e))?;
        let hash = B256::from(pending.tx_hash().0);
        debug!(%hash, confirmations = self.confirmations, "transaction submitted");

        let receipt = pending
            .confirmations(self.confirmations)
            .await
            .map_err(|e| rpc_error(request.to, e))?
            .ok_or(Error::Dropped(hash))?;

        ensure_success(&receipt, request.to)?;

        let mined = self
            .provider
            .get_transaction(receipt.transaction_hash)
            .await
            .map_err(|e| rpc_error(request.to, e))?
            .ok_or(Error::Dropped(hash))?;

        let mut transaction = from_ethers_transaction(mined);
        // The receipt is authoritative for inclusion.
        transaction.block_hash = receipt.block_hash.map(|h| B256::from(h.0));
        transaction.block_number = receipt.block_number.map(|n| n.low_u64());
        transaction.transaction_index = Some(receipt.transaction_index.low_u64());

        info!(
            %hash,
            block = ?transaction.block_number,
            created = ?receipt.contract_address,
            "transaction confirmed"
        );

        Ok(Confirmation {
            transaction,
            contract_address: receipt.contract_address.map(from_h160),
            logs: receipt.logs.into_iter().map(from_ethers_log).collect(),
        })
    }
}

/// A mined receipt with status 0 is a revert; pre-Byzantium receipts carry no status.
fn ensure_success(receipt: &eth::TransactionReceipt, address: Option<Address>) -> Result<()> {
    if receipt.status.is_some_and(|s| s.is_zero()) {
        warn!(hash = ?receipt.transaction_hash, "transaction reverted");
        return Err(Error::Reverted {
            address,
            reason: None,
            data: Bytes::new(),
        });
    }
    Ok(())
}

fn rpc_error(address: Option<Address>, err: ProviderError) -> Error {
    if let Some(response) = err.as_error_response() {
        let data = response.as_revert_data().unwrap_or_default();
        if !data.is_empty() {
            return Error::reverted(address, Bytes::from(data.to_vec()));
        }
        // Nodes that omit revert data still flag the revert in the message or with code 3.
        if response.code == 3 || response.message.contains("revert") {
            return Error::Reverted {
                address,
                reason: Some(response.message.clone()),
                data: Bytes::new(),
            };
        }
    }
    Error::Transport(err.to_string())
}

fn to_typed_transaction(request: &TransactionRequest) -> TypedTransaction {
    let mut tx = eth::TransactionRequest::new().data(eth::Bytes::from(request.data.to_vec()));
    if let Some(to) = request.to {
        tx = tx.to(to_h160(to));
    }

    let options = &request.options;
    if let Some(from) = options.from {
        tx = tx.from(to_h160(from));
    }
    if let Some(value) = options.value {
        tx = tx.value(to_ethers_u256(value));
    }
    if let Some(gas) = options.gas {
        tx = tx.gas(gas);
    }
    if let Some(gas_price) = options.gas_price {
        tx = tx.gas_price(to_ethers_u256(gas_price));
    }
    if let Some(nonce) = options.nonce {
        tx = tx.nonce(nonce);
    }
    tx.into()
}

fn from_ethers_transaction(tx: eth::Transaction) -> Transaction {
    Transaction {
        hash: B256::from(tx.hash.0),
        nonce: tx.nonce.low_u64(),
        block_hash: tx.block_hash.map(|h| B256::from(h.0)),
        block_number: tx.block_number.map(|n| n.low_u64()),
        transaction_index: tx.transaction_index.map(|i| i.low_u64()),
        from: from_h160(tx.from),
        to: tx.to.map(from_h160),
        value: from_ethers_u256(tx.value),
        gas_price: tx.gas_price.map(from_ethers_u256).unwrap_or_default(),
        gas: tx.gas.low_u64(),
        input: Bytes::from(tx.input.to_vec()),
    }
}

fn from_ethers_log(log: eth::Log) -> Log {
    Log::new_unchecked(
        from_h160(log.address),
        log.topics.into_iter().map(|t| B256::from(t.0)).collect(),
        Bytes::from(log.data.to_vec()),
    )
}

fn to_h160(address: Address) -> eth::H160 {
    eth::H160(address.0 .0)
}

fn from_h160(address: eth::H160) -> Address {
    Address::from(address.0)
}

fn to_ethers_u256(value: U256) -> eth::U256 {
    eth::U256::from_big_endian(&value.to_be_bytes::<32>())
}

fn from_ethers_u256(value: eth::U256) -> U256 {
    let mut buf = [0u8; 32];
    value.to_big_endian(&mut buf);
    U256::from_be_bytes(buf)
}
