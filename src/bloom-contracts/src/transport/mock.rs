//! Scripted in-process transport.
//!
//! Responses are registered per `(address, selector)`. Every request is recorded, so tests can
//! assert exactly which round trips a binding performed. Unregistered calls return empty output,
//! like calling an address without code. Receipt logs for a submission are scripted the same
//! way.

use std::collections::HashMap;

use alloy_primitives::{keccak256, Address, Bytes, Log, U256};
use async_trait::async_trait;
use bloom_contract_types::Transaction;
use parking_lot::Mutex;

use crate::{
    errors::{Error, Result},
    transport::{Confirmation, Transport, TransactionRequest},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    NetworkId,
    Accounts,
    Call,
    Send,
}

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub kind: RequestKind,
    pub request: Option<TransactionRequest>,
}

#[derive(Clone, Debug)]
enum Scripted {
    Return(Bytes),
    Revert(Bytes),
}

#[derive(Debug)]
struct MockState {
    network_id: u64,
    accounts: Vec<Address>,
    responses: HashMap<(Address, [u8; 4]), Scripted>,
    logs: HashMap<(Address, [u8; 4]), Vec<Log>>,
    requests: Vec<RecordedRequest>,
    nonces: HashMap<Address, u64>,
    block_number: u64,
}

#[derive(Debug)]
pub struct MockTransport {
    state: Mutex<MockState>,
}

impl MockTransport {
    pub fn new(network_id: u64, accounts: Vec<Address>) -> Self {
        Self {
            state: Mutex::new(MockState {
                network_id,
                accounts,
                responses: HashMap::new(),
                logs: HashMap::new(),
                requests: Vec::new(),
                nonces: HashMap::new(),
                block_number: 0,
            }),
        }
    }

    /// Answer calls to `selector` on `to` with `output` (raw ABI-encoded return data).
    pub fn respond(&self, to: Address, selector: [u8; 4], output: impl Into<Bytes>) {
        self.state
            .lock()
            .responses
            .insert((to, selector), Scripted::Return(output.into()));
    }

    /// Make calls and transactions to `selector` on `to` revert with `data`.
    pub fn revert(&self, to: Address, selector: [u8; 4], data: impl Into<Bytes>) {
        self.state
            .lock()
            .responses
            .insert((to, selector), Scripted::Revert(data.into()));
    }

    /// Attach `log` to the receipt of every transaction sending `selector` to `to`.
    pub fn emit(&self, to: Address, selector: [u8; 4], log: Log) {
        self.state
            .lock()
            .logs
            .entry((to, selector))
            .or_default()
            .push(log);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().requests.len()
    }

    /// Requests of one kind, in issue order.
    pub fn requests_of(&self, kind: RequestKind) -> Vec<TransactionRequest> {
        self.state
            .lock()
            .requests
            .iter()
            .filter(|r| r.kind == kind)
            .filter_map(|r| r.request.clone())
            .collect()
    }

    fn scripted(&self, request: &TransactionRequest) -> Option<Scripted> {
        let to = request.to?;
        let selector = request.selector()?;
        self.state.lock().responses.get(&(to, selector)).cloned()
    }

    fn record(&self, kind: RequestKind, request: Option<&TransactionRequest>) {
        self.state.lock().requests.push(RecordedRequest {
            kind,
            request: request.cloned(),
        });
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn network_id(&self) -> Result<u64> {
        self.record(RequestKind::NetworkId, None);
        Ok(self.state.lock().network_id)
    }

    async fn accounts(&self) -> Result<Vec<Address>> {
        self.record(RequestKind::Accounts, None);
        Ok(self.state.lock().accounts.clone())
    }

    async fn call(&self, request: &TransactionRequest) -> Result<Bytes> {
        self.record(RequestKind::Call, Some(request));
        match self.scripted(request) {
            Some(Scripted::Return(output)) => Ok(output),
            Some(Scripted::Revert(data)) => Err(Error::reverted(request.to, data)),
            None => Ok(Bytes::new()),
        }
    }

    async fn send(&self, request: &TransactionRequest) -> Result<Confirmation> {
        self.record(RequestKind::Send, Some(request));
        if let Some(Scripted::Revert(data)) = self.scripted(request) {
            return Err(Error::reverted(request.to, data));
        }

        let from = request.options.from.ok_or(Error::NoSender)?;
        let mut state = self.state.lock();
        let logs = match (request.to, request.selector()) {
            (Some(to), Some(selector)) => state
                .logs
                .get(&(to, selector))
                .cloned()
                .unwrap_or_default(),
            _ => Vec::new(),
        };
        let nonce = {
            let next = state.nonces.entry(from).or_insert(0);
            let nonce = request.options.nonce.unwrap_or(*next);
            *next = nonce + 1;
            nonce
        };
        state.block_number += 1;
        let block_number = state.block_number;

        let mut preimage = Vec::with_capacity(20 + 8 + request.data.len());
        preimage.extend_from_slice(from.as_slice());
        preimage.extend_from_slice(&nonce.to_be_bytes());
        let contract_address = request
            .to
            .is_none()
            .then(|| Address::from_slice(&keccak256(&preimage).as_slice()[12..]));
        preimage.extend_from_slice(&request.data);
        let hash = keccak256(&preimage);

        let transaction = Transaction {
            hash,
            nonce,
            block_hash: Some(keccak256(block_number.to_be_bytes())),
            block_number: Some(block_number),
            transaction_index: Some(0),
            from,
            to: request.to,
            value: request.options.value.unwrap_or_default(),
            gas_price: request.options.gas_price.unwrap_or(U256::from(1u64)),
            gas: request.options.gas.unwrap_or(6_721_975),
            input: request.data.clone(),
        };

        Ok(Confirmation {
            transaction,
            contract_address,
            logs,
        })
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new(5777, vec![Address::repeat_byte(0x01)])
    }
}
