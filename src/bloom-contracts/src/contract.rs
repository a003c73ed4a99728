//! Generic contract handle, base capability and factory.

use std::{fmt, marker::PhantomData, sync::Arc};

use alloy_primitives::{Address, Bytes, Log};
use alloy_sol_types::{SolCall, SolEvent};
use async_trait::async_trait;
use bloom_contract_types::{Transaction, TransactionOptions};
use tracing::{debug, info, warn};

use crate::{
    environment::Environment,
    errors::{Error, Result},
};

/// Outcome of a state-changing call: the value the call returned (from simulation against the
/// pre-submission state), the mined transaction and its receipt logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sent<T> {
    pub value: T,
    pub transaction: Transaction,
    pub logs: Vec<Log>,
}

impl<T> Sent<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sent<U> {
        Sent {
            value: f(self.value),
            transaction: self.transaction,
            logs: self.logs,
        }
    }

    /// First `E` emitted by `emitter` in the receipt.
    pub fn event<E: SolEvent>(&self, emitter: Address) -> Option<E> {
        self.logs
            .iter()
            .filter(|log| log.address == emitter)
            .filter(|log| log.topics().first() == Some(&E::SIGNATURE_HASH))
            .find_map(|log| E::decode_log_data(&log.data, true).ok())
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// ABI-encoded constructor arguments, appended to creation code.
pub trait ConstructorArgs: Send + Sync {
    fn encode(&self) -> Vec<u8>;
}

impl ConstructorArgs for () {
    fn encode(&self) -> Vec<u8> {
        Vec::new()
    }
}

/// An address bound to an environment. Every contract instance wraps one.
#[derive(Clone)]
pub struct ContractHandle {
    name: &'static str,
    address: Address,
    env: Arc<Environment>,
}

impl fmt::Debug for ContractHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractHandle")
            .field("name", &self.name)
            .field("address", &self.address)
            .finish()
    }
}

impl ContractHandle {
    pub fn new(name: &'static str, address: Address, env: Arc<Environment>) -> Self {
        Self { name, address, env }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn environment(&self) -> &Arc<Environment> {
        &self.env
    }

    /// Read-only call (`eth_call`), decoded into the declared return shape.
    pub async fn call<C>(
        &self,
        call: C,
        options: Option<TransactionOptions>,
    ) -> Result<C::Return>
    where
        C: SolCall + Send,
    {
        let data = Bytes::from(call.abi_encode());
        let request = self
            .env
            .prepare(Some(self.address), data, options, false)
            .await?;
        debug!(
            contract = self.name,
            function = C::SIGNATURE,
            address = %self.address,
            "call"
        );
        let output = self.env.transport().call(&request).await?;
        Ok(C::abi_decode_returns(&output, true)?)
    }

    /// State-changing call. Simulates first to obtain the return value (and fail fast on a
    /// revert), then submits and resolves once the transaction is mined.
    pub async fn send<C>(
        &self,
        call: C,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<C::Return>>
    where
        C: SolCall + Send,
        C::Return: Send,
    {
        let data = Bytes::from(call.abi_encode());
        let request = self
            .env
            .prepare(Some(self.address), data, options, true)
            .await?;
        debug!(
            contract = self.name,
            function = C::SIGNATURE,
            address = %self.address,
            from = ?request.options.from,
            "send"
        );

        let output = self
            .env
            .transport()
            .call(&request)
            .await
            .inspect_err(|e| {
                if e.is_revert() {
                    warn!(
                        contract = self.name,
                        function = C::SIGNATURE,
                        error = %e,
                        "simulation reverted"
                    );
                }
            })?;
        let value = C::abi_decode_returns(&output, true)?;

        let confirmation = self.env.transport().send(&request).await?;
        Ok(Sent {
            value,
            transaction: confirmation.transaction,
            logs: confirmation.logs,
        })
    }

    /// Plain transaction to the contract (fallback function), eg to forward ether.
    pub async fn send_transaction(
        &self,
        options: Option<TransactionOptions>,
    ) -> Result<Transaction> {
        let request = self
            .env
            .prepare(Some(self.address), Bytes::new(), options, true)
            .await?;
        debug!(contract = self.name, address = %self.address, "send transaction");
        Ok(self.env.transport().send(&request).await?.transaction)
    }
}

/// Base capability shared by every instance.
#[async_trait]
pub trait Contract: Sized + Send + Sync {
    /// Artifact / deployment name.
    const NAME: &'static str;

    type Constructor: ConstructorArgs;

    fn from_handle(handle: ContractHandle) -> Self;

    fn handle(&self) -> &ContractHandle;

    fn address(&self) -> Address {
        self.handle().address()
    }

    async fn send_transaction(&self, options: Option<TransactionOptions>) -> Result<Transaction> {
        self.handle().send_transaction(options).await
    }
}

/// Creates or binds instances of `C`.
pub struct ContractFactory<C> {
    env: Arc<Environment>,
    _contract: PhantomData<fn() -> C>,
}

impl<C> Clone for ContractFactory<C> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
            _contract: PhantomData,
        }
    }
}

impl<C> fmt::Debug for ContractFactory<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractFactory")
            .field("contract", &std::any::type_name::<C>())
            .finish()
    }
}

impl<C: Contract> ContractFactory<C> {
    pub fn new(env: Arc<Environment>) -> Self {
        Self {
            env,
            _contract: PhantomData,
        }
    }

    /// Bind to an existing address. Pure: no request reaches the transport.
    pub fn at(&self, address: Address) -> C {
        C::from_handle(ContractHandle::new(C::NAME, address, self.env.clone()))
    }

    /// The canonical deployment for the current network. Repeated calls resolve to the same
    /// address for the lifetime of the environment.
    pub async fn deployed(&self) -> Result<C> {
        let address = self.env.canonical_address(C::NAME).await?;
        Ok(self.at(address))
    }

    /// Deploy a fresh instance and wait for the creation transaction to be mined.
    pub async fn deploy(
        &self,
        args: C::Constructor,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<C>> {
        let artifact = self.env.artifacts().get(C::NAME)?;
        let mut code = artifact.linked_bytecode(&self.env.links())?.to_vec();
        code.extend_from_slice(&args.encode());

        let request = self
            .env
            .prepare(None, Bytes::from(code), options, true)
            .await?;
        info!(contract = C::NAME, from = ?request.options.from, "deploying");

        let confirmation = self.env.transport().send(&request).await?;
        let hash = confirmation.transaction.hash;
        let address = confirmation
            .contract_address
            .filter(|a| !a.is_zero())
            .ok_or(Error::NoContractAddress(hash))?;

        info!(contract = C::NAME, %address, %hash, "deployed");
        // Already on-chain: a failed registry write is logged, not returned.
        if let Err(e) = self.env.record_deployment(C::NAME, address, hash) {
            warn!(contract = C::NAME, %address, %hash, error = %e, "failed to record deployment");
        }

        Ok(Sent {
            value: self.at(address),
            transaction: confirmation.transaction,
            logs: confirmation.logs,
        })
    }
}
