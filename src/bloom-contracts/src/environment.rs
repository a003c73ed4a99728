//! Shared execution environment: transport, artifacts, deployments and call defaults.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use alloy_primitives::{Address, Bytes, B256};
use bloom_contract_types::TransactionOptions;
use parking_lot::{Mutex, RwLock};
use tokio::sync::OnceCell;
use tracing::info;

use crate::{
    artifacts::ArtifactStore,
    config::ClientConfig,
    contract::{Contract, ContractFactory},
    deployments::Deployments,
    errors::{Error, Result},
    transport::{RpcTransport, TransactionRequest, Transport},
};

#[derive(Debug)]
pub struct Environment {
    transport: Arc<dyn Transport>,
    artifacts: ArtifactStore,
    deployments: Option<Mutex<Deployments>>,
    defaults: TransactionOptions,
    links: RwLock<BTreeMap<String, Address>>,
    network_id: OnceCell<u64>,
    default_sender: OnceCell<Address>,
    /// Canonical addresses already resolved by `deployed()`.
    canonical: RwLock<HashMap<&'static str, Address>>,
}

impl Environment {
    pub fn new(transport: Arc<dyn Transport>, artifacts: ArtifactStore) -> Self {
        Self {
            transport,
            artifacts,
            deployments: None,
            defaults: TransactionOptions::default(),
            links: RwLock::new(BTreeMap::new()),
            network_id: OnceCell::new(),
            default_sender: OnceCell::new(),
            canonical: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_defaults(mut self, defaults: TransactionOptions) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_deployments(mut self, deployments: Deployments) -> Self {
        self.deployments = Some(Mutex::new(deployments));
        self
    }

    /// Connect to the node described by `config` and verify it answers.
    pub async fn connect(config: &ClientConfig) -> Result<Arc<Self>> {
        let transport = RpcTransport::new(&config.rpc_url)?
            .with_confirmations(config.confirmations)
            .with_poll_interval(config.poll_interval());

        let mut env = Self::new(
            Arc::new(transport),
            ArtifactStore::from_dir(&config.artifacts_dir),
        )
        .with_defaults(config.defaults.clone());
        if let Some(path) = &config.deployments_path {
            env = env.with_deployments(Deployments::load(path, config.network.clone())?);
        }

        let env = Arc::new(env);
        let network_id = env.network_id().await?;
        info!(
            network = %config.network,
            network_id,
            rpc_url = %config.rpc_url,
            "connected"
        );
        Ok(env)
    }

    pub fn factory<C: Contract>(self: &Arc<Self>) -> ContractFactory<C> {
        ContractFactory::new(self.clone())
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    pub fn defaults(&self) -> &TransactionOptions {
        &self.defaults
    }

    /// Register a deployed library so creation code referencing it can be linked.
    pub fn link(&self, library: &str, address: Address) {
        self.links.write().insert(library.to_string(), address);
    }

    pub fn links(&self) -> BTreeMap<String, Address> {
        self.links.read().clone()
    }

    pub fn deployments(&self) -> Option<Deployments> {
        self.deployments.as_ref().map(|d| d.lock().clone())
    }

    pub async fn network_id(&self) -> Result<u64> {
        self.network_id
            .get_or_try_init(|| self.transport.network_id())
            .await
            .copied()
    }

    /// `from` used when neither the call nor the defaults name one: the node's first account.
    pub async fn default_sender(&self) -> Result<Address> {
        if let Some(from) = self.defaults.from {
            return Ok(from);
        }
        self.default_sender
            .get_or_try_init(|| async {
                self.transport
                    .accounts()
                    .await?
                    .into_iter()
                    .next()
                    .ok_or(Error::NoSender)
            })
            .await
            .copied()
    }

    /// Merge defaults with per-call options; submissions also get a resolved sender.
    pub(crate) async fn prepare(
        &self,
        to: Option<Address>,
        data: Bytes,
        options: Option<TransactionOptions>,
        submission: bool,
    ) -> Result<TransactionRequest> {
        let mut merged = self.defaults.merged(&options.unwrap_or_default());
        if submission && merged.from.is_none() {
            merged.from = Some(self.default_sender().await?);
        }
        Ok(match to {
            Some(to) => TransactionRequest::call(to, data, merged),
            None => TransactionRequest::create(data, merged),
        })
    }

    /// Artifact `networks` entry for the current network, else the deployments registry.
    pub(crate) async fn canonical_address(&self, contract: &'static str) -> Result<Address> {
        let cached = self.canonical.read().get(contract).copied();
        if let Some(address) = cached {
            return Ok(address);
        }

        let network_id = self.network_id().await?;
        let from_artifact = self
            .artifacts
            .find(contract)?
            .and_then(|a| a.address_on(network_id));
        let address = match from_artifact {
            Some(address) => address,
            None => self
                .deployments
                .as_ref()
                .and_then(|d| d.lock().address_of(contract))
                .ok_or_else(|| Error::NotDeployed {
                    contract: contract.to_string(),
                    network_id,
                })?,
        };

        Ok(*self.canonical.write().entry(contract).or_insert(address))
    }

    pub(crate) fn record_deployment(
        &self,
        contract: &str,
        address: Address,
        hash: B256,
    ) -> Result<()> {
        if let Some(deployments) = &self.deployments {
            let mut deployments = deployments.lock();
            deployments.record(contract, address, hash);
            deployments.save()?;
        }
        Ok(())
    }
}
