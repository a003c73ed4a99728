//! Truffle build artifacts (`build/contracts/<Name>.json`).
//!
//! Only the fields the bindings need are read: creation bytecode and the per-network deployment
//! table. The ABI itself is compiled in via `sol!`.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use alloy_primitives::{Address, Bytes, B256};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Length of a pre-0.5 solc library placeholder (`__Name___...`), in hex characters.
const PLACEHOLDER_LEN: usize = 40;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    /// Hex creation code, possibly containing library placeholders. Empty for interfaces.
    #[serde(default)]
    pub bytecode: String,
    /// Deployments keyed by network id.
    #[serde(default)]
    pub networks: BTreeMap<String, ArtifactNetwork>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactNetwork {
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<B256>,
}

impl Artifact {
    pub fn new(contract_name: impl Into<String>, bytecode: impl Into<String>) -> Self {
        Self {
            contract_name: contract_name.into(),
            bytecode: bytecode.into(),
            networks: BTreeMap::new(),
        }
    }

    pub fn with_network(mut self, network_id: u64, address: Address) -> Self {
        self.networks.insert(
            network_id.to_string(),
            ArtifactNetwork {
                address,
                transaction_hash: None,
            },
        );
        self
    }

    pub fn address_on(&self, network_id: u64) -> Option<Address> {
        self.networks
            .get(&network_id.to_string())
            .map(|n| n.address)
    }

    /// Creation code with every library placeholder replaced by its linked address.
    pub fn linked_bytecode(&self, links: &BTreeMap<String, Address>) -> Result<Bytes> {
        let mut code = self
            .bytecode
            .trim()
            .trim_start_matches("0x")
            .to_string();
        if code.is_empty() {
            return Err(Error::NotDeployable(self.contract_name.clone()));
        }

        for (library, address) in links {
            let placeholder = placeholder(library);
            if code.contains(&placeholder) {
                code = code.replace(&placeholder, &hex::encode(address.as_slice()));
            }
        }

        if let Some(pos) = code.find("__") {
            let rest = &code[pos + 2..];
            let library = rest
                .split('_')
                .next()
                .unwrap_or_default()
                .to_string();
            return Err(Error::UnlinkedLibrary {
                contract: self.contract_name.clone(),
                library,
            });
        }

        hex::decode(&code)
            .map(Bytes::from)
            .map_err(|source| Error::InvalidBytecode {
                contract: self.contract_name.clone(),
                source,
            })
    }
}

/// `__` + name (at most 36 chars) right-padded with `_` to 40 characters.
fn placeholder(library: &str) -> String {
    let name: String = library.chars().take(PLACEHOLDER_LEN - 4).collect();
    format!("__{:_<width$}", name, width = PLACEHOLDER_LEN - 2)
}

/// Lazily loaded, cached artifact collection.
#[derive(Debug, Default)]
pub struct ArtifactStore {
    dir: Option<PathBuf>,
    cache: RwLock<HashMap<String, Arc<Artifact>>>,
}

impl ArtifactStore {
    /// Artifacts are read from `<dir>/<ContractName>.json` on first use.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// A store that only knows artifacts added with [`ArtifactStore::insert`].
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    pub fn insert(&self, artifact: Artifact) {
        self.cache
            .write()
            .insert(artifact.contract_name.clone(), Arc::new(artifact));
    }

    pub fn get(&self, name: &str) -> Result<Arc<Artifact>> {
        self.find(name)?
            .ok_or_else(|| Error::MissingArtifact(name.to_string()))
    }

    /// Like [`ArtifactStore::get`], but a missing artifact is `Ok(None)`.
    pub fn find(&self, name: &str) -> Result<Option<Arc<Artifact>>> {
        if let Some(artifact) = self.cache.read().get(name) {
            return Ok(Some(artifact.clone()));
        }
        let Some(dir) = &self.dir else {
            return Ok(None);
        };

        let path = dir.join(format!("{name}.json"));
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)?;
        let artifact: Artifact = serde_json::from_str(&raw)?;
        let artifact = Arc::new(artifact);
        self.cache
            .write()
            .insert(name.to_string(), artifact.clone());
        Ok(Some(artifact))
    }
}
