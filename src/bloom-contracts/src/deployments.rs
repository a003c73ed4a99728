//! Deployments registry (eg, `deployments.development.json`).
//!
//! Layout:
//! ```json
//! {
//!   "network": "development",
//!   "updated_at": "2024-01-01T00:00:00Z",
//!   "deployments": {
//!     "AccountRegistry": { "address": "0x...", "tx_hashes": ["0x..."], "deployed_at": "..." }
//!   }
//! }
//! ```

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::debug;

use crate::errors::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentEntry {
    pub address: Address,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tx_hashes: Vec<B256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployed_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployments {
    #[serde(default)]
    pub network: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub deployments: BTreeMap<String, DeploymentEntry>,
    /// Backing file; `None` for an in-memory registry.
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Deployments {
    pub fn new(network: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            ..Self::default()
        }
    }

    /// Load the registry at `path` for `network`. A missing or blank file yields an empty registry
    /// bound to it; a file recorded for another network is rejected.
    pub fn load(path: impl Into<PathBuf>, network: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let network = network.into();
        let existing = if path.exists() {
            fs::read_to_string(&path)?
        } else {
            String::new()
        };

        let mut registry = if existing.trim().is_empty() {
            Self::new(network)
        } else {
            let mut registry = serde_json::from_str::<Self>(&existing)?;
            if registry.network.is_empty() {
                registry.network = network;
            } else if registry.network != network {
                return Err(Error::Config(format!(
                    "deployments file {} belongs to network `{}`, not `{network}`",
                    path.display(),
                    registry.network
                )));
            }
            registry
        };
        registry.path = Some(path);
        Ok(registry)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn address_of(&self, contract: &str) -> Option<Address> {
        self.deployments.get(contract).map(|e| e.address)
    }

    /// Record (or replace) the deployment of `contract`.
    pub fn record(&mut self, contract: &str, address: Address, tx_hash: B256) {
        let now = now_rfc3339();
        self.updated_at = Some(now.clone());
        self.deployments.insert(
            contract.to_string(),
            DeploymentEntry {
                address,
                tx_hashes: vec![tx_hash],
                deployed_at: Some(now),
            },
        );
    }

    /// Persist to the backing file, if any.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        write_json_atomic(path, self)?;
        debug!(path = %path.display(), entries = self.deployments.len(), "deployments saved");
        Ok(())
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string())
}

fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    if !parent.exists() {
        fs::create_dir_all(parent)?;
    }

    let serialised = serde_json::to_string_pretty(value)?;
    let tmp_path = tmp_path_for(path);
    fs::write(&tmp_path, serialised.as_bytes())?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let registry =
            Deployments::load(dir.path().join("deployments.json"), "development").unwrap();
        assert_eq!(registry.network, "development");
        assert!(registry.deployments.is_empty());
    }

    #[test]
    fn test_record_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deployments.json");

        let mut registry = Deployments::load(&path, "development").unwrap();
        registry.record("BLT", Address::repeat_byte(0x42), B256::repeat_byte(0x01));
        registry.save().unwrap();
        assert!(!tmp_path_for(&path).exists());

        let reloaded = Deployments::load(&path, "development").unwrap();
        assert_eq!(reloaded.network, "development");
        assert_eq!(reloaded.address_of("BLT"), Some(Address::repeat_byte(0x42)));
        assert_eq!(
            reloaded.deployments["BLT"].tx_hashes,
            vec![B256::repeat_byte(0x01)]
        );
        assert!(reloaded.updated_at.is_some());
    }

    #[test]
    fn test_load_rejects_other_network() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployments.json");

        let mut registry = Deployments::load(&path, "development").unwrap();
        registry.record("BLT", Address::repeat_byte(0xde), B256::repeat_byte(0x01));
        registry.save().unwrap();

        let err = Deployments::load(&path, "mainnet").unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("development")));
    }

    #[test]
    fn test_unlabelled_file_takes_requested_network() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployments.json");
        fs::write(&path, r#"{ "deployments": {} }"#).unwrap();

        let registry = Deployments::load(&path, "rinkeby").unwrap();
        assert_eq!(registry.network, "rinkeby");
    }

    #[test]
    fn test_in_memory_save_is_noop() {
        let mut registry = Deployments::new("test");
        registry.record("Ownable", Address::ZERO, B256::ZERO);
        registry.save().unwrap();
        assert!(registry.path().is_none());
    }
}
