//! Client configuration, from the process environment (and `.env`) or a JSON file.

use std::{env, fs, path::Path, path::PathBuf, str::FromStr, time::Duration};

use alloy_primitives::{Address, U256};
use bloom_contract_types::TransactionOptions;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

pub const DEFAULT_NETWORK: &str = "development";
pub const DEFAULT_ARTIFACTS_DIR: &str = "build/contracts";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ClientConfig {
    pub rpc_url: String,
    #[serde(default = "default_network")]
    pub network: String,
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,
    /// When set, `deployed()` falls back to this registry and `deploy()` records into it.
    #[serde(default)]
    pub deployments_path: Option<PathBuf>,
    #[serde(default = "default_confirmations")]
    pub confirmations: usize,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Defaults applied to every call before per-call options.
    #[serde(default)]
    pub defaults: TransactionOptions,
}

fn default_network() -> String {
    DEFAULT_NETWORK.to_string()
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from(DEFAULT_ARTIFACTS_DIR)
}

fn default_confirmations() -> usize {
    1
}

fn default_poll_interval_ms() -> u64 {
    1_000
}

impl ClientConfig {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            network: default_network(),
            artifacts_dir: default_artifacts_dir(),
            deployments_path: None,
            confirmations: default_confirmations(),
            poll_interval_ms: default_poll_interval_ms(),
            defaults: TransactionOptions::default(),
        }
    }

    /// Read `RPC_URL` (required), `NETWORK`, `ARTIFACTS_DIR`, `DEPLOYMENTS_PATH`,
    /// `CONFIRMATIONS`, `POLL_INTERVAL_MS`, `FROM`, `GAS` and `GAS_PRICE`.
    /// A `.env` file in the working directory is honoured if present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rpc_url = lookup("RPC_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::Config("RPC_URL is not set".to_string()))?;

        let mut config = Self::new(rpc_url);
        if let Some(network) = lookup("NETWORK") {
            config.network = network;
        }
        if let Some(dir) = lookup("ARTIFACTS_DIR") {
            config.artifacts_dir = PathBuf::from(dir);
        }
        config.deployments_path = lookup("DEPLOYMENTS_PATH").map(PathBuf::from);
        if let Some(n) = parse_var::<usize>(&lookup, "CONFIRMATIONS")? {
            config.confirmations = n;
        }
        if let Some(ms) = parse_var::<u64>(&lookup, "POLL_INTERVAL_MS")? {
            config.poll_interval_ms = ms;
        }
        config.defaults = TransactionOptions {
            from: parse_var::<Address>(&lookup, "FROM")?,
            gas: parse_var::<u64>(&lookup, "GAS")?,
            gas_price: parse_var::<U256>(&lookup, "GAS_PRICE")?,
            ..TransactionOptions::default()
        };
        Ok(config)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::Config(format!("{key} has invalid value `{raw}`"))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_requires_rpc_url() {
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[])),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_reads_defaults_and_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("RPC_URL", "http://127.0.0.1:7545"),
            ("CONFIRMATIONS", "3"),
            ("FROM", "0x1111111111111111111111111111111111111111"),
            ("GAS", "4000000"),
            ("GAS_PRICE", "20000000000"),
        ]))
        .unwrap();

        assert_eq!(config.network, DEFAULT_NETWORK);
        assert_eq!(config.artifacts_dir, PathBuf::from(DEFAULT_ARTIFACTS_DIR));
        assert_eq!(config.confirmations, 3);
        assert_eq!(config.defaults.from, Some(Address::repeat_byte(0x11)));
        assert_eq!(config.defaults.gas, Some(4_000_000));
        assert_eq!(config.defaults.gas_price, Some(U256::from(20_000_000_000u64)));
        assert_eq!(config.poll_interval(), Duration::from_millis(1_000));
    }

    #[test]
    fn test_rejects_malformed_numbers() {
        let err = ClientConfig::from_lookup(lookup(&[
            ("RPC_URL", "http://localhost:8545"),
            ("GAS", "lots"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("GAS"));
    }

    #[test]
    fn test_json_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.json");
        fs::write(
            &path,
            r#"{ "rpc_url": "http://localhost:8545", "defaults": { "gas": 90000 } }"#,
        )
        .unwrap();

        let config = ClientConfig::from_json_file(&path).unwrap();
        assert_eq!(config.network, DEFAULT_NETWORK);
        assert_eq!(config.defaults.gas, Some(90_000));
        assert_eq!(config.confirmations, 1);
    }
}
