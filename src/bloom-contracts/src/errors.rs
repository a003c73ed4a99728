use alloy_primitives::{Address, Bytes, B256};
use thiserror::Error;

/// Errors raised while binding, encoding, dispatching or decoding contract calls.
#[derive(Debug, Error)]
pub enum Error {
    /// The transport could not complete the request.
    #[error("transport error: {0}")]
    Transport(String),

    /// The call or transaction reverted on-chain.
    #[error(
        "execution reverted{}: {}",
        .address.map(|a| format!(" at {a}")).unwrap_or_default(),
        .reason.as_deref().unwrap_or("<no reason>")
    )]
    Reverted {
        address: Option<Address>,
        reason: Option<String>,
        data: Bytes,
    },

    /// Return data did not match the declared return shape.
    #[error("abi decoding failed: {0}")]
    Abi(#[from] alloy_sol_types::Error),

    #[error("no artifact found for contract `{0}`")]
    MissingArtifact(String),

    /// Abstract contracts and interfaces ship without creation code.
    #[error("contract `{0}` has no bytecode and cannot be deployed")]
    NotDeployable(String),

    #[error("bytecode of `{contract}` references unlinked library `{library}`")]
    UnlinkedLibrary { contract: String, library: String },

    #[error("invalid bytecode for `{contract}`: {source}")]
    InvalidBytecode {
        contract: String,
        #[source]
        source: hex::FromHexError,
    },

    #[error("contract `{contract}` has not been deployed to network {network_id}")]
    NotDeployed { contract: String, network_id: u64 },

    #[error("transaction {0} confirmed without a contract address")]
    NoContractAddress(B256),

    #[error("transaction {0} was dropped before confirmation")]
    Dropped(B256),

    #[error("no sender: set `from` in the options or expose an account on the node")]
    NoSender,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Build a revert error, decoding a Solidity `Error(string)` / `Panic(uint256)` reason if
    /// present.
    pub fn reverted(address: Option<Address>, data: Bytes) -> Self {
        let reason = alloy_sol_types::decode_revert_reason(&data);
        Error::Reverted {
            address,
            reason,
            data,
        }
    }

    pub fn is_revert(&self) -> bool {
        matches!(self, Error::Reverted { .. })
    }
}
