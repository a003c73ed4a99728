use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// A vesting grant as stored by the token (`grants(holder, index)` getter).
///
/// Timestamps are unix seconds; `vesting` is the time at which the grant is fully vested.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenGrant {
    pub granter: Address,
    pub value: U256,
    pub cliff: u64,
    pub vesting: u64,
    pub start: u64,
    pub revokable: bool,
    pub burns_on_revoke: bool,
}

impl TokenGrant {
    /// Fields in ABI order.
    pub fn into_tuple(self) -> (Address, U256, u64, u64, u64, bool, bool) {
        (
            self.granter,
            self.value,
            self.cliff,
            self.vesting,
            self.start,
            self.revokable,
            self.burns_on_revoke,
        )
    }
}

/// A grant as reported by `tokenGrant(holder, grantId)`, including the amount vested so far.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenGrantStatus {
    pub granter: Address,
    pub value: U256,
    pub vested: U256,
    pub start: u64,
    pub cliff: u64,
    pub vesting: u64,
    pub revokable: bool,
    pub burns_on_revoke: bool,
}

impl TokenGrantStatus {
    /// Fields in ABI order.
    pub fn into_tuple(self) -> (Address, U256, U256, u64, u64, u64, bool, bool) {
        (
            self.granter,
            self.value,
            self.vested,
            self.start,
            self.cliff,
            self.vesting,
            self.revokable,
            self.burns_on_revoke,
        )
    }

    pub fn unvested(&self) -> U256 {
        self.value.saturating_sub(self.vested)
    }
}

/// Arguments shared by every clone-token operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneTokenParams {
    pub name: String,
    pub decimals: u8,
    pub symbol: String,
    /// Block whose balances seed the clone. Zero means "current block" on-chain.
    pub snapshot_block: U256,
    pub transfers_enabled: bool,
}

impl CloneTokenParams {
    pub fn new(name: impl Into<String>, decimals: u8, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            decimals,
            symbol: symbol.into(),
            snapshot_block: U256::ZERO,
            transfers_enabled: true,
        }
    }

    pub fn snapshot_block(mut self, block: U256) -> Self {
        self.snapshot_block = block;
        self
    }

    pub fn transfers_enabled(mut self, enabled: bool) -> Self {
        self.transfers_enabled = enabled;
        self
    }
}
