use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

/// A submitted (and, once `block_hash` is set, mined) transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: B256,
    pub nonce: u64,
    pub block_hash: Option<B256>,
    pub block_number: Option<u64>,
    pub transaction_index: Option<u64>,
    pub from: Address,
    /// `None` for contract creation.
    pub to: Option<Address>,
    pub value: U256,
    pub gas_price: U256,
    pub gas: u64,
    pub input: Bytes,
}

impl Transaction {
    pub fn is_mined(&self) -> bool {
        self.block_hash.is_some() && self.block_number.is_some()
    }

    pub fn is_creation(&self) -> bool {
        self.to.is_none()
    }
}

/// Caller overrides for how a call is submitted. Every field is optional; unset fields fall back
/// to the environment defaults and then to whatever the node picks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,
}

impl TransactionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sender(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    pub fn value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }

    pub fn gas(mut self, gas: u64) -> Self {
        self.gas = Some(gas);
        self
    }

    pub fn gas_price(mut self, gas_price: U256) -> Self {
        self.gas_price = Some(gas_price);
        self
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Field-wise merge: values set on `overrides` win over `self`.
    pub fn merged(&self, overrides: &TransactionOptions) -> TransactionOptions {
        TransactionOptions {
            from: overrides.from.or(self.from),
            value: overrides.value.or(self.value),
            gas: overrides.gas.or(self.gas),
            gas_price: overrides.gas_price.or(self.gas_price),
            nonce: overrides.nonce.or(self.nonce),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged_prefers_overrides() {
        let defaults = TransactionOptions::new()
            .sender(Address::repeat_byte(0x11))
            .gas(90_000)
            .gas_price(U256::from(20u64));
        let overrides = TransactionOptions::new().gas(250_000);

        let merged = defaults.merged(&overrides);
        assert_eq!(merged.from, Some(Address::repeat_byte(0x11)));
        assert_eq!(merged.gas, Some(250_000));
        assert_eq!(merged.gas_price, Some(U256::from(20u64)));
        assert_eq!(merged.value, None);
        assert!(TransactionOptions::new().is_empty());
        assert!(!merged.is_empty());
    }

    #[test]
    fn test_options_serialize_camel_case_and_skip_unset() {
        let opts = TransactionOptions::new().gas_price(U256::from(1u64)).gas(21_000);
        let json = serde_json::to_value(&opts).unwrap();
        assert_eq!(json["gas"], 21_000);
        assert!(json.get("gasPrice").is_some());
        assert!(json.get("from").is_none());
    }

    #[test]
    fn test_pending_transaction_is_not_mined() {
        let tx = Transaction {
            hash: B256::repeat_byte(1),
            nonce: 0,
            block_hash: None,
            block_number: None,
            transaction_index: None,
            from: Address::ZERO,
            to: None,
            value: U256::ZERO,
            gas_price: U256::ZERO,
            gas: 0,
            input: Bytes::new(),
        };
        assert!(!tx.is_mined());
        assert!(tx.is_creation());
    }
}
