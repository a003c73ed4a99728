//! Truffle scaffolding and library contracts.

use alloy_primitives::{Address, U256};
use bloom_contract_types::TransactionOptions;

use crate::{
    contract::{Contract, Sent},
    errors::Result,
    interfaces::{IConvertLib, IMetaCoin, IMigrations},
};

instance!(MathInstance, "Math", ());
instance!(SafeMathInstance, "SafeMath", ());
instance!(SafeErc20Instance, "SafeERC20", ());

instance!(ConvertLibInstance, "ConvertLib", ());

impl ConvertLibInstance {
    pub async fn convert(
        &self,
        amount: U256,
        conversion_rate: U256,
        options: Option<TransactionOptions>,
    ) -> Result<U256> {
        let call = IConvertLib::convertCall {
            amount,
            conversionRate: conversion_rate,
        };
        Ok(self.handle().call(call, options).await?._0)
    }
}

instance!(
    /// Truffle's example coin. Its creation code links `ConvertLib`; register the library with
    /// [`crate::Environment::link`] before deploying.
    MetaCoinInstance,
    "MetaCoin",
    ()
);

impl MetaCoinInstance {
    pub async fn get_balance(
        &self,
        addr: Address,
        options: Option<TransactionOptions>,
    ) -> Result<U256> {
        Ok(self
            .handle()
            .call(IMetaCoin::getBalanceCall { addr }, options)
            .await?
            ._0)
    }

    pub async fn get_balance_in_eth(
        &self,
        addr: Address,
        options: Option<TransactionOptions>,
    ) -> Result<U256> {
        Ok(self
            .handle()
            .call(IMetaCoin::getBalanceInEthCall { addr }, options)
            .await?
            ._0)
    }

    /// `false` when the sender's balance is insufficient.
    pub async fn send_coin(
        &self,
        receiver: Address,
        amount: U256,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<bool>> {
        let call = IMetaCoin::sendCoinCall { receiver, amount };
        Ok(self.handle().send(call, options).await?.map(|r| r._0))
    }
}

instance!(MigrationsInstance, "Migrations", ());

impl MigrationsInstance {
    pub async fn owner(&self, options: Option<TransactionOptions>) -> Result<Address> {
        Ok(self
            .handle()
            .call(IMigrations::ownerCall {}, options)
            .await?
            ._0)
    }

    pub async fn last_completed_migration(
        &self,
        options: Option<TransactionOptions>,
    ) -> Result<U256> {
        let call = IMigrations::last_completed_migrationCall {};
        Ok(self.handle().call(call, options).await?._0)
    }

    pub async fn set_completed(
        &self,
        completed: U256,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<()>> {
        let call = IMigrations::setCompletedCall { completed };
        Ok(self.handle().send(call, options).await?.map(|_| ()))
    }

    /// Hand migration tracking over to a new `Migrations` contract.
    pub async fn upgrade(
        &self,
        new_address: Address,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<()>> {
        let call = IMigrations::upgradeCall { new_address };
        Ok(self.handle().send(call, options).await?.map(|_| ()))
    }
}
