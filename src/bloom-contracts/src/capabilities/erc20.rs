use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use bloom_contract_types::TransactionOptions;

use crate::{
    contract::{Contract, Sent},
    errors::Result,
    interfaces::{IERC20Basic, IERC20},
};

/// ERC20 without allowances.
#[async_trait]
pub trait Erc20Basic: Contract {
    async fn total_supply(&self, options: Option<TransactionOptions>) -> Result<U256> {
        Ok(self
            .handle()
            .call(IERC20Basic::totalSupplyCall {}, options)
            .await?
            ._0)
    }

    async fn balance_of(&self, who: Address, options: Option<TransactionOptions>) -> Result<U256> {
        Ok(self
            .handle()
            .call(IERC20Basic::balanceOfCall { who }, options)
            .await?
            ._0)
    }

    async fn transfer(
        &self,
        to: Address,
        value: U256,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<bool>> {
        let call = IERC20Basic::transferCall { to, value };
        Ok(self.handle().send(call, options).await?.map(|r| r._0))
    }
}

/// Allowance half of ERC20.
#[async_trait]
pub trait Erc20: Erc20Basic {
    async fn allowance(
        &self,
        owner: Address,
        spender: Address,
        options: Option<TransactionOptions>,
    ) -> Result<U256> {
        Ok(self
            .handle()
            .call(IERC20::allowanceCall { owner, spender }, options)
            .await?
            ._0)
    }

    async fn approve(
        &self,
        spender: Address,
        value: U256,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<bool>> {
        let call = IERC20::approveCall { spender, value };
        Ok(self.handle().send(call, options).await?.map(|r| r._0))
    }

    async fn transfer_from(
        &self,
        from: Address,
        to: Address,
        value: U256,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<bool>> {
        let call = IERC20::transferFromCall { from, to, value };
        Ok(self.handle().send(call, options).await?.map(|r| r._0))
    }
}
