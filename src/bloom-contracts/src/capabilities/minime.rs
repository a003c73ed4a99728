//! MiniMe token: snapshot balances, cloning, controller-gated minting.

use alloy_primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use bloom_contract_types::{CloneTokenParams, TransactionOptions};

use crate::{
    capabilities::{Controlled, Erc20},
    contract::Sent,
    errors::Result,
    interfaces::IMiniMeToken,
};

#[async_trait]
pub trait MiniMeToken: Erc20 + Controlled {
    async fn name(&self, options: Option<TransactionOptions>) -> Result<String> {
        Ok(self.handle().call(IMiniMeToken::nameCall {}, options).await?._0)
    }

    async fn symbol(&self, options: Option<TransactionOptions>) -> Result<String> {
        Ok(self.handle().call(IMiniMeToken::symbolCall {}, options).await?._0)
    }

    async fn decimals(&self, options: Option<TransactionOptions>) -> Result<u8> {
        Ok(self
            .handle()
            .call(IMiniMeToken::decimalsCall {}, options)
            .await?
            ._0)
    }

    async fn version(&self, options: Option<TransactionOptions>) -> Result<String> {
        Ok(self.handle().call(IMiniMeToken::versionCall {}, options).await?._0)
    }

    async fn creation_block(&self, options: Option<TransactionOptions>) -> Result<U256> {
        Ok(self
            .handle()
            .call(IMiniMeToken::creationBlockCall {}, options)
            .await?
            ._0)
    }

    /// Zero address for a root token.
    async fn parent_token(&self, options: Option<TransactionOptions>) -> Result<Address> {
        Ok(self
            .handle()
            .call(IMiniMeToken::parentTokenCall {}, options)
            .await?
            ._0)
    }

    async fn parent_snapshot_block(&self, options: Option<TransactionOptions>) -> Result<U256> {
        Ok(self
            .handle()
            .call(IMiniMeToken::parentSnapShotBlockCall {}, options)
            .await?
            ._0)
    }

    async fn token_factory(&self, options: Option<TransactionOptions>) -> Result<Address> {
        Ok(self
            .handle()
            .call(IMiniMeToken::tokenFactoryCall {}, options)
            .await?
            ._0)
    }

    async fn transfers_enabled(&self, options: Option<TransactionOptions>) -> Result<bool> {
        Ok(self
            .handle()
            .call(IMiniMeToken::transfersEnabledCall {}, options)
            .await?
            ._0)
    }

    async fn balance_of_at(
        &self,
        owner: Address,
        block_number: U256,
        options: Option<TransactionOptions>,
    ) -> Result<U256> {
        let call = IMiniMeToken::balanceOfAtCall {
            owner,
            blockNumber: block_number,
        };
        Ok(self.handle().call(call, options).await?._0)
    }

    async fn total_supply_at(
        &self,
        block_number: U256,
        options: Option<TransactionOptions>,
    ) -> Result<U256> {
        let call = IMiniMeToken::totalSupplyAtCall {
            blockNumber: block_number,
        };
        Ok(self.handle().call(call, options).await?._0)
    }

    /// Resolves to the clone's address, taken from the `NewCloneToken` event of the receipt. The
    /// simulated return value is used only when the receipt carries no such event.
    async fn create_clone_token(
        &self,
        params: CloneTokenParams,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<Address>> {
        let call = IMiniMeToken::createCloneTokenCall {
            cloneTokenName: params.name,
            cloneDecimalUnits: params.decimals,
            cloneTokenSymbol: params.symbol,
            snapshotBlock: params.snapshot_block,
            transfersEnabled: params.transfers_enabled,
        };
        let sent = self.handle().send(call, options).await?;
        let created = sent
            .event::<IMiniMeToken::NewCloneToken>(self.address())
            .map(|e| e.cloneToken);
        Ok(sent.map(|r| created.unwrap_or(r._0)))
    }

    async fn generate_tokens(
        &self,
        owner: Address,
        amount: U256,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<bool>> {
        let call = IMiniMeToken::generateTokensCall { owner, amount };
        Ok(self.handle().send(call, options).await?.map(|r| r._0))
    }

    async fn destroy_tokens(
        &self,
        owner: Address,
        amount: U256,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<bool>> {
        let call = IMiniMeToken::destroyTokensCall { owner, amount };
        Ok(self.handle().send(call, options).await?.map(|r| r._0))
    }

    async fn enable_transfers(
        &self,
        transfers_enabled: bool,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<()>> {
        let call = IMiniMeToken::enableTransfersCall {
            transfersEnabled: transfers_enabled,
        };
        Ok(self.handle().send(call, options).await?.map(|_| ()))
    }

    /// Approve, then notify `spender` through `receiveApproval`.
    async fn approve_and_call(
        &self,
        spender: Address,
        amount: U256,
        extra_data: Bytes,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<bool>> {
        let call = IMiniMeToken::approveAndCallCall {
            spender,
            amount,
            extraData: extra_data,
        };
        Ok(self.handle().send(call, options).await?.map(|r| r._0))
    }

    /// Recover tokens (or ether, for the zero address) sent to the contract by mistake.
    async fn claim_tokens(
        &self,
        token: Address,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<()>> {
        let call = IMiniMeToken::claimTokensCall { token };
        Ok(self.handle().send(call, options).await?.map(|_| ()))
    }
}
