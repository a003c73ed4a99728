//! Vesting grants layered on a MiniMe token.

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use bloom_contract_types::{TokenGrant, TokenGrantStatus, TransactionOptions};

use crate::{
    capabilities::MiniMeToken,
    contract::Sent,
    errors::Result,
    interfaces::IVestedToken,
};

#[async_trait]
pub trait VestedToken: MiniMeToken {
    async fn token_grants_count(
        &self,
        holder: Address,
        options: Option<TransactionOptions>,
    ) -> Result<U256> {
        let call = IVestedToken::tokenGrantsCountCall { holder };
        Ok(self.handle().call(call, options).await?._0)
    }

    /// Balance minus tokens still locked in grants.
    async fn spendable_balance_of(
        &self,
        holder: Address,
        options: Option<TransactionOptions>,
    ) -> Result<U256> {
        let call = IVestedToken::spendableBalanceOfCall { holder };
        Ok(self.handle().call(call, options).await?._0)
    }

    async fn set_can_create_grants(
        &self,
        addr: Address,
        allowed: bool,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<()>> {
        let call = IVestedToken::setCanCreateGrantsCall { addr, allowed };
        Ok(self.handle().send(call, options).await?.map(|_| ()))
    }

    /// Raw grant record at `index` in the holder's grant list.
    async fn grants(
        &self,
        holder: Address,
        index: U256,
        options: Option<TransactionOptions>,
    ) -> Result<TokenGrant> {
        let r = self
            .handle()
            .call(IVestedToken::grantsCall { holder, index }, options)
            .await?;
        Ok(TokenGrant {
            granter: r.granter,
            value: r.value,
            cliff: r.cliff,
            vesting: r.vesting,
            start: r.start,
            revokable: r.revokable,
            burns_on_revoke: r.burnsOnRevoke,
        })
    }

    async fn token_grant(
        &self,
        holder: Address,
        grant_id: U256,
        options: Option<TransactionOptions>,
    ) -> Result<TokenGrantStatus> {
        let call = IVestedToken::tokenGrantCall {
            holder,
            grantId: grant_id,
        };
        let r = self.handle().call(call, options).await?;
        Ok(TokenGrantStatus {
            granter: r.granter,
            value: r.value,
            vested: r.vested,
            start: r.start,
            cliff: r.cliff,
            vesting: r.vesting,
            revokable: r.revokable,
            burns_on_revoke: r.burnsOnRevoke,
        })
    }

    /// Unix time after which every token the holder has is transferable.
    async fn last_token_is_transferable_date(
        &self,
        holder: Address,
        options: Option<TransactionOptions>,
    ) -> Result<u64> {
        let call = IVestedToken::lastTokenIsTransferableDateCall { holder };
        Ok(self.handle().call(call, options).await?._0)
    }

    #[allow(clippy::too_many_arguments)]
    async fn grant_vested_tokens(
        &self,
        to: Address,
        value: U256,
        start: u64,
        cliff: u64,
        vesting: u64,
        revokable: bool,
        burns_on_revoke: bool,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<()>> {
        let call = IVestedToken::grantVestedTokensCall {
            to,
            value,
            start,
            cliff,
            vesting,
            revokable,
            burnsOnRevoke: burns_on_revoke,
        };
        Ok(self.handle().send(call, options).await?.map(|_| ()))
    }

    async fn transferable_tokens(
        &self,
        holder: Address,
        time: u64,
        options: Option<TransactionOptions>,
    ) -> Result<U256> {
        let call = IVestedToken::transferableTokensCall { holder, time };
        Ok(self.handle().call(call, options).await?._0)
    }

    async fn revoke_token_grant(
        &self,
        holder: Address,
        receiver: Address,
        grant_id: U256,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<()>> {
        let call = IVestedToken::revokeTokenGrantCall {
            holder,
            receiver,
            grantId: grant_id,
        };
        Ok(self.handle().send(call, options).await?.map(|_| ()))
    }

    async fn change_vesting_whitelister(
        &self,
        new_whitelister: Address,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<()>> {
        let call = IVestedToken::changeVestingWhitelisterCall {
            newWhitelister: new_whitelister,
        };
        Ok(self.handle().send(call, options).await?.map(|_| ()))
    }
}
