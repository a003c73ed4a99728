//! Invite-only account registry and the collateral escrow backing invitations.

use alloy_primitives::Address;
use alloy_sol_types::SolConstructor;
use bloom_contract_types::TransactionOptions;

use crate::{
    capabilities::Ownable,
    contract::{ConstructorArgs, Contract, Sent},
    errors::Result,
    interfaces::{self, IAccountRegistry, IInviteCollateralizer},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountRegistryArgs {
    /// BLT token the registry collateralizes invites in.
    pub blt: Address,
}

impl ConstructorArgs for AccountRegistryArgs {
    fn encode(&self) -> Vec<u8> {
        interfaces::AccountRegistry::constructorCall { blt: self.blt }.abi_encode()
    }
}

instance!(AccountRegistryInstance, "AccountRegistry", AccountRegistryArgs);
impl Ownable for AccountRegistryInstance {}

impl AccountRegistryInstance {
    pub async fn invite_collateralizer(
        &self,
        options: Option<TransactionOptions>,
    ) -> Result<Address> {
        let call = IAccountRegistry::inviteCollateralizerCall {};
        Ok(self.handle().call(call, options).await?._0)
    }

    pub async fn blt(&self, options: Option<TransactionOptions>) -> Result<Address> {
        Ok(self
            .handle()
            .call(IAccountRegistry::bltCall {}, options)
            .await?
            ._0)
    }

    /// Whether `account` holds a registered account.
    pub async fn accounts(
        &self,
        account: Address,
        options: Option<TransactionOptions>,
    ) -> Result<bool> {
        Ok(self
            .handle()
            .call(IAccountRegistry::accountsCall { account }, options)
            .await?
            ._0)
    }

    /// Whether `recipient` has a pending invite.
    pub async fn invites(
        &self,
        recipient: Address,
        options: Option<TransactionOptions>,
    ) -> Result<bool> {
        Ok(self
            .handle()
            .call(IAccountRegistry::invitesCall { recipient }, options)
            .await?
            ._0)
    }

    pub async fn invite(
        &self,
        recipient: Address,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<()>> {
        let call = IAccountRegistry::inviteCall { recipient };
        Ok(self.handle().send(call, options).await?.map(|_| ()))
    }

    pub async fn create_account(&self, options: Option<TransactionOptions>) -> Result<Sent<()>> {
        let call = IAccountRegistry::createAccountCall {};
        Ok(self.handle().send(call, options).await?.map(|_| ()))
    }

    pub async fn accept_invite(&self, options: Option<TransactionOptions>) -> Result<Sent<()>> {
        let call = IAccountRegistry::acceptInviteCall {};
        Ok(self.handle().send(call, options).await?.map(|_| ()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InviteCollateralizerArgs {
    pub registry: Address,
    pub blt: Address,
}

impl ConstructorArgs for InviteCollateralizerArgs {
    fn encode(&self) -> Vec<u8> {
        interfaces::InviteCollateralizer::constructorCall {
            registry: self.registry,
            blt: self.blt,
        }
        .abi_encode()
    }
}

instance!(
    InviteCollateralizerInstance,
    "InviteCollateralizer",
    InviteCollateralizerArgs
);
impl Ownable for InviteCollateralizerInstance {}

impl InviteCollateralizerInstance {
    pub async fn registry(&self, options: Option<TransactionOptions>) -> Result<Address> {
        Ok(self
            .handle()
            .call(IInviteCollateralizer::registryCall {}, options)
            .await?
            ._0)
    }

    pub async fn blt(&self, options: Option<TransactionOptions>) -> Result<Address> {
        Ok(self
            .handle()
            .call(IInviteCollateralizer::bltCall {}, options)
            .await?
            ._0)
    }

    /// Pull the invite collateral from `owner` into escrow.
    pub async fn take_collateral(
        &self,
        owner: Address,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<bool>> {
        let call = IInviteCollateralizer::takeCollateralCall { owner };
        Ok(self.handle().send(call, options).await?.map(|r| r._0))
    }
}
