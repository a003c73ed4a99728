use alloy_primitives::Address;
use async_trait::async_trait;
use bloom_contract_types::TransactionOptions;

use crate::{
    contract::{Contract, Sent},
    errors::Result,
    interfaces::{IControlled, IOwnable},
};

/// Single-owner access control.
#[async_trait]
pub trait Ownable: Contract {
    async fn owner(&self, options: Option<TransactionOptions>) -> Result<Address> {
        Ok(self.handle().call(IOwnable::ownerCall {}, options).await?._0)
    }

    async fn transfer_ownership(
        &self,
        new_owner: Address,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<()>> {
        let call = IOwnable::transferOwnershipCall {
            newOwner: new_owner,
        };
        Ok(self.handle().send(call, options).await?.map(|_| ()))
    }
}

/// A controller address interposed on token operations.
#[async_trait]
pub trait Controlled: Contract {
    async fn controller(&self, options: Option<TransactionOptions>) -> Result<Address> {
        Ok(self
            .handle()
            .call(IControlled::controllerCall {}, options)
            .await?
            ._0)
    }

    async fn change_controller(
        &self,
        new_controller: Address,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<()>> {
        let call = IControlled::changeControllerCall {
            newController: new_controller,
        };
        Ok(self.handle().send(call, options).await?.map(|_| ()))
    }
}
