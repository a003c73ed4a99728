use alloy_primitives::{Address, Bytes, U256};
use bloom_contract_types::TransactionOptions;

use crate::{
    capabilities::{Controlled, Ownable},
    contract::{Contract, Sent},
    errors::Result,
    interfaces::{IApproveAndCallFallBack, ITokenController},
};

instance!(OwnableInstance, "Ownable", ());
impl Ownable for OwnableInstance {}

instance!(ControlledInstance, "Controlled", ());
impl Controlled for ControlledInstance {}

instance!(
    /// Hooks a MiniMe token calls on its controller before moving or approving tokens.
    TokenControllerInstance,
    "TokenController",
    ()
);

impl TokenControllerInstance {
    /// Ether sent to the token is forwarded here; `true` mints tokens for `owner`.
    pub async fn proxy_payment(
        &self,
        owner: Address,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<bool>> {
        let call = ITokenController::proxyPaymentCall { owner };
        Ok(self.handle().send(call, options).await?.map(|r| r._0))
    }

    pub async fn on_transfer(
        &self,
        from: Address,
        to: Address,
        amount: U256,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<bool>> {
        let call = ITokenController::onTransferCall { from, to, amount };
        Ok(self.handle().send(call, options).await?.map(|r| r._0))
    }

    pub async fn on_approve(
        &self,
        owner: Address,
        spender: Address,
        amount: U256,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<bool>> {
        let call = ITokenController::onApproveCall {
            owner,
            spender,
            amount,
        };
        Ok(self.handle().send(call, options).await?.map(|r| r._0))
    }
}

instance!(
    /// Receiver side of `approveAndCall`.
    ApproveAndCallFallBackInstance,
    "ApproveAndCallFallBack",
    ()
);

impl ApproveAndCallFallBackInstance {
    pub async fn receive_approval(
        &self,
        from: Address,
        amount: U256,
        token: Address,
        data: Bytes,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<()>> {
        let call = IApproveAndCallFallBack::receiveApprovalCall {
            from,
            amount,
            token,
            data,
        };
        Ok(self.handle().send(call, options).await?.map(|_| ()))
    }
}
