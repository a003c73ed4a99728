//! ERC20, MiniMe and vested-token instances, plus the MiniMe clone factory.

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolConstructor;
use bloom_contract_types::{CloneTokenParams, TransactionOptions};

use crate::{
    capabilities::{Controlled, Erc20, Erc20Basic, MiniMeToken, VestedToken},
    contract::{ConstructorArgs, Contract, Sent},
    errors::Result,
    interfaces::{self, IMiniMeTokenFactory},
};

instance!(Erc20BasicInstance, "ERC20Basic", ());
impl Erc20Basic for Erc20BasicInstance {}

instance!(Erc20Instance, "ERC20", ());
impl Erc20Basic for Erc20Instance {}
impl Erc20 for Erc20Instance {}

/// Constructor arguments of a MiniMe token (vested or not).
///
/// `token.snapshot_block` is the parent snapshot block; it is ignored on-chain when there is no
/// parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MiniMeTokenArgs {
    pub token_factory: Address,
    pub parent_token: Option<Address>,
    pub token: CloneTokenParams,
}

impl MiniMeTokenArgs {
    /// A root token (no parent).
    pub fn new(token_factory: Address, token: CloneTokenParams) -> Self {
        Self {
            token_factory,
            parent_token: None,
            token,
        }
    }

    pub fn with_parent(mut self, parent_token: Address, snapshot_block: U256) -> Self {
        self.parent_token = Some(parent_token);
        self.token.snapshot_block = snapshot_block;
        self
    }
}

impl ConstructorArgs for MiniMeTokenArgs {
    fn encode(&self) -> Vec<u8> {
        interfaces::MiniMeToken::constructorCall {
            tokenFactory: self.token_factory,
            parentToken: self.parent_token.unwrap_or(Address::ZERO),
            parentSnapShotBlock: self.token.snapshot_block,
            tokenName: self.token.name.clone(),
            decimalUnits: self.token.decimals,
            tokenSymbol: self.token.symbol.clone(),
            transfersEnabled: self.token.transfers_enabled,
        }
        .abi_encode()
    }
}

instance!(MiniMeTokenInstance, "MiniMeToken", MiniMeTokenArgs);
impl Erc20Basic for MiniMeTokenInstance {}
impl Erc20 for MiniMeTokenInstance {}
impl Controlled for MiniMeTokenInstance {}
impl MiniMeToken for MiniMeTokenInstance {}

instance!(MiniMeVestedTokenInstance, "MiniMeVestedToken", MiniMeTokenArgs);
impl Erc20Basic for MiniMeVestedTokenInstance {}
impl Erc20 for MiniMeVestedTokenInstance {}
impl Controlled for MiniMeVestedTokenInstance {}
impl MiniMeToken for MiniMeVestedTokenInstance {}
impl VestedToken for MiniMeVestedTokenInstance {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BltArgs {
    pub token_factory: Address,
}

impl ConstructorArgs for BltArgs {
    fn encode(&self) -> Vec<u8> {
        interfaces::BLT::constructorCall {
            tokenFactory: self.token_factory,
        }
        .abi_encode()
    }
}

instance!(
    /// The Bloom token: a vested MiniMe token with fixed name, symbol and decimals.
    BltInstance,
    "BLT",
    BltArgs
);
impl Erc20Basic for BltInstance {}
impl Erc20 for BltInstance {}
impl Controlled for BltInstance {}
impl MiniMeToken for BltInstance {}
impl VestedToken for BltInstance {}

instance!(MiniMeTokenFactoryInstance, "MiniMeTokenFactory", ());

impl MiniMeTokenFactoryInstance {
    /// Create a token cloned from `parent_token` (or a fresh root token when `None`) and resolve
    /// to its address.
    ///
    /// The factory emits no creation event, so the address is the simulated return value. A clone
    /// mined by someone else between simulation and inclusion shifts it; clone through the parent
    /// token's [`MiniMeToken::create_clone_token`] when that matters.
    pub async fn create_clone_token(
        &self,
        parent_token: Option<Address>,
        params: CloneTokenParams,
        options: Option<TransactionOptions>,
    ) -> Result<Sent<Address>> {
        let call = IMiniMeTokenFactory::createCloneTokenCall {
            parentToken: parent_token.unwrap_or(Address::ZERO),
            snapshotBlock: params.snapshot_block,
            tokenName: params.name,
            decimalUnits: params.decimals,
            tokenSymbol: params.symbol,
            transfersEnabled: params.transfers_enabled,
        };
        Ok(self.handle().send(call, options).await?.map(|r| r._0))
    }
}
