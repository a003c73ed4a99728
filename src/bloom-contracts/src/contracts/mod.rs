//! Instance types for every bound contract, and their factory aliases.

use crate::contract::ContractFactory;

/// Declare an instance type wrapping a [`crate::contract::ContractHandle`].
macro_rules! instance {
    ($(#[$meta:meta])* $ty:ident, $name:literal, $ctor:ty) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $ty {
            handle: $crate::contract::ContractHandle,
        }

        impl $crate::contract::Contract for $ty {
            const NAME: &'static str = $name;
            type Constructor = $ctor;

            fn from_handle(handle: $crate::contract::ContractHandle) -> Self {
                Self { handle }
            }

            fn handle(&self) -> &$crate::contract::ContractHandle {
                &self.handle
            }
        }
    };
}

pub mod control;
pub mod registry;
pub mod support;
pub mod token;

pub use control::{
    ApproveAndCallFallBackInstance, ControlledInstance, OwnableInstance, TokenControllerInstance,
};
pub use registry::{
    AccountRegistryArgs, AccountRegistryInstance, InviteCollateralizerArgs,
    InviteCollateralizerInstance,
};
pub use support::{
    ConvertLibInstance, MathInstance, MetaCoinInstance, MigrationsInstance, SafeErc20Instance,
    SafeMathInstance,
};
pub use token::{
    BltArgs, BltInstance, Erc20BasicInstance, Erc20Instance, MiniMeTokenArgs,
    MiniMeTokenFactoryInstance, MiniMeTokenInstance, MiniMeVestedTokenInstance,
};

pub type AccountRegistryContract = ContractFactory<AccountRegistryInstance>;
pub type ApproveAndCallFallBackContract = ContractFactory<ApproveAndCallFallBackInstance>;
pub type BltContract = ContractFactory<BltInstance>;
pub type ControlledContract = ContractFactory<ControlledInstance>;
pub type ConvertLibContract = ContractFactory<ConvertLibInstance>;
pub type Erc20Contract = ContractFactory<Erc20Instance>;
pub type Erc20BasicContract = ContractFactory<Erc20BasicInstance>;
pub type InviteCollateralizerContract = ContractFactory<InviteCollateralizerInstance>;
pub type MathContract = ContractFactory<MathInstance>;
pub type MetaCoinContract = ContractFactory<MetaCoinInstance>;
pub type MigrationsContract = ContractFactory<MigrationsInstance>;
pub type MiniMeTokenContract = ContractFactory<MiniMeTokenInstance>;
pub type MiniMeTokenFactoryContract = ContractFactory<MiniMeTokenFactoryInstance>;
pub type MiniMeVestedTokenContract = ContractFactory<MiniMeVestedTokenInstance>;
pub type OwnableContract = ContractFactory<OwnableInstance>;
pub type SafeErc20Contract = ContractFactory<SafeErc20Instance>;
pub type SafeMathContract = ContractFactory<SafeMathInstance>;
pub type TokenControllerContract = ContractFactory<TokenControllerInstance>;
