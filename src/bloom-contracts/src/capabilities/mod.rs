//! Capability sets shared across contract roles.
//!
//! Each trait carries default implementations; an instance type opts in with an empty `impl`.

pub mod erc20;
pub mod minime;
pub mod ownership;
pub mod vesting;

pub use erc20::{Erc20, Erc20Basic};
pub use minime::MiniMeToken;
pub use ownership::{Controlled, Ownable};
pub use vesting::VestedToken;
