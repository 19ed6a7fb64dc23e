//! Fundamental types for the dnsdao governance module.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! account addresses, coins and denominations, fixed-point decimals, block
//! heights, and the governance parameter set.

pub mod address;
pub mod coin;
pub mod dec;
pub mod error;
pub mod height;
pub mod params;

pub use address::AccountAddress;
pub use coin::{validate_denom, Coin, Coins};
pub use dec::Dec;
pub use error::DaoTypesError;
pub use height::BlockHeight;
pub use params::DaoParams;
