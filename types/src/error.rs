//! Top-level error type shared across crates.

use thiserror::Error;

/// Validation errors raised while constructing or checking shared types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DaoTypesError {
    #[error("invalid account address: {0}")]
    InvalidAddress(String),

    #[error("invalid denom: {0}")]
    InvalidDenom(String),

    #[error("invalid coins: {0}")]
    InvalidCoins(String),

    #[error("invalid decimal: {0}")]
    InvalidDecimal(String),

    #[error("invalid params: {0}")]
    InvalidParams(String),
}
