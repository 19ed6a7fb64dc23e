//! Collaborators owned by other modules.
//!
//! The governance core never implements a token ledger or the domain registry
//! itself. It consumes them through these traits, which the host wires to the
//! real modules and tests wire to the nullables.

use dnsdao_types::{AccountAddress, Coins};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    #[error("insufficient funds: {account} cannot cover {needed}")]
    InsufficientFunds { account: String, needed: String },

    #[error("account {0} is not allowed to receive funds")]
    BlockedAddress(String),

    #[error("unknown module account: {0}")]
    UnknownModule(String),

    #[error("bank backend: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("TLD '{0}' is already permitted")]
    AlreadyPermitted(String),

    #[error("registry backend: {0}")]
    Backend(String),
}

/// Token ledger facade.
///
/// Module accounts are addressed by name, accounts by address. Every call is
/// atomic: on error no balance has moved.
pub trait Bank {
    /// Spendable balance of one denomination.
    fn spendable_balance(&self, account: &AccountAddress, denom: &str) -> Result<u128, BankError>;

    /// Total supply of one denomination.
    fn supply(&self, denom: &str) -> Result<u128, BankError>;

    fn send_account_to_module(
        &self,
        from: &AccountAddress,
        module: &str,
        amount: &Coins,
    ) -> Result<(), BankError>;

    fn send_module_to_account(
        &self,
        module: &str,
        to: &AccountAddress,
        amount: &Coins,
    ) -> Result<(), BankError>;

    fn mint(&self, module: &str, amount: &Coins) -> Result<(), BankError>;

    fn burn(&self, module: &str, amount: &Coins) -> Result<(), BankError>;
}

/// The domain-name registry, seen from governance.
pub trait TldRegistry {
    /// Whether the label is already open for registration.
    fn is_tld_permitted(&self, tld: &str) -> Result<bool, RegistryError>;

    /// One-way notification that a label may now be registered.
    fn permit_tld(&self, tld: &str) -> Result<(), RegistryError>;
}
