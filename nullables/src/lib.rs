//! Nullable infrastructure for deterministic testing.
//!
//! In-memory stand-ins for everything the governance keeper talks to:
//! the module store, the token ledger and the domain registry. They:
//! - Return deterministic values
//! - Can be inspected and steered programmatically, including failure injection
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod bank;
pub mod registry;
pub mod store;

pub use bank::NullBank;
pub use registry::NullRegistry;
pub use store::NullGovernanceStore;
