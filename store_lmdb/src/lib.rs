//! LMDB storage backend for the dnsdao governance module.
//!
//! Implements all storage traits from `dnsdao-store` using the `heed` LMDB bindings.
//! Each logical collection maps to one LMDB database within a single environment.

pub mod environment;
pub mod error;
pub mod governance;
pub mod keys;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use governance::LmdbGovernanceStore;
