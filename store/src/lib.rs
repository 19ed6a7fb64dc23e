//! Abstract storage traits for the dnsdao governance module.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The governance core depends only on the traits and serializes its
//! own record types, so this crate never needs to know their shape.
//!
//! Layout: proposals by id, votes by (proposal id, voter), lots by
//! (voter, proposal id), one params record, and one proposal id sequence.

pub mod error;
pub mod governance;
pub mod lot;
pub mod params;
pub mod proposal;
pub mod vote;

pub use error::StoreError;
pub use governance::GovernanceStore;
pub use lot::LotStore;
pub use params::ParamsStore;
pub use proposal::ProposalStore;
pub use vote::VoteStore;
