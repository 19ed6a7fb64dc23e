//! Combined governance storage trait.

use crate::{LotStore, ParamsStore, ProposalStore, VoteStore};

/// Everything the governance module persists.
///
/// Implemented automatically for any backend that provides all four
/// collections.
pub trait GovernanceStore: ProposalStore + VoteStore + LotStore + ParamsStore {}

impl<T> GovernanceStore for T where T: ProposalStore + VoteStore + LotStore + ParamsStore {}
