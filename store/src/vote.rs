//! Vote storage trait.

use crate::StoreError;
use dnsdao_types::AccountAddress;

/// Votes keyed by `(proposal id, voter)`.
///
/// Records are written once and never mutated or deleted.
pub trait VoteStore {
    fn put_vote(
        &self,
        proposal_id: u64,
        voter: &AccountAddress,
        data: &[u8],
    ) -> Result<(), StoreError>;

    fn get_vote(
        &self,
        proposal_id: u64,
        voter: &AccountAddress,
    ) -> Result<Option<Vec<u8>>, StoreError>;

    /// Prefix scan: every vote on one proposal, ordered by voter.
    fn iter_votes(&self, proposal_id: u64) -> Result<Vec<(AccountAddress, Vec<u8>)>, StoreError>;

    /// Full-table scan ordered by `(proposal id, voter)`.
    fn iter_all_votes(&self) -> Result<Vec<(u64, AccountAddress, Vec<u8>)>, StoreError>;
}
