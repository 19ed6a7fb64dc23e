//! Proposal storage trait.

use crate::StoreError;

/// Proposals keyed by numeric id, plus the monotonic id sequence.
pub trait ProposalStore {
    /// Return the current sequence value and advance it by one.
    ///
    /// The first call on an empty store returns 0.
    fn next_proposal_id(&self) -> Result<u64, StoreError>;

    /// Return the value the next call to [`next_proposal_id`](Self::next_proposal_id)
    /// will hand out, without advancing.
    fn peek_proposal_id(&self) -> Result<u64, StoreError>;

    /// Overwrite the sequence (genesis import).
    fn set_proposal_id(&self, next: u64) -> Result<(), StoreError>;

    /// Store (insert or overwrite) a proposal record.
    fn put_proposal(&self, id: u64, data: &[u8]) -> Result<(), StoreError>;

    /// Get a proposal record by id.
    fn get_proposal(&self, id: u64) -> Result<Option<Vec<u8>>, StoreError>;

    /// All proposal records in ascending id order.
    fn iter_proposals(&self) -> Result<Vec<(u64, Vec<u8>)>, StoreError>;
}
