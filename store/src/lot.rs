//! Voting-power lot storage trait.

use crate::StoreError;
use dnsdao_types::AccountAddress;

/// Voting-power lots keyed by `(voter, granting proposal id)`.
pub trait LotStore {
    fn put_lot(
        &self,
        voter: &AccountAddress,
        proposal_id: u64,
        data: &[u8],
    ) -> Result<(), StoreError>;

    /// Prefix scan: every lot owned by one voter, ordered by proposal id.
    fn iter_lots(&self, voter: &AccountAddress) -> Result<Vec<(u64, Vec<u8>)>, StoreError>;

    /// Whether at least one lot exists anywhere. Must not scan the table.
    fn has_any_lot(&self) -> Result<bool, StoreError>;

    /// Full-table scan ordered by `(voter, proposal id)`.
    fn iter_all_lots(&self) -> Result<Vec<(AccountAddress, u64, Vec<u8>)>, StoreError>;
}
