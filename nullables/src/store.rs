//! Nullable store: thread-safe in-memory governance storage for testing.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use dnsdao_store::{LotStore, ParamsStore, ProposalStore, StoreError, VoteStore};
use dnsdao_types::AccountAddress;

/// An in-memory implementation of every governance store trait.
///
/// Besides plain storage it can be told to fail specific operations, so tests
/// can drive the error paths of the end-of-block pass.
pub struct NullGovernanceStore {
    proposals: Mutex<BTreeMap<u64, Vec<u8>>>,
    votes: Mutex<BTreeMap<(u64, AccountAddress), Vec<u8>>>,
    lots: Mutex<BTreeMap<(AccountAddress, u64), Vec<u8>>>,
    params: Mutex<Option<Vec<u8>>>,
    next_id: Mutex<u64>,
    failing_vote_scans: Mutex<BTreeSet<u64>>,
    fail_lot_writes: AtomicBool,
    fail_proposal_writes: AtomicBool,
    lot_scans: AtomicUsize,
}

impl NullGovernanceStore {
    pub fn new() -> Self {
        Self {
            proposals: Mutex::new(BTreeMap::new()),
            votes: Mutex::new(BTreeMap::new()),
            lots: Mutex::new(BTreeMap::new()),
            params: Mutex::new(None),
            next_id: Mutex::new(0),
            failing_vote_scans: Mutex::new(BTreeSet::new()),
            fail_lot_writes: AtomicBool::new(false),
            fail_proposal_writes: AtomicBool::new(false),
            lot_scans: AtomicUsize::new(0),
        }
    }

    /// Make every vote scan for `proposal_id` fail with a backend error.
    pub fn fail_vote_scan(&self, proposal_id: u64) {
        self.failing_vote_scans.lock().unwrap().insert(proposal_id);
    }

    /// Make every lot write fail with a backend error.
    pub fn fail_lot_writes(&self, fail: bool) {
        self.fail_lot_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every proposal write fail with a backend error.
    pub fn fail_proposal_writes(&self, fail: bool) {
        self.fail_proposal_writes.store(fail, Ordering::SeqCst);
    }

    /// Overwrite a raw proposal record, bypassing the keeper.
    pub fn corrupt_proposal(&self, id: u64, bytes: Vec<u8>) {
        self.proposals.lock().unwrap().insert(id, bytes);
    }

    /// How many per-voter lot scans have been served.
    pub fn lot_scan_count(&self) -> usize {
        self.lot_scans.load(Ordering::SeqCst)
    }

    pub fn lot_count(&self) -> usize {
        self.lots.lock().unwrap().len()
    }

    pub fn vote_count(&self) -> usize {
        self.votes.lock().unwrap().len()
    }
}

impl Default for NullGovernanceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProposalStore for NullGovernanceStore {
    fn next_proposal_id(&self) -> Result<u64, StoreError> {
        let mut next = self.next_id.lock().unwrap();
        let id = *next;
        *next = id
            .checked_add(1)
            .ok_or_else(|| StoreError::Corruption("proposal id sequence exhausted".into()))?;
        Ok(id)
    }

    fn peek_proposal_id(&self) -> Result<u64, StoreError> {
        Ok(*self.next_id.lock().unwrap())
    }

    fn set_proposal_id(&self, next: u64) -> Result<(), StoreError> {
        *self.next_id.lock().unwrap() = next;
        Ok(())
    }

    fn put_proposal(&self, id: u64, data: &[u8]) -> Result<(), StoreError> {
        if self.fail_proposal_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected proposal write failure".into()));
        }
        self.proposals.lock().unwrap().insert(id, data.to_vec());
        Ok(())
    }

    fn get_proposal(&self, id: u64) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.proposals.lock().unwrap().get(&id).cloned())
    }

    fn iter_proposals(&self) -> Result<Vec<(u64, Vec<u8>)>, StoreError> {
        Ok(self
            .proposals
            .lock()
            .unwrap()
            .iter()
            .map(|(id, data)| (*id, data.clone()))
            .collect())
    }
}

impl VoteStore for NullGovernanceStore {
    fn put_vote(
        &self,
        proposal_id: u64,
        voter: &AccountAddress,
        data: &[u8],
    ) -> Result<(), StoreError> {
        self.votes
            .lock()
            .unwrap()
            .insert((proposal_id, voter.clone()), data.to_vec());
        Ok(())
    }

    fn get_vote(
        &self,
        proposal_id: u64,
        voter: &AccountAddress,
    ) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .get(&(proposal_id, voter.clone()))
            .cloned())
    }

    fn iter_votes(&self, proposal_id: u64) -> Result<Vec<(AccountAddress, Vec<u8>)>, StoreError> {
        if self.failing_vote_scans.lock().unwrap().contains(&proposal_id) {
            return Err(StoreError::Backend(format!(
                "injected vote scan failure for proposal {proposal_id}"
            )));
        }
        Ok(self
            .votes
            .lock()
            .unwrap()
            .iter()
            .filter(|((id, _), _)| *id == proposal_id)
            .map(|((_, voter), data)| (voter.clone(), data.clone()))
            .collect())
    }

    fn iter_all_votes(&self) -> Result<Vec<(u64, AccountAddress, Vec<u8>)>, StoreError> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .iter()
            .map(|((id, voter), data)| (*id, voter.clone(), data.clone()))
            .collect())
    }
}

impl LotStore for NullGovernanceStore {
    fn put_lot(
        &self,
        voter: &AccountAddress,
        proposal_id: u64,
        data: &[u8],
    ) -> Result<(), StoreError> {
        if self.fail_lot_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected lot write failure".into()));
        }
        self.lots
            .lock()
            .unwrap()
            .insert((voter.clone(), proposal_id), data.to_vec());
        Ok(())
    }

    fn iter_lots(&self, voter: &AccountAddress) -> Result<Vec<(u64, Vec<u8>)>, StoreError> {
        self.lot_scans.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .lots
            .lock()
            .unwrap()
            .iter()
            .filter(|((owner, _), _)| owner == voter)
            .map(|((_, id), data)| (*id, data.clone()))
            .collect())
    }

    fn has_any_lot(&self) -> Result<bool, StoreError> {
        Ok(!self.lots.lock().unwrap().is_empty())
    }

    fn iter_all_lots(&self) -> Result<Vec<(AccountAddress, u64, Vec<u8>)>, StoreError> {
        Ok(self
            .lots
            .lock()
            .unwrap()
            .iter()
            .map(|((voter, id), data)| (voter.clone(), *id, data.clone()))
            .collect())
    }
}

impl ParamsStore for NullGovernanceStore {
    fn put_params(&self, data: &[u8]) -> Result<(), StoreError> {
        *self.params.lock().unwrap() = Some(data.to_vec());
        Ok(())
    }

    fn get_params(&self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.params.lock().unwrap().clone())
    }
}
