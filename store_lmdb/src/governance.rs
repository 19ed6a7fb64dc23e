//! LMDB implementation of the governance store traits.

use heed::types::Bytes;
use heed::{Database, Env};

use dnsdao_store::{LotStore, ParamsStore, ProposalStore, StoreError, VoteStore};
use dnsdao_types::AccountAddress;

use crate::keys::{decode_lot_key, decode_u64, decode_vote_key, lot_key, lot_prefix, proposal_key, vote_key};
use crate::LmdbError;

const PROPOSAL_SEQ_KEY: &[u8] = b"proposal_seq";
const PARAMS_KEY: &[u8] = b"params";

pub struct LmdbGovernanceStore {
    pub(crate) env: Env,
    pub(crate) proposals_db: Database<Bytes, Bytes>,
    pub(crate) votes_db: Database<Bytes, Bytes>,
    pub(crate) lots_db: Database<Bytes, Bytes>,
    pub(crate) params_db: Database<Bytes, Bytes>,
    pub(crate) meta_db: Database<Bytes, Bytes>,
}

impl LmdbGovernanceStore {
    fn read_seq(&self, txn: &heed::RoTxn) -> Result<u64, LmdbError> {
        match self.meta_db.get(txn, PROPOSAL_SEQ_KEY)? {
            Some(bytes) => decode_u64(bytes),
            None => Ok(0),
        }
    }
}

impl ProposalStore for LmdbGovernanceStore {
    fn next_proposal_id(&self) -> Result<u64, StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let id = self.read_seq(&wtxn)?;
        let next = id
            .checked_add(1)
            .ok_or_else(|| StoreError::Corruption("proposal id sequence exhausted".into()))?;
        self.meta_db
            .put(&mut wtxn, PROPOSAL_SEQ_KEY, &next.to_be_bytes())
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(id)
    }

    fn peek_proposal_id(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.read_seq(&rtxn)?)
    }

    fn set_proposal_id(&self, next: u64) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.meta_db
            .put(&mut wtxn, PROPOSAL_SEQ_KEY, &next.to_be_bytes())
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn put_proposal(&self, id: u64, data: &[u8]) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.proposals_db
            .put(&mut wtxn, &proposal_key(id), data)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_proposal(&self, id: u64) -> Result<Option<Vec<u8>>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let value = self
            .proposals_db
            .get(&rtxn, &proposal_key(id))
            .map_err(LmdbError::from)?;
        Ok(value.map(|v| v.to_vec()))
    }

    fn iter_proposals(&self) -> Result<Vec<(u64, Vec<u8>)>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = self.proposals_db.iter(&rtxn).map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (key, val) = entry.map_err(LmdbError::from)?;
            results.push((decode_u64(key)?, val.to_vec()));
        }
        Ok(results)
    }
}

impl VoteStore for LmdbGovernanceStore {
    fn put_vote(
        &self,
        proposal_id: u64,
        voter: &AccountAddress,
        data: &[u8],
    ) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.votes_db
            .put(&mut wtxn, &vote_key(proposal_id, voter), data)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_vote(
        &self,
        proposal_id: u64,
        voter: &AccountAddress,
    ) -> Result<Option<Vec<u8>>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let value = self
            .votes_db
            .get(&rtxn, &vote_key(proposal_id, voter))
            .map_err(LmdbError::from)?;
        Ok(value.map(|v| v.to_vec()))
    }

    fn iter_votes(&self, proposal_id: u64) -> Result<Vec<(AccountAddress, Vec<u8>)>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let prefix = proposal_key(proposal_id);
        let iter = self
            .votes_db
            .prefix_iter(&rtxn, &prefix)
            .map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (key, val) = entry.map_err(LmdbError::from)?;
            let (_, voter) = decode_vote_key(key)?;
            results.push((voter, val.to_vec()));
        }
        Ok(results)
    }

    fn iter_all_votes(&self) -> Result<Vec<(u64, AccountAddress, Vec<u8>)>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = self.votes_db.iter(&rtxn).map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (key, val) = entry.map_err(LmdbError::from)?;
            let (id, voter) = decode_vote_key(key)?;
            results.push((id, voter, val.to_vec()));
        }
        Ok(results)
    }
}

impl LotStore for LmdbGovernanceStore {
    fn put_lot(
        &self,
        voter: &AccountAddress,
        proposal_id: u64,
        data: &[u8],
    ) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.lots_db
            .put(&mut wtxn, &lot_key(voter, proposal_id), data)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn iter_lots(&self, voter: &AccountAddress) -> Result<Vec<(u64, Vec<u8>)>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let prefix = lot_prefix(voter);
        let iter = self
            .lots_db
            .prefix_iter(&rtxn, &prefix)
            .map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (key, val) = entry.map_err(LmdbError::from)?;
            let (_, id) = decode_lot_key(key)?;
            results.push((id, val.to_vec()));
        }
        Ok(results)
    }

    fn has_any_lot(&self) -> Result<bool, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let first = self.lots_db.first(&rtxn).map_err(LmdbError::from)?;
        Ok(first.is_some())
    }

    fn iter_all_lots(&self) -> Result<Vec<(AccountAddress, u64, Vec<u8>)>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = self.lots_db.iter(&rtxn).map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (key, val) = entry.map_err(LmdbError::from)?;
            let (voter, id) = decode_lot_key(key)?;
            results.push((voter, id, val.to_vec()));
        }
        Ok(results)
    }
}

impl ParamsStore for LmdbGovernanceStore {
    fn put_params(&self, data: &[u8]) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.params_db
            .put(&mut wtxn, PARAMS_KEY, data)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_params(&self) -> Result<Option<Vec<u8>>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let value = self.params_db.get(&rtxn, PARAMS_KEY).map_err(LmdbError::from)?;
        Ok(value.map(|v| v.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LmdbEnvironment;

    fn open() -> (tempfile::TempDir, LmdbGovernanceStore) {
        let dir = tempfile::tempdir().unwrap();
        let env = LmdbEnvironment::open(dir.path(), 8, 1 << 22).unwrap();
        (dir, env.governance_store())
    }

    fn addr(data: &str) -> AccountAddress {
        AccountAddress::parse(format!("dns1{data}")).unwrap()
    }

    #[test]
    fn sequence_starts_at_zero_and_advances() {
        let (_dir, store) = open();
        assert_eq!(store.peek_proposal_id().unwrap(), 0);
        assert_eq!(store.next_proposal_id().unwrap(), 0);
        assert_eq!(store.next_proposal_id().unwrap(), 1);
        assert_eq!(store.peek_proposal_id().unwrap(), 2);
        store.set_proposal_id(10).unwrap();
        assert_eq!(store.next_proposal_id().unwrap(), 10);
    }

    #[test]
    fn proposals_iterate_in_numeric_order() {
        let (_dir, store) = open();
        store.put_proposal(256, b"b").unwrap();
        store.put_proposal(3, b"a").unwrap();
        store.put_proposal(3, b"a2").unwrap();
        let all = store.iter_proposals().unwrap();
        assert_eq!(all, vec![(3, b"a2".to_vec()), (256, b"b".to_vec())]);
        assert!(store.get_proposal(4).unwrap().is_none());
    }

    #[test]
    fn vote_scan_is_limited_to_one_proposal() {
        let (_dir, store) = open();
        let alice = addr("qqqqqqqqqa");
        let bob = addr("qqqqqqqqqc");
        store.put_vote(1, &alice, b"x").unwrap();
        store.put_vote(1, &bob, b"y").unwrap();
        store.put_vote(2, &alice, b"z").unwrap();

        let votes = store.iter_votes(1).unwrap();
        assert_eq!(votes.len(), 2);
        assert_eq!(store.get_vote(2, &alice).unwrap().unwrap(), b"z".to_vec());
        assert!(store.get_vote(2, &bob).unwrap().is_none());
        assert_eq!(store.iter_all_votes().unwrap().len(), 3);
    }

    #[test]
    fn lot_scan_does_not_leak_across_addresses() {
        let (_dir, store) = open();
        let short = addr("qqqqqqqq");
        let long = addr("qqqqqqqqq");
        assert!(!store.has_any_lot().unwrap());
        store.put_lot(&short, 1, b"s").unwrap();
        store.put_lot(&long, 2, b"l").unwrap();
        assert!(store.has_any_lot().unwrap());

        assert_eq!(store.iter_lots(&short).unwrap(), vec![(1, b"s".to_vec())]);
        assert_eq!(store.iter_lots(&long).unwrap(), vec![(2, b"l".to_vec())]);
        assert_eq!(store.iter_all_lots().unwrap().len(), 2);
    }

    #[test]
    fn params_roundtrip_and_persist() {
        let dir = tempfile::tempdir().unwrap();
        {
            let env = LmdbEnvironment::open(dir.path(), 8, 1 << 22).unwrap();
            let store = env.governance_store();
            assert!(store.get_params().unwrap().is_none());
            store.put_params(b"params-v1").unwrap();
            store.next_proposal_id().unwrap();
        }
        let env = LmdbEnvironment::open(dir.path(), 8, 1 << 22).unwrap();
        let store = env.governance_store();
        assert_eq!(store.get_params().unwrap().unwrap(), b"params-v1".to_vec());
        assert_eq!(store.peek_proposal_id().unwrap(), 1);
    }
}
