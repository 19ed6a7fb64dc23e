//! LMDB environment setup.

use std::path::Path;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::governance::LmdbGovernanceStore;
use crate::LmdbError;

/// The schema version that the current code writes.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Number of named databases opened by [`LmdbEnvironment::open`].
const GOVERNANCE_DBS: u32 = 5;

const SCHEMA_VERSION_KEY: &[u8] = b"schema_version";

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    pub(crate) env: Env,
    pub(crate) proposals_db: Database<Bytes, Bytes>,
    pub(crate) votes_db: Database<Bytes, Bytes>,
    pub(crate) lots_db: Database<Bytes, Bytes>,
    pub(crate) params_db: Database<Bytes, Bytes>,
    pub(crate) meta_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    ///
    /// `max_dbs` is raised to the number of databases this backend needs if
    /// the caller passes less.
    pub fn open(path: &Path, max_dbs: u32, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;
        // SAFETY: the environment is opened once per path per process; callers
        // must not open the same directory twice concurrently.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(max_dbs.max(GOVERNANCE_DBS))
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let proposals_db = env.create_database(&mut wtxn, Some("proposals"))?;
        let votes_db = env.create_database(&mut wtxn, Some("votes"))?;
        let lots_db = env.create_database(&mut wtxn, Some("lots"))?;
        let params_db = env.create_database(&mut wtxn, Some("params"))?;
        let meta_db: Database<Bytes, Bytes> = env.create_database(&mut wtxn, Some("meta"))?;

        let stored = match meta_db.get(&wtxn, SCHEMA_VERSION_KEY)? {
            Some(bytes) => {
                let arr: [u8; 4] = bytes.try_into().map_err(|_| {
                    LmdbError::Serialization("schema_version has unexpected byte length".into())
                })?;
                u32::from_le_bytes(arr)
            }
            None => 0,
        };
        if stored > CURRENT_SCHEMA_VERSION {
            return Err(LmdbError::SchemaVersion {
                found: stored,
                supported: CURRENT_SCHEMA_VERSION,
            });
        }
        if stored < CURRENT_SCHEMA_VERSION {
            tracing::info!(from = stored, to = CURRENT_SCHEMA_VERSION, "initialising schema");
            meta_db.put(
                &mut wtxn,
                SCHEMA_VERSION_KEY,
                &CURRENT_SCHEMA_VERSION.to_le_bytes(),
            )?;
        }
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), map_size, "opened LMDB environment");
        Ok(Self {
            env,
            proposals_db,
            votes_db,
            lots_db,
            params_db,
            meta_db,
        })
    }

    /// The underlying heed environment.
    pub fn env(&self) -> &Env {
        &self.env
    }

    /// A governance store backed by this environment.
    pub fn governance_store(&self) -> LmdbGovernanceStore {
        LmdbGovernanceStore {
            env: self.env.clone(),
            proposals_db: self.proposals_db,
            votes_db: self.votes_db,
            lots_db: self.lots_db,
            params_db: self.params_db,
            meta_db: self.meta_db,
        }
    }

    /// Schema version recorded in the database.
    pub fn schema_version(&self) -> Result<u32, LmdbError> {
        let rtxn = self.env.read_txn()?;
        match self.meta_db.get(&rtxn, SCHEMA_VERSION_KEY)? {
            Some(bytes) => {
                let arr: [u8; 4] = bytes.try_into().map_err(|_| {
                    LmdbError::Serialization("schema_version has unexpected byte length".into())
                })?;
                Ok(u32::from_le_bytes(arr))
            }
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_environment_records_schema_version() {
        let dir = tempfile::tempdir().unwrap();
        let env = LmdbEnvironment::open(dir.path(), 8, 1 << 20).unwrap();
        assert_eq!(env.schema_version().unwrap(), CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn newer_schema_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        {
            let env = LmdbEnvironment::open(dir.path(), 8, 1 << 20).unwrap();
            let mut wtxn = env.env.write_txn().unwrap();
            env.meta_db
                .put(&mut wtxn, SCHEMA_VERSION_KEY, &(CURRENT_SCHEMA_VERSION + 1).to_le_bytes())
                .unwrap();
            wtxn.commit().unwrap();
        }
        let result = LmdbEnvironment::open(dir.path(), 8, 1 << 20);
        assert!(matches!(result, Err(LmdbError::SchemaVersion { .. })));
    }
}
