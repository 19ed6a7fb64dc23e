//! The governance keeper: owns the module's store handle and its collaborators.
//!
//! Lifecycle operations live in their own modules (`submit`, `intake`,
//! `end_block`, ...) as further `impl Keeper` blocks. This file holds
//! construction, params access and typed record helpers over the byte-level
//! store traits.

use std::sync::Arc;

use dnsdao_store::GovernanceStore;
use dnsdao_types::{AccountAddress, DaoParams};

use crate::expected::{Bank, TldRegistry};
use crate::lot::VotingPowerLot;
use crate::proposal::Proposal;
use crate::vote::Vote;
use crate::GovernanceError;

/// Default name of the module's holding account.
pub const MODULE_NAME: &str = "dao";

pub struct Keeper {
    pub(crate) store: Arc<dyn GovernanceStore + Send + Sync>,
    pub(crate) bank: Arc<dyn Bank + Send + Sync>,
    pub(crate) registry: Arc<dyn TldRegistry + Send + Sync>,
    authority: AccountAddress,
    module_name: String,
}

impl Keeper {
    /// Build a keeper.
    ///
    /// # Panics
    ///
    /// Panics if `authority` is not a valid account address. This is a wiring
    /// mistake in the host and there is no sensible way to run without it.
    pub fn new(
        store: Arc<dyn GovernanceStore + Send + Sync>,
        bank: Arc<dyn Bank + Send + Sync>,
        registry: Arc<dyn TldRegistry + Send + Sync>,
        authority: &str,
    ) -> Self {
        let authority = match AccountAddress::parse(authority) {
            Ok(addr) => addr,
            Err(_) => panic!("invalid authority address: {authority}"),
        };
        Self {
            store,
            bank,
            registry,
            authority,
            module_name: MODULE_NAME.to_string(),
        }
    }

    /// Use a different holding account name for escrow, mint and burn.
    pub fn with_module_name(mut self, module_name: impl Into<String>) -> Self {
        self.module_name = module_name.into();
        self
    }

    pub fn authority(&self) -> &AccountAddress {
        &self.authority
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    // ── Params ───────────────────────────────────────────────────────────

    pub fn params(&self) -> Result<DaoParams, GovernanceError> {
        match self.store.get_params()? {
            Some(bytes) => Ok(bincode::deserialize(&bytes)?),
            None => Err(GovernanceError::Params(
                "module params not initialised".into(),
            )),
        }
    }

    pub(crate) fn params_or_default(&self) -> Result<DaoParams, GovernanceError> {
        match self.store.get_params()? {
            Some(bytes) => Ok(bincode::deserialize(&bytes)?),
            None => Ok(DaoParams::default()),
        }
    }

    /// Validate and store params.
    pub fn set_params(&self, params: &DaoParams) -> Result<(), GovernanceError> {
        params.validate()?;
        self.store.put_params(&bincode::serialize(params)?)?;
        Ok(())
    }

    /// Replace params on behalf of `authority`, which must be the module authority.
    pub fn update_params(&self, authority: &str, params: DaoParams) -> Result<(), GovernanceError> {
        if authority != self.authority.as_str() {
            return Err(GovernanceError::Unauthorized {
                expected: self.authority.to_string(),
                got: authority.to_string(),
            });
        }
        self.set_params(&params)?;
        tracing::info!(
            voting_period_blocks = params.voting_period_blocks,
            decay_blocks = params.voting_power_decay_duration_blocks,
            "params updated"
        );
        Ok(())
    }

    // ── Record helpers ───────────────────────────────────────────────────

    pub(crate) fn get_proposal(&self, id: u64) -> Result<Option<Proposal>, GovernanceError> {
        self.store
            .get_proposal(id)?
            .map(|bytes| Proposal::decode(&bytes))
            .transpose()
    }

    pub(crate) fn set_proposal(&self, proposal: &Proposal) -> Result<(), GovernanceError> {
        self.store.put_proposal(proposal.id, &proposal.encode()?)?;
        Ok(())
    }

    /// Every proposal in ascending id order. Records that fail to decode are
    /// returned as errors in place so the caller decides whether to skip them.
    pub(crate) fn all_proposals(
        &self,
    ) -> Result<Vec<(u64, Result<Proposal, GovernanceError>)>, GovernanceError> {
        Ok(self
            .store
            .iter_proposals()?
            .into_iter()
            .map(|(id, bytes)| (id, Proposal::decode(&bytes)))
            .collect())
    }

    pub(crate) fn get_vote(
        &self,
        proposal_id: u64,
        voter: &AccountAddress,
    ) -> Result<Option<Vote>, GovernanceError> {
        self.store
            .get_vote(proposal_id, voter)?
            .map(|bytes| Vote::decode(&bytes))
            .transpose()
    }

    pub(crate) fn set_vote(&self, vote: &Vote) -> Result<(), GovernanceError> {
        self.store
            .put_vote(vote.proposal_id, &vote.voter, &vote.encode()?)?;
        Ok(())
    }

    pub(crate) fn votes_for(&self, proposal_id: u64) -> Result<Vec<Vote>, GovernanceError> {
        self.store
            .iter_votes(proposal_id)?
            .iter()
            .map(|(_, bytes)| Vote::decode(bytes))
            .collect()
    }

    pub(crate) fn set_lot(&self, lot: &VotingPowerLot) -> Result<(), GovernanceError> {
        self.store
            .put_lot(&lot.voter, lot.proposal_id, &lot.encode()?)?;
        Ok(())
    }

    pub(crate) fn lots_of(&self, voter: &AccountAddress) -> Result<Vec<VotingPowerLot>, GovernanceError> {
        self.store
            .iter_lots(voter)?
            .iter()
            .map(|(_, bytes)| VotingPowerLot::decode(bytes))
            .collect()
    }
}
