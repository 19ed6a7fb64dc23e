//! Genesis import and export.

use std::path::Path;

use serde::{Deserialize, Serialize};

use dnsdao_types::DaoParams;

use crate::keeper::Keeper;
use crate::lot::VotingPowerLot;
use crate::proposal::Proposal;
use crate::vote::Vote;
use crate::GovernanceError;

/// The module's complete state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    pub params: DaoParams,
    #[serde(default)]
    pub proposals: Vec<Proposal>,
    #[serde(default)]
    pub votes: Vec<Vote>,
    #[serde(default)]
    pub lots: Vec<VotingPowerLot>,
    /// The id the next submitted proposal receives.
    #[serde(default)]
    pub next_proposal_id: u64,
}

impl GenesisState {
    pub fn from_json_str(s: &str) -> Result<Self, GovernanceError> {
        serde_json::from_str(s).map_err(|e| GovernanceError::Serialization(e.to_string()))
    }

    pub fn from_json_file(path: &Path) -> Result<Self, GovernanceError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| GovernanceError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&content)
    }

    pub fn to_json_string(&self) -> Result<String, GovernanceError> {
        serde_json::to_string_pretty(self).map_err(|e| GovernanceError::Serialization(e.to_string()))
    }

    /// Structural checks that do not depend on params.
    pub fn validate(&self) -> Result<(), GovernanceError> {
        for p in &self.proposals {
            if p.id >= self.next_proposal_id {
                return Err(GovernanceError::InvalidRequest(format!(
                    "proposal {} is not below next proposal id {}",
                    p.id, self.next_proposal_id
                )));
            }
        }
        for v in &self.votes {
            if !self.proposals.iter().any(|p| p.id == v.proposal_id) {
                return Err(GovernanceError::InvalidRequest(format!(
                    "vote by {} references unknown proposal {}",
                    v.voter, v.proposal_id
                )));
            }
        }
        Ok(())
    }
}

impl Keeper {
    /// Load state. Invalid params are replaced by the defaults.
    pub fn init_genesis(&self, genesis: &GenesisState) -> Result<(), GovernanceError> {
        genesis.validate()?;

        let params = match genesis.params.validate() {
            Ok(()) => genesis.params.clone(),
            Err(e) => {
                tracing::warn!(error = %e, "genesis params invalid, using defaults");
                DaoParams::default()
            }
        };
        self.set_params(&params)?;

        for proposal in &genesis.proposals {
            self.set_proposal(proposal)?;
        }
        for vote in &genesis.votes {
            self.set_vote(vote)?;
        }
        for lot in &genesis.lots {
            self.set_lot(lot)?;
        }
        self.store.set_proposal_id(genesis.next_proposal_id)?;

        tracing::info!(
            proposals = genesis.proposals.len(),
            votes = genesis.votes.len(),
            lots = genesis.lots.len(),
            next_proposal_id = genesis.next_proposal_id,
            "genesis loaded"
        );
        Ok(())
    }

    /// Dump state. Missing params export as the defaults.
    pub fn export_genesis(&self) -> Result<GenesisState, GovernanceError> {
        let params = self.params_or_default()?;
        let proposals = self
            .store
            .iter_proposals()?
            .iter()
            .map(|(_, bytes)| Proposal::decode(bytes))
            .collect::<Result<Vec<_>, _>>()?;
        let votes = self
            .store
            .iter_all_votes()?
            .iter()
            .map(|(_, _, bytes)| Vote::decode(bytes))
            .collect::<Result<Vec<_>, _>>()?;
        let lots = self
            .store
            .iter_all_lots()?
            .iter()
            .map(|(_, _, bytes)| VotingPowerLot::decode(bytes))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(GenesisState {
            params,
            proposals,
            votes,
            lots,
            next_proposal_id: self.store.peek_proposal_id()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_genesis_json_roundtrip() {
        let genesis = GenesisState::default();
        let json = genesis.to_json_string().unwrap();
        assert_eq!(GenesisState::from_json_str(&json).unwrap(), genesis);
    }

    #[test]
    fn params_only_genesis_parses() {
        let json = serde_json::json!({ "params": DaoParams::default() }).to_string();
        let genesis = GenesisState::from_json_str(&json).unwrap();
        assert!(genesis.proposals.is_empty());
        assert_eq!(genesis.next_proposal_id, 0);
    }

    #[test]
    fn vote_for_unknown_proposal_is_rejected() {
        let genesis = GenesisState {
            votes: vec![Vote {
                proposal_id: 4,
                voter: dnsdao_types::AccountAddress::parse("dns1qqqqqqqqqq").unwrap(),
                option: crate::vote::VoteOption::Yes,
                voting_power: 1,
            }],
            ..GenesisState::default()
        };
        assert!(genesis.validate().is_err());
    }
}
