//! Governance proposals and their lifecycle.

use std::fmt;

use serde::{Deserialize, Serialize};

use dnsdao_types::{AccountAddress, BlockHeight};

use crate::content::{ContentEnvelope, ProposalContent};
use crate::GovernanceError;

/// Where a proposal is in its lifecycle.
///
/// `VotingPeriod` is the only initial state. `Passed` is stored only between
/// the decision and the execution outcome of one end-of-block pass, and stays
/// visible only if writing that outcome failed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalStatus {
    #[default]
    Unspecified,
    VotingPeriod,
    Passed,
    Rejected,
    Failed,
    Executed,
}

impl ProposalStatus {
    /// No transition leaves a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ProposalStatus::Rejected | ProposalStatus::Failed | ProposalStatus::Executed
        )
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProposalStatus::Unspecified => "PROPOSAL_STATUS_UNSPECIFIED",
            ProposalStatus::VotingPeriod => "PROPOSAL_STATUS_VOTING_PERIOD",
            ProposalStatus::Passed => "PROPOSAL_STATUS_PASSED",
            ProposalStatus::Rejected => "PROPOSAL_STATUS_REJECTED",
            ProposalStatus::Failed => "PROPOSAL_STATUS_FAILED",
            ProposalStatus::Executed => "PROPOSAL_STATUS_EXECUTED",
        };
        f.write_str(name)
    }
}

/// A governance proposal. Never deleted once stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: u64,
    pub proposer: AccountAddress,
    pub title: String,
    pub description: String,
    /// Canonical encoded content, compared byte-for-byte by duplicate detection.
    pub content: ContentEnvelope,
    pub status: ProposalStatus,
    pub submit_block: BlockHeight,
    pub voting_start_block: BlockHeight,
    /// Last block (inclusive) at which votes are accepted.
    pub voting_end_block: BlockHeight,
    pub yes_votes: u128,
    pub no_votes: u128,
    pub abstain_votes: u128,
    /// Supply of the voting denom at submission; the quorum denominator.
    pub total_voting_power_at_snapshot: u128,
}

impl Proposal {
    pub fn unpack_content(&self) -> Result<ProposalContent, GovernanceError> {
        self.content.unpack()
    }

    /// Whether the voting window has closed as of `height`.
    pub fn voting_closed_at(&self, height: BlockHeight) -> bool {
        height > self.voting_end_block
    }

    pub fn encode(&self) -> Result<Vec<u8>, GovernanceError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, GovernanceError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
