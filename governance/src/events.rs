//! Events emitted during block processing, and the per-block context that
//! collects them.

use dnsdao_types::{AccountAddress, BlockHeight};

use crate::proposal::ProposalStatus;
use crate::vote::VoteOption;

pub const EVENT_TYPE_SUBMIT_PROPOSAL: &str = "submit_proposal";
pub const EVENT_TYPE_PROPOSAL_VOTE: &str = "proposal_vote";
pub const EVENT_TYPE_PROPOSAL_FINISHED: &str = "proposal_finished";

pub const ATTRIBUTE_KEY_PROPOSAL_ID: &str = "proposal_id";
pub const ATTRIBUTE_KEY_PROPOSAL_TYPE: &str = "proposal_type";
pub const ATTRIBUTE_KEY_PROPOSER: &str = "proposer";
pub const ATTRIBUTE_KEY_VOTER: &str = "voter";
pub const ATTRIBUTE_KEY_VOTE_OPTION: &str = "option";
pub const ATTRIBUTE_KEY_VOTING_POWER: &str = "voting_power";
pub const ATTRIBUTE_KEY_PROPOSAL_STATUS: &str = "proposal_status";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GovernanceEvent {
    ProposalSubmitted {
        proposal_id: u64,
        proposal_type: &'static str,
        proposer: AccountAddress,
    },
    VoteCast {
        proposal_id: u64,
        voter: AccountAddress,
        option: VoteOption,
        voting_power: u128,
    },
    ProposalFinished {
        proposal_id: u64,
        status: ProposalStatus,
    },
}

impl GovernanceEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            GovernanceEvent::ProposalSubmitted { .. } => EVENT_TYPE_SUBMIT_PROPOSAL,
            GovernanceEvent::VoteCast { .. } => EVENT_TYPE_PROPOSAL_VOTE,
            GovernanceEvent::ProposalFinished { .. } => EVENT_TYPE_PROPOSAL_FINISHED,
        }
    }

    /// Key/value attributes in emission order.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        match self {
            GovernanceEvent::ProposalSubmitted {
                proposal_id,
                proposal_type,
                proposer,
            } => vec![
                (ATTRIBUTE_KEY_PROPOSAL_ID, proposal_id.to_string()),
                (ATTRIBUTE_KEY_PROPOSAL_TYPE, proposal_type.to_string()),
                (ATTRIBUTE_KEY_PROPOSER, proposer.to_string()),
            ],
            GovernanceEvent::VoteCast {
                proposal_id,
                voter,
                option,
                voting_power,
            } => vec![
                (ATTRIBUTE_KEY_PROPOSAL_ID, proposal_id.to_string()),
                (ATTRIBUTE_KEY_VOTER, voter.to_string()),
                (ATTRIBUTE_KEY_VOTE_OPTION, option.to_string()),
                (ATTRIBUTE_KEY_VOTING_POWER, voting_power.to_string()),
            ],
            GovernanceEvent::ProposalFinished {
                proposal_id,
                status,
            } => vec![
                (ATTRIBUTE_KEY_PROPOSAL_ID, proposal_id.to_string()),
                (ATTRIBUTE_KEY_PROPOSAL_STATUS, status.to_string()),
            ],
        }
    }
}

/// State of the block being processed.
///
/// Passed by `&mut` into every keeper operation; the host drains `events`
/// after the block is committed.
#[derive(Clone, Debug, Default)]
pub struct BlockContext {
    pub height: BlockHeight,
    pub events: Vec<GovernanceEvent>,
}

impl BlockContext {
    pub fn new(height: BlockHeight) -> Self {
        Self {
            height,
            events: Vec::new(),
        }
    }

    /// Move to the next block, keeping nothing from this one.
    pub fn advance_to(&mut self, height: BlockHeight) {
        self.height = height;
        self.events.clear();
    }

    pub fn emit(&mut self, event: GovernanceEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<GovernanceEvent> {
        std::mem::take(&mut self.events)
    }
}
