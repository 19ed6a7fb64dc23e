//! Vote intake.
//!
//! A vote is stored with the power computed at cast time and is counted only
//! by the end-of-block tally, which rescans stored votes. Nothing here touches
//! the proposal's running totals.

use dnsdao_types::AccountAddress;

use crate::events::{BlockContext, GovernanceEvent};
use crate::keeper::Keeper;
use crate::proposal::ProposalStatus;
use crate::vote::{Vote, VoteOption};
use crate::GovernanceError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgVote {
    pub proposal_id: u64,
    pub voter: String,
    pub option: VoteOption,
}

impl MsgVote {
    pub fn new(proposal_id: u64, voter: impl Into<String>, option: VoteOption) -> Self {
        Self {
            proposal_id,
            voter: voter.into(),
            option,
        }
    }
}

impl Keeper {
    pub fn vote(&self, ctx: &mut BlockContext, msg: MsgVote) -> Result<(), GovernanceError> {
        let voter = AccountAddress::parse(&msg.voter)
            .map_err(|_| GovernanceError::InvalidAddress(format!("invalid voter address: {}", msg.voter)))?;

        let id = msg.proposal_id;
        let proposal = self
            .get_proposal(id)?
            .ok_or(GovernanceError::ProposalNotFound(id))?;

        if proposal.status != ProposalStatus::VotingPeriod {
            tracing::warn!(proposal_id = id, status = %proposal.status, "vote on inactive proposal");
            return Err(GovernanceError::InactiveProposal {
                id,
                status: proposal.status.to_string(),
            });
        }
        if proposal.voting_closed_at(ctx.height) {
            return Err(GovernanceError::VotingPeriodEnded {
                id,
                voting_end: proposal.voting_end_block.get(),
            });
        }
        if self.get_vote(id, &voter)?.is_some() {
            return Err(GovernanceError::AlreadyVoted {
                id,
                voter: voter.to_string(),
            });
        }
        // Checked after the proposal state so a closed or missing proposal
        // reports that first.
        if msg.option == VoteOption::Unspecified {
            return Err(GovernanceError::InvalidRequest(
                "vote option must be yes, no or abstain".into(),
            ));
        }

        let voting_power = self.voting_power(&voter, ctx.height)?;
        if voting_power == 0 {
            return Err(GovernanceError::NoVotingPower(voter.to_string()));
        }

        let vote = Vote {
            proposal_id: id,
            voter: voter.clone(),
            option: msg.option,
            voting_power,
        };
        self.set_vote(&vote)?;

        ctx.emit(GovernanceEvent::VoteCast {
            proposal_id: id,
            voter: voter.clone(),
            option: msg.option,
            voting_power,
        });
        tracing::info!(proposal_id = id, voter = %voter, option = %msg.option, voting_power, "vote cast");
        Ok(())
    }
}
