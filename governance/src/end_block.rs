//! The end-of-block pass: tally, decide, execute and settle every proposal
//! whose voting window has closed.
//!
//! Each expired proposal is processed independently in ascending id order.
//! A failure specific to one proposal forces it to `Failed`; it never stops
//! the others.
//!
//! The decided status and tallies are written before any bank or registry
//! call. If that write fails the pass aborts with nothing moved, and the next
//! pass picks the proposal up again. Once the decision is stored the proposal
//! is never selected again, so a failed write after execution or settlement
//! is logged as critical and the pass carries on.

use dnsdao_types::DaoParams;

use crate::events::{BlockContext, GovernanceEvent};
use crate::keeper::Keeper;
use crate::proposal::{Proposal, ProposalStatus};
use crate::settlement::Settlement;
use crate::tally::{decide, TallyDecision, TallyResult};
use crate::GovernanceError;

/// Outcome of one proposal finalized in this block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FinalizedProposal {
    pub proposal_id: u64,
    pub status: ProposalStatus,
    pub settlement: Settlement,
}

impl Keeper {
    pub fn end_block(&self, ctx: &mut BlockContext) -> Result<Vec<FinalizedProposal>, GovernanceError> {
        let params = self.params()?;
        let height = ctx.height;

        let mut expired = Vec::new();
        for (id, proposal) in self.all_proposals()? {
            match proposal {
                Ok(p) if p.status == ProposalStatus::VotingPeriod && p.voting_closed_at(height) => {
                    expired.push(p)
                }
                Ok(_) => {}
                Err(e) => tracing::error!(
                    critical = true,
                    proposal_id = id,
                    error = %e,
                    "unreadable proposal record skipped"
                ),
            }
        }

        let mut finalized = Vec::with_capacity(expired.len());
        for proposal in expired {
            finalized.push(self.finalize_proposal(ctx, &params, proposal)?);
        }
        Ok(finalized)
    }

    fn finalize_proposal(
        &self,
        ctx: &mut BlockContext,
        params: &DaoParams,
        mut proposal: Proposal,
    ) -> Result<FinalizedProposal, GovernanceError> {
        let id = proposal.id;
        tracing::debug!(proposal_id = id, voting_end = proposal.voting_end_block.get(), height = ctx.height.get(), "finalizing proposal");

        let content = proposal.unpack_content();
        // An unreadable kind falls back to the general deposit.
        let deposit = match &content {
            Ok(c) if c.is_add_tld() => params.add_tld_proposal_cost.clone(),
            _ => params.proposal_submission_deposit.clone(),
        };

        let decision = self.tally_proposal(params, &mut proposal);
        proposal.status = match (decision, &content) {
            (Err(e), _) => {
                tracing::error!(proposal_id = id, error = %e, "tally failed");
                ProposalStatus::Failed
            }
            (Ok(_), Err(e)) => {
                tracing::error!(proposal_id = id, error = %e, "cannot unpack proposal content");
                ProposalStatus::Failed
            }
            (Ok(TallyDecision::Rejected(reason)), Ok(_)) => {
                tracing::info!(proposal_id = id, ?reason, "proposal rejected");
                ProposalStatus::Rejected
            }
            (Ok(TallyDecision::Passed), Ok(_)) => {
                tracing::info!(proposal_id = id, "proposal passed");
                ProposalStatus::Passed
            }
        };

        // Nothing has moved yet, so a failed write here is safe to retry.
        self.set_proposal(&proposal).map_err(|e| {
            tracing::error!(proposal_id = id, error = %e, "failed to persist proposal decision");
            e
        })?;

        if let (ProposalStatus::Passed, Ok(content)) = (proposal.status, &content) {
            proposal.status = match self.execute_proposal(ctx, params, &proposal, content) {
                Ok(()) => {
                    tracing::info!(proposal_id = id, "proposal executed");
                    ProposalStatus::Executed
                }
                Err(e) => {
                    tracing::error!(proposal_id = id, error = %e, "proposal execution failed");
                    ProposalStatus::Failed
                }
            };
            if let Err(e) = self.set_proposal(&proposal) {
                tracing::error!(
                    critical = true,
                    proposal_id = id,
                    status = %proposal.status,
                    error = %e,
                    "failed to persist execution outcome"
                );
            }
        }
        let status = proposal.status;

        let settlement = self.settle_deposit(&proposal, &deposit);

        ctx.emit(GovernanceEvent::ProposalFinished {
            proposal_id: id,
            status,
        });
        tracing::info!(
            proposal_id = id,
            status = %status,
            yes = proposal.yes_votes,
            no = proposal.no_votes,
            abstain = proposal.abstain_votes,
            snapshot = proposal.total_voting_power_at_snapshot,
            "proposal finished"
        );

        Ok(FinalizedProposal {
            proposal_id: id,
            status,
            settlement,
        })
    }

    /// Rescan stored votes, write the sums onto the proposal and decide.
    fn tally_proposal(
        &self,
        params: &DaoParams,
        proposal: &mut Proposal,
    ) -> Result<TallyDecision, GovernanceError> {
        let votes = self.votes_for(proposal.id)?;
        let tally = TallyResult::from_votes(&votes)?;
        proposal.yes_votes = tally.yes;
        proposal.no_votes = tally.no;
        proposal.abstain_votes = tally.abstain;
        decide(
            &tally,
            proposal.total_voting_power_at_snapshot,
            params.quorum_percent,
            params.min_yes_threshold_percent,
        )
    }
}
