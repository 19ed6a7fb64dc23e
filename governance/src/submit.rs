//! Proposal submission.

use dnsdao_types::{AccountAddress, Coins};

use crate::content::{normalize_tld, ContentEnvelope, ProposalContent};
use crate::events::{BlockContext, GovernanceEvent};
use crate::keeper::Keeper;
use crate::proposal::{Proposal, ProposalStatus};
use crate::GovernanceError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgSubmitProposal {
    pub proposer: String,
    pub title: String,
    pub description: String,
    pub content: Option<ContentEnvelope>,
    /// Must be empty when the required deposit is zero; otherwise ignored and
    /// the full required deposit is taken.
    pub initial_deposit: Coins,
}

impl MsgSubmitProposal {
    pub fn new(
        proposer: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        content: &ProposalContent,
    ) -> Result<Self, GovernanceError> {
        Ok(Self {
            proposer: proposer.into(),
            title: title.into(),
            description: description.into(),
            content: Some(content.pack()?),
            initial_deposit: Coins::empty(),
        })
    }

    pub fn with_initial_deposit(mut self, deposit: Coins) -> Self {
        self.initial_deposit = deposit;
        self
    }
}

impl Keeper {
    /// Validate a proposal, escrow its deposit and open its voting window.
    /// Returns the new proposal id.
    pub fn submit_proposal(
        &self,
        ctx: &mut BlockContext,
        msg: MsgSubmitProposal,
    ) -> Result<u64, GovernanceError> {
        let proposer = AccountAddress::parse(&msg.proposer)
            .map_err(|_| GovernanceError::InvalidAddress(format!("invalid proposer address: {}", msg.proposer)))?;

        let envelope = msg.content.as_ref().ok_or_else(|| {
            GovernanceError::InvalidProposalContent("proposal content is nil".into())
        })?;
        let content = envelope.unpack().map_err(|e| {
            GovernanceError::InvalidProposalContent(format!("failed to unpack proposal content: {e}"))
        })?;
        content.validate_basic()?;
        let content = content.canonical();
        let envelope = content.pack()?;

        if let Some(existing) = self.find_active_duplicate(&envelope)? {
            tracing::warn!(existing, "identical proposal already in voting period");
            return Err(GovernanceError::DuplicateActiveProposal(existing));
        }

        if let ProposalContent::AddTld(c) = &content {
            let label = normalize_tld(&c.tld);
            if self.registry.is_tld_permitted(&label)? {
                return Err(GovernanceError::InvalidProposalContent(format!(
                    "TLD '{label}' is already permitted or registered"
                )));
            }
        }

        let params = self.params()?;
        let deposit = if content.is_add_tld() {
            &params.add_tld_proposal_cost
        } else {
            &params.proposal_submission_deposit
        };

        // Read-only, so take it before any funds move.
        let snapshot = self.bank.supply(&params.voting_token_denom)?;

        if deposit.is_zero() {
            if !msg.initial_deposit.is_zero() {
                return Err(GovernanceError::InvalidRequest(
                    "parameter deposit/cost is zero, initial_deposit in message must also be zero".into(),
                ));
            }
        } else {
            self.bank
                .send_account_to_module(&proposer, self.module_name(), deposit)?;
            tracing::debug!(proposer = %proposer, amount = %deposit, "deposit escrowed");
        }

        let id = self.store.next_proposal_id()?;
        let submit_block = ctx.height;
        let proposal = Proposal {
            id,
            proposer: proposer.clone(),
            title: msg.title,
            description: msg.description,
            content: envelope,
            status: ProposalStatus::VotingPeriod,
            submit_block,
            voting_start_block: submit_block,
            voting_end_block: submit_block.saturating_add(params.voting_period_blocks),
            yes_votes: 0,
            no_votes: 0,
            abstain_votes: 0,
            total_voting_power_at_snapshot: snapshot,
        };
        self.set_proposal(&proposal)?;

        ctx.emit(GovernanceEvent::ProposalSubmitted {
            proposal_id: id,
            proposal_type: content.proposal_type(),
            proposer: proposer.clone(),
        });
        tracing::info!(
            proposal_id = id,
            proposer = %proposer,
            kind = content.proposal_type(),
            voting_end = proposal.voting_end_block.get(),
            snapshot,
            "proposal submitted"
        );
        Ok(id)
    }

    /// Id of a proposal still in its voting period whose content is identical.
    fn find_active_duplicate(&self, envelope: &ContentEnvelope) -> Result<Option<u64>, GovernanceError> {
        for (id, proposal) in self.all_proposals()? {
            let proposal = match proposal {
                Ok(p) => p,
                Err(e) => {
                    tracing::error!(proposal_id = id, error = %e, "unreadable proposal skipped in duplicate check");
                    continue;
                }
            };
            if proposal.status == ProposalStatus::VotingPeriod && proposal.content == *envelope {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }
}
