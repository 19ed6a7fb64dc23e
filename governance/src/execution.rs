//! Execution of passed proposals, one handler per content kind.

use dnsdao_types::DaoParams;

use crate::content::{normalize_tld, AddTldProposalContent, ProposalContent, RequestTokensProposalContent};
use crate::events::BlockContext;
use crate::keeper::Keeper;
use crate::lot::VotingPowerLot;
use crate::proposal::Proposal;
use crate::GovernanceError;

impl Keeper {
    /// Run the effect of a passed proposal. An error means the proposal fails.
    pub(crate) fn execute_proposal(
        &self,
        ctx: &BlockContext,
        params: &DaoParams,
        proposal: &Proposal,
        content: &ProposalContent,
    ) -> Result<(), GovernanceError> {
        match content {
            ProposalContent::AddTld(c) => self.execute_add_tld(proposal.id, c),
            ProposalContent::RequestTokens(c) => {
                self.execute_request_tokens(ctx, params, proposal.id, c)
            }
        }
    }

    fn execute_add_tld(&self, proposal_id: u64, content: &AddTldProposalContent) -> Result<(), GovernanceError> {
        let label = normalize_tld(&content.tld);
        tracing::info!(proposal_id, tld = %label, "executing add-tld proposal");
        self.registry.permit_tld(&label)?;
        Ok(())
    }

    /// Mint into the module account, then pay out. A failed payout burns the
    /// minted amount back so supply is unchanged.
    fn execute_request_tokens(
        &self,
        ctx: &BlockContext,
        params: &DaoParams,
        proposal_id: u64,
        content: &RequestTokensProposalContent,
    ) -> Result<(), GovernanceError> {
        let recipient = content.recipient_address()?;
        let amount = &content.amount_requested;
        tracing::info!(proposal_id, recipient = %recipient, amount = %amount, "executing request-tokens proposal");

        self.bank.mint(self.module_name(), amount)?;

        if let Err(send_err) = self
            .bank
            .send_module_to_account(self.module_name(), &recipient, amount)
        {
            if let Err(burn_err) = self.bank.burn(self.module_name(), amount) {
                tracing::error!(
                    critical = true,
                    proposal_id,
                    amount = %amount,
                    send_error = %send_err,
                    burn_error = %burn_err,
                    "failed to burn minted coins after failed payout"
                );
            }
            return Err(send_err.into());
        }

        let granted = amount.amount_of(&params.voting_token_denom);
        if granted > 0 {
            let lot = VotingPowerLot {
                voter: recipient.clone(),
                proposal_id,
                initial_amount: granted,
                grant_height: ctx.height,
            };
            // The payout already happened; a lost lot must not undo it.
            match self.set_lot(&lot) {
                Ok(()) => tracing::info!(
                    proposal_id,
                    voter = %recipient,
                    initial_amount = granted,
                    height = ctx.height.get(),
                    "voting power lot granted"
                ),
                Err(e) => tracing::error!(
                    critical = true,
                    proposal_id,
                    voter = %recipient,
                    initial_amount = granted,
                    error = %e,
                    "failed to record voting power lot"
                ),
            }
        }
        Ok(())
    }
}
