//! Deposit settlement: refund on success, burn otherwise.

use dnsdao_types::Coins;

use crate::keeper::Keeper;
use crate::proposal::{Proposal, ProposalStatus};

/// What happened to a finalized proposal's escrowed deposit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Settlement {
    Refunded,
    Burned,
    /// Zero deposit, nothing to move.
    NothingHeld,
    /// The bank call failed. The proposal status stands regardless.
    Failed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DepositAction {
    Refund,
    Burn,
}

impl DepositAction {
    /// `None` while the proposal is still open or awaiting its execution outcome.
    fn for_status(status: ProposalStatus) -> Option<Self> {
        if !status.is_terminal() {
            return None;
        }
        match status {
            ProposalStatus::Executed => Some(DepositAction::Refund),
            _ => Some(DepositAction::Burn),
        }
    }
}

impl Keeper {
    /// Refund or burn `deposit` according to the proposal's final status.
    ///
    /// Never returns an error: the status is already decided and stored.
    /// Failures are logged as critical.
    pub(crate) fn settle_deposit(&self, proposal: &Proposal, deposit: &Coins) -> Settlement {
        let id = proposal.id;
        let Some(action) = DepositAction::for_status(proposal.status) else {
            tracing::error!(critical = true, proposal_id = id, status = %proposal.status, "settlement requested for unfinished proposal");
            return Settlement::Failed(format!("proposal {id} is not finalized ({})", proposal.status));
        };
        if deposit.is_zero() {
            return Settlement::NothingHeld;
        }
        match action {
            DepositAction::Refund => {
                match self
                    .bank
                    .send_module_to_account(self.module_name(), &proposal.proposer, deposit)
                {
                    Ok(()) => {
                        tracing::info!(proposal_id = id, proposer = %proposal.proposer, amount = %deposit, "deposit refunded");
                        Settlement::Refunded
                    }
                    Err(e) => {
                        tracing::error!(
                            critical = true,
                            proposal_id = id,
                            proposer = %proposal.proposer,
                            amount = %deposit,
                            error = %e,
                            "failed to refund deposit for executed proposal"
                        );
                        Settlement::Failed(e.to_string())
                    }
                }
            }
            DepositAction::Burn => {
                match self.bank.burn(self.module_name(), deposit) {
                    Ok(()) => {
                        tracing::info!(proposal_id = id, status = %proposal.status, amount = %deposit, "deposit burned");
                        Settlement::Burned
                    }
                    Err(e) => {
                        tracing::error!(
                            critical = true,
                            proposal_id = id,
                            amount = %deposit,
                            error = %e,
                            "failed to burn deposit for rejected or failed proposal"
                        );
                        Settlement::Failed(e.to_string())
                    }
                }
            }
        }
    }
}
