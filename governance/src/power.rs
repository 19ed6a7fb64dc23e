//! Voting power.
//!
//! Two mutually exclusive modes, picked by whether any lot exists anywhere:
//! before the first token grant, power is the spendable balance of the voting
//! denom. After it, power is the sum of the voter's own decayed lots and
//! balances are never consulted again. The switch is one-way since lots are
//! never deleted.

use dnsdao_types::{AccountAddress, BlockHeight};

use crate::expected::Bank;
use crate::keeper::Keeper;
use crate::lot::VotingPowerLot;
use crate::GovernanceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VotingPowerMode {
    Balance,
    Lots,
}

/// Balance mode: spendable balance of the voting denom.
pub fn balance_power(
    bank: &dyn Bank,
    voter: &AccountAddress,
    voting_denom: &str,
) -> Result<u128, GovernanceError> {
    Ok(bank.spendable_balance(voter, voting_denom)?)
}

/// Lot mode: sum of every lot's decayed contribution at `at`.
pub fn lot_power(
    lots: &[VotingPowerLot],
    at: BlockHeight,
    decay_duration_blocks: u64,
) -> Result<u128, GovernanceError> {
    lots.iter().try_fold(0u128, |acc, lot| {
        acc.checked_add(lot.effective_power(at, decay_duration_blocks))
            .ok_or_else(|| GovernanceError::Arithmetic("voting power overflow".into()))
    })
}

impl Keeper {
    /// Existence check only; never scans the lot table.
    pub fn voting_power_mode(&self) -> Result<VotingPowerMode, GovernanceError> {
        if self.store.has_any_lot()? {
            Ok(VotingPowerMode::Lots)
        } else {
            Ok(VotingPowerMode::Balance)
        }
    }

    /// Voting power of `voter` at `at`.
    pub fn voting_power(&self, voter: &AccountAddress, at: BlockHeight) -> Result<u128, GovernanceError> {
        let params = self.params()?;
        let power = match self.voting_power_mode()? {
            VotingPowerMode::Balance => {
                balance_power(self.bank.as_ref(), voter, &params.voting_token_denom)?
            }
            VotingPowerMode::Lots => {
                let lots = self.lots_of(voter)?;
                lot_power(&lots, at, params.voting_power_decay_duration_blocks)?
            }
        };
        tracing::debug!(voter = %voter, height = at.get(), power, "computed voting power");
        Ok(power)
    }

    /// Every lot owned by `voter`, ordered by granting proposal.
    pub fn voting_power_lots(&self, voter: &AccountAddress) -> Result<Vec<VotingPowerLot>, GovernanceError> {
        self.lots_of(voter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lot(initial_amount: u128, grant: u64, proposal_id: u64) -> VotingPowerLot {
        VotingPowerLot {
            voter: AccountAddress::parse("dns1qqqqqqqqqq").unwrap(),
            proposal_id,
            initial_amount,
            grant_height: BlockHeight::new(grant),
        }
    }

    #[test]
    fn lots_sum_independently() {
        let lots = vec![lot(1_000, 0, 1), lot(2_000, 50, 2)];
        // lot 1: 1000 * 0/100 = 0 (fully decayed at 100); lot 2: 2000 * 50/100 = 1000
        assert_eq!(lot_power(&lots, BlockHeight::new(100), 100).unwrap(), 1_000);
    }

    #[test]
    fn no_lots_is_zero_power() {
        assert_eq!(lot_power(&[], BlockHeight::new(10), 100).unwrap(), 0);
    }

    #[test]
    fn overflow_is_an_arithmetic_error() {
        let lots = vec![lot(u128::MAX, 0, 1), lot(1, 0, 2)];
        assert!(matches!(
            lot_power(&lots, BlockHeight::new(0), 0),
            Err(GovernanceError::Arithmetic(_))
        ));
    }
}
