//! Voting-power lots: discrete grants that decay linearly to zero.
//!
//! Lots are immutable once written. Their effective power is computed on read
//! and never written back.

use serde::{Deserialize, Serialize};

use dnsdao_types::{AccountAddress, BlockHeight};

use crate::GovernanceError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingPowerLot {
    pub voter: AccountAddress,
    /// The request-tokens proposal whose execution granted this lot.
    pub proposal_id: u64,
    pub initial_amount: u128,
    pub grant_height: BlockHeight,
}

impl VotingPowerLot {
    /// Power contributed at `at`, truncated toward zero.
    ///
    /// A zero `decay_duration_blocks` means the lot never decays. Otherwise the
    /// contribution is `floor(initial * (duration - elapsed) / duration)` and
    /// reaches exactly zero at `grant_height + duration`.
    pub fn effective_power(&self, at: BlockHeight, decay_duration_blocks: u64) -> u128 {
        if decay_duration_blocks == 0 {
            return self.initial_amount;
        }
        let elapsed = at.blocks_since(self.grant_height);
        if elapsed >= decay_duration_blocks {
            return 0;
        }
        let duration = u128::from(decay_duration_blocks);
        let remaining = u128::from(decay_duration_blocks - elapsed);
        // Split so neither product can overflow: q * remaining <= initial and
        // r * remaining < duration^2 <= 2^128.
        let q = self.initial_amount / duration;
        let r = self.initial_amount % duration;
        q * remaining + (r * remaining) / duration
    }

    pub fn encode(&self) -> Result<Vec<u8>, GovernanceError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, GovernanceError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lot(initial_amount: u128, grant: u64) -> VotingPowerLot {
        VotingPowerLot {
            voter: AccountAddress::parse("dns1qqqqqqqqqq").unwrap(),
            proposal_id: 1,
            initial_amount,
            grant_height: BlockHeight::new(grant),
        }
    }

    #[test]
    fn halfway_is_exactly_half() {
        let l = lot(1_000_000, 1_000);
        assert_eq!(l.effective_power(BlockHeight::new(1_050), 100), 500_000);
    }

    #[test]
    fn reaches_zero_at_duration() {
        let l = lot(1_000_000, 1_000);
        assert_eq!(l.effective_power(BlockHeight::new(1_099), 100), 10_000);
        assert_eq!(l.effective_power(BlockHeight::new(1_100), 100), 0);
        assert_eq!(l.effective_power(BlockHeight::new(5_000), 100), 0);
    }

    #[test]
    fn zero_duration_never_decays() {
        let l = lot(7, 0);
        assert_eq!(l.effective_power(BlockHeight::new(u64::MAX), 0), 7);
    }

    #[test]
    fn truncates_rather_than_rounds() {
        // 10 * 2/3 = 6.67 -> 6
        let l = lot(10, 0);
        assert_eq!(l.effective_power(BlockHeight::new(1), 3), 6);
    }

    #[test]
    fn large_amounts_decay_without_fraction_rounding() {
        // An 18-digit fraction of 2/3 would drop the low digits here.
        let amount = 10u128.pow(30) + 1;
        let l = lot(amount, 0);
        assert_eq!(l.effective_power(BlockHeight::new(1), 3), amount * 2 / 3);

        let l = lot(u128::MAX, 0);
        assert_eq!(l.effective_power(BlockHeight::new(1), 3), u128::MAX / 3 * 2);
    }

    #[test]
    fn grant_block_has_full_power() {
        let l = lot(u128::MAX, 5);
        assert_eq!(l.effective_power(BlockHeight::new(5), u64::MAX), u128::MAX);
    }
}
