//! Governance module parameters.
//!
//! A singleton record owned by the module store. Changed only through the
//! authority-gated params update, never by the lifecycle itself.

use crate::coin::{validate_denom, Coin, Coins};
use crate::dec::Dec;
use crate::error::DaoTypesError;
use serde::{Deserialize, Serialize};

/// All parameters read by the governance lifecycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaoParams {
    // ── Lifecycle ────────────────────────────────────────────────────────
    /// Length of the voting window in blocks. Must be non-zero.
    pub voting_period_blocks: u64,

    /// Deposit escrowed for every proposal kind except TLD additions.
    pub proposal_submission_deposit: Coins,

    /// Deposit escrowed for a TLD-addition proposal.
    pub add_tld_proposal_cost: Coins,

    // ── Tally ────────────────────────────────────────────────────────────
    /// Minimum `yes / (yes + no)` for a proposal to pass (inclusive).
    pub min_yes_threshold_percent: Dec,

    /// Minimum `(yes + no + abstain) / snapshot` for a tally to count (inclusive).
    pub quorum_percent: Dec,

    // ── Voting power ─────────────────────────────────────────────────────
    /// Blocks over which a voting-power lot decays linearly to zero. 0 = no decay.
    pub voting_power_decay_duration_blocks: u64,

    /// Denomination whose balance or lots confer voting power.
    pub voting_token_denom: String,

    /// Per-block validator reward in the voting denom. Carried for the wider
    /// chain; the governance lifecycle never reads it.
    pub validator_reward_voting_tokens_amount: Coin,
}

impl DaoParams {
    /// Default voting token denomination (micro-dnsc).
    pub const DEFAULT_VOTING_DENOM: &'static str = "udnsc";

    /// Default denomination for proposal deposits.
    pub const DEFAULT_DEPOSIT_DENOM: &'static str = "stake";

    /// Check every invariant of the parameter set.
    pub fn validate(&self) -> Result<(), DaoTypesError> {
        if self.voting_period_blocks == 0 {
            return Err(DaoTypesError::InvalidParams(
                "voting period blocks cannot be zero".into(),
            ));
        }
        self.proposal_submission_deposit.validate().map_err(|e| {
            DaoTypesError::InvalidParams(format!("invalid proposal submission deposit: {e}"))
        })?;
        self.add_tld_proposal_cost.validate().map_err(|e| {
            DaoTypesError::InvalidParams(format!("invalid add-tld proposal cost: {e}"))
        })?;
        validate_fraction("min yes threshold percent", self.min_yes_threshold_percent)?;
        validate_fraction("quorum percent", self.quorum_percent)?;
        validate_denom(&self.voting_token_denom).map_err(|e| {
            DaoTypesError::InvalidParams(format!("invalid voting token denom: {e}"))
        })?;
        let reward = &self.validator_reward_voting_tokens_amount;
        reward.validate().map_err(|e| {
            DaoTypesError::InvalidParams(format!("invalid validator reward amount: {e}"))
        })?;
        if !reward.is_zero() && reward.denom != self.voting_token_denom {
            return Err(DaoTypesError::InvalidParams(format!(
                "validator reward denom ({}) must match voting token denom ({})",
                reward.denom, self.voting_token_denom
            )));
        }
        Ok(())
    }
}

fn validate_fraction(name: &str, value: Dec) -> Result<(), DaoTypesError> {
    if value > Dec::ONE {
        return Err(DaoTypesError::InvalidParams(format!(
            "{name} cannot be greater than 1: {value}"
        )));
    }
    Ok(())
}

impl Default for DaoParams {
    fn default() -> Self {
        let deposit = |amount| Coins::new(vec![Coin::new(Self::DEFAULT_DEPOSIT_DENOM, amount)]);
        Self {
            voting_period_blocks: 500,
            proposal_submission_deposit: deposit(10_000_000).unwrap_or_default(),
            add_tld_proposal_cost: deposit(100_000_000).unwrap_or_default(),
            min_yes_threshold_percent: Dec::percent(50),
            quorum_percent: Dec::ZERO,
            voting_power_decay_duration_blocks: 2_592_000,
            voting_token_denom: Self::DEFAULT_VOTING_DENOM.to_string(),
            validator_reward_voting_tokens_amount: Coin::new(Self::DEFAULT_VOTING_DENOM, 1_000_000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = DaoParams::default();
        params.validate().unwrap();
        assert_eq!(params.proposal_submission_deposit.amount_of("stake"), 10_000_000);
        assert_eq!(params.add_tld_proposal_cost.amount_of("stake"), 100_000_000);
    }

    #[test]
    fn zero_voting_period_rejected() {
        let params = DaoParams {
            voting_period_blocks: 0,
            ..DaoParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn fraction_above_one_rejected() {
        let params = DaoParams {
            quorum_percent: "1.01".parse().unwrap(),
            ..DaoParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn zero_decay_is_allowed() {
        let params = DaoParams {
            voting_power_decay_duration_blocks: 0,
            ..DaoParams::default()
        };
        params.validate().unwrap();
    }

    #[test]
    fn reward_denom_must_match_voting_denom() {
        let params = DaoParams {
            validator_reward_voting_tokens_amount: Coin::new("stake", 1),
            ..DaoParams::default()
        };
        assert!(params.validate().is_err());

        let zero_reward = DaoParams {
            validator_reward_voting_tokens_amount: Coin::new("stake", 0),
            ..DaoParams::default()
        };
        zero_reward.validate().unwrap();
    }
}
