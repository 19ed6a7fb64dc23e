//! Vote aggregation and the quorum / threshold decision.
//!
//! Everything here is pure: the end-of-block pass feeds it stored votes and
//! the proposal's snapshot, and acts on the returned [`TallyDecision`].

use serde::{Deserialize, Serialize};

use dnsdao_types::Dec;

use crate::vote::{Vote, VoteOption};
use crate::GovernanceError;

/// Summed stamped power per option.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyResult {
    pub yes: u128,
    pub no: u128,
    pub abstain: u128,
}

fn overflow() -> GovernanceError {
    GovernanceError::Arithmetic("tally overflow".into())
}

impl TallyResult {
    pub fn from_votes<'a>(votes: impl IntoIterator<Item = &'a Vote>) -> Result<Self, GovernanceError> {
        let mut tally = TallyResult::default();
        for vote in votes {
            let bucket = match vote.option {
                VoteOption::Yes => &mut tally.yes,
                VoteOption::No => &mut tally.no,
                VoteOption::Abstain => &mut tally.abstain,
                VoteOption::Unspecified => continue,
            };
            *bucket = bucket.checked_add(vote.voting_power).ok_or_else(overflow)?;
        }
        Ok(tally)
    }

    /// `yes + no + abstain`: participation, the quorum numerator.
    pub fn total(&self) -> Result<u128, GovernanceError> {
        self.non_abstain()?
            .checked_add(self.abstain)
            .ok_or_else(overflow)
    }

    /// `yes + no`: the threshold denominator.
    pub fn non_abstain(&self) -> Result<u128, GovernanceError> {
        self.yes.checked_add(self.no).ok_or_else(overflow)
    }
}

/// `voted / snapshot >= quorum`.
///
/// With a zero snapshot the ratio is undefined: a zero quorum is met
/// unconditionally and any positive quorum can never be met.
pub fn has_quorum(total_voted: u128, snapshot: u128, quorum: Dec) -> bool {
    if snapshot == 0 {
        return quorum.is_zero();
    }
    quorum.is_met_by(total_voted, snapshot)
}

/// `yes / (yes + no) >= threshold`, ties passing.
///
/// With no yes/no power at all only a zero threshold passes.
pub fn meets_threshold(yes: u128, non_abstain: u128, threshold: Dec) -> bool {
    if non_abstain == 0 {
        return threshold.is_zero();
    }
    threshold.is_met_by(yes, non_abstain)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    QuorumNotMet,
    ThresholdNotMet,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TallyDecision {
    Passed,
    Rejected(RejectReason),
}

/// Apply quorum then threshold. Threshold is not evaluated when quorum fails.
pub fn decide(
    tally: &TallyResult,
    snapshot: u128,
    quorum: Dec,
    threshold: Dec,
) -> Result<TallyDecision, GovernanceError> {
    if !has_quorum(tally.total()?, snapshot, quorum) {
        return Ok(TallyDecision::Rejected(RejectReason::QuorumNotMet));
    }
    if !meets_threshold(tally.yes, tally.non_abstain()?, threshold) {
        return Ok(TallyDecision::Rejected(RejectReason::ThresholdNotMet));
    }
    Ok(TallyDecision::Passed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnsdao_types::AccountAddress;

    fn vote(option: VoteOption, power: u128) -> Vote {
        Vote {
            proposal_id: 0,
            voter: AccountAddress::parse("dns1qqqqqqqqqq").unwrap(),
            option,
            voting_power: power,
        }
    }

    fn tally(yes: u128, no: u128, abstain: u128) -> TallyResult {
        TallyResult { yes, no, abstain }
    }

    #[test]
    fn sums_stamped_power_per_option() {
        let votes = vec![
            vote(VoteOption::Yes, 10),
            vote(VoteOption::No, 3),
            vote(VoteOption::Abstain, 7),
            vote(VoteOption::Yes, 5),
        ];
        let t = TallyResult::from_votes(&votes).unwrap();
        assert_eq!(t, tally(15, 3, 7));
        assert_eq!(t.total().unwrap(), 25);
        assert_eq!(t.non_abstain().unwrap(), 18);
    }

    #[test]
    fn overflow_is_reported() {
        let votes = vec![vote(VoteOption::Yes, u128::MAX), vote(VoteOption::Yes, 1)];
        assert!(matches!(
            TallyResult::from_votes(&votes),
            Err(GovernanceError::Arithmetic(_))
        ));
        assert!(tally(u128::MAX, 1, 0).total().is_err());
    }

    #[test]
    fn quorum_failure_rejects_without_threshold() {
        // 250 / 1000 < 0.30
        let decision = decide(&tally(250, 0, 0), 1_000, Dec::percent(30), Dec::ZERO).unwrap();
        assert_eq!(decision, TallyDecision::Rejected(RejectReason::QuorumNotMet));
    }

    #[test]
    fn zero_snapshot_with_zero_quorum_is_met() {
        let decision = decide(&tally(10, 0, 0), 0, Dec::ZERO, Dec::percent(50)).unwrap();
        assert_eq!(decision, TallyDecision::Passed);
    }

    #[test]
    fn zero_snapshot_with_positive_quorum_is_never_met() {
        assert!(!has_quorum(u128::MAX, 0, Dec::from_raw(1)));
    }

    #[test]
    fn threshold_tie_passes() {
        assert!(meets_threshold(50, 100, Dec::percent(50)));
        assert!(!meets_threshold(49, 100, Dec::percent(50)));
    }

    #[test]
    fn abstain_counts_for_quorum_not_threshold() {
        // quorum: 60/100 >= 0.5; threshold: 1/(1+9) < 0.5
        let t = tally(1, 9, 50);
        assert!(has_quorum(t.total().unwrap(), 100, Dec::percent(50)));
        assert_eq!(
            decide(&t, 100, Dec::percent(50), Dec::percent(50)).unwrap(),
            TallyDecision::Rejected(RejectReason::ThresholdNotMet)
        );
    }

    #[test]
    fn only_abstain_passes_only_with_zero_threshold() {
        let t = tally(0, 0, 10);
        assert_eq!(decide(&t, 10, Dec::ZERO, Dec::ZERO).unwrap(), TallyDecision::Passed);
        assert_eq!(
            decide(&t, 10, Dec::ZERO, Dec::from_raw(1)).unwrap(),
            TallyDecision::Rejected(RejectReason::ThresholdNotMet)
        );
    }
}
