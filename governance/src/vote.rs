//! Votes on proposals.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use dnsdao_types::AccountAddress;

use crate::GovernanceError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteOption {
    #[default]
    Unspecified,
    Yes,
    No,
    Abstain,
}

impl fmt::Display for VoteOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VoteOption::Unspecified => "VOTE_OPTION_UNSPECIFIED",
            VoteOption::Yes => "VOTE_OPTION_YES",
            VoteOption::No => "VOTE_OPTION_NO",
            VoteOption::Abstain => "VOTE_OPTION_ABSTAIN",
        };
        f.write_str(name)
    }
}

impl FromStr for VoteOption {
    type Err = GovernanceError;

    /// Accepts the full enum name or the short form (`yes`, `no`, `abstain`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let short = upper.strip_prefix("VOTE_OPTION_").unwrap_or(&upper);
        match short {
            "YES" => Ok(VoteOption::Yes),
            "NO" => Ok(VoteOption::No),
            "ABSTAIN" => Ok(VoteOption::Abstain),
            "UNSPECIFIED" => Ok(VoteOption::Unspecified),
            _ => Err(GovernanceError::InvalidRequest(format!("unknown vote option: {s}"))),
        }
    }
}

/// A single vote. The power is frozen at cast time and never recomputed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub proposal_id: u64,
    pub voter: AccountAddress,
    pub option: VoteOption,
    pub voting_power: u128,
}

impl Vote {
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

    #[test]
    fn option_parses_both_forms() {
        assert_eq!("yes".parse::<VoteOption>().unwrap(), VoteOption::Yes);
        assert_eq!("VOTE_OPTION_ABSTAIN".parse::<VoteOption>().unwrap(), VoteOption::Abstain);
        assert!("maybe".parse::<VoteOption>().is_err());
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for option in [VoteOption::Yes, VoteOption::No, VoteOption::Abstain] {
            assert_eq!(option.to_string().parse::<VoteOption>().unwrap(), option);
        }
    }
}
