//! Coin and coin-set types.
//!
//! Amounts are raw integer units (u128). A coin set keeps its entries sorted
//! by denom with no duplicates and no zero amounts.

use crate::error::DaoTypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Validate a denomination: `[a-zA-Z][a-zA-Z0-9/:._-]{2,127}`.
pub fn validate_denom(denom: &str) -> Result<(), DaoTypesError> {
    let mut chars = denom.chars();
    let first_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || "/:._-".contains(c));
    if first_ok && rest_ok && (3..=128).contains(&denom.len()) {
        Ok(())
    } else {
        Err(DaoTypesError::InvalidDenom(denom.to_string()))
    }
}

/// A single amount of one denomination.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: u128,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u128) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// A coin is valid when its denom is valid. Zero amounts are allowed.
    pub fn validate(&self) -> Result<(), DaoTypesError> {
        validate_denom(&self.denom)
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for Coin {
    type Err = DaoTypesError;

    /// Parse `"<amount><denom>"`, e.g. `"5000000udnsc"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| DaoTypesError::InvalidCoins(format!("missing denom in '{s}'")))?;
        let (amount, denom) = s.split_at(split);
        let amount = amount
            .parse::<u128>()
            .map_err(|e| DaoTypesError::InvalidCoins(format!("bad amount in '{s}': {e}")))?;
        validate_denom(denom)?;
        Ok(Self::new(denom, amount))
    }
}

/// A sorted set of coins with distinct denoms.
///
/// Deserialization does not sanitize; call [`Coins::validate`] on untrusted input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coins(Vec<Coin>);

impl Coins {
    /// Build a sanitized coin set: zero entries are dropped and the rest sorted.
    /// Duplicate or invalid denoms are rejected.
    pub fn new(coins: Vec<Coin>) -> Result<Self, DaoTypesError> {
        let mut coins: Vec<Coin> = coins.into_iter().filter(|c| !c.is_zero()).collect();
        coins.sort_by(|a, b| a.denom.cmp(&b.denom));
        let set = Self(coins);
        set.validate()?;
        Ok(set)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// A coin set holding a single coin (empty if the amount is zero).
    pub fn from_coin(coin: Coin) -> Result<Self, DaoTypesError> {
        Self::new(vec![coin])
    }

    /// Check the set invariants: valid denoms, strictly ascending, all positive.
    pub fn validate(&self) -> Result<(), DaoTypesError> {
        for coin in &self.0 {
            coin.validate()?;
            if coin.is_zero() {
                return Err(DaoTypesError::InvalidCoins(format!(
                    "coin {} has zero amount",
                    coin.denom
                )));
            }
        }
        for pair in self.0.windows(2) {
            if pair[0].denom >= pair[1].denom {
                return Err(DaoTypesError::InvalidCoins(format!(
                    "denoms not sorted or duplicated: {}, {}",
                    pair[0].denom, pair[1].denom
                )));
            }
        }
        Ok(())
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(Coin::is_zero)
    }

    /// Non-empty and every entry strictly positive.
    pub fn is_all_positive(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|c| !c.is_zero())
    }

    /// Amount held in `denom` (zero if absent).
    pub fn amount_of(&self, denom: &str) -> u128 {
        self.0
            .iter()
            .find(|c| c.denom == denom)
            .map(|c| c.amount)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coin> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Coins {
    type Item = &'a Coin;
    type IntoIter = std::slice::Iter<'a, Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(Coin::to_string).collect();
        write!(f, "{}", parts.join(","))
    }
}

impl FromStr for Coins {
    type Err = DaoTypesError;

    /// Parse a comma-separated list, e.g. `"10stake,5udnsc"`. Empty input is an empty set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self::empty());
        }
        let coins = s
            .split(',')
            .map(Coin::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(coins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denom_rules() {
        assert!(validate_denom("udnsc").is_ok());
        assert!(validate_denom("ibc/27394FB0").is_ok());
        assert!(validate_denom("ab").is_err());
        assert!(validate_denom("1abc").is_err());
        assert!(validate_denom("bad denom").is_err());
    }

    #[test]
    fn new_sorts_and_drops_zero() {
        let coins = Coins::new(vec![
            Coin::new("udnsc", 5),
            Coin::new("stake", 0),
            Coin::new("atom", 7),
        ])
        .unwrap();
        assert_eq!(coins.len(), 2);
        assert_eq!(coins.to_string(), "7atom,5udnsc");
        assert_eq!(coins.amount_of("udnsc"), 5);
        assert_eq!(coins.amount_of("stake"), 0);
    }

    #[test]
    fn new_rejects_duplicates() {
        let err = Coins::new(vec![Coin::new("stake", 1), Coin::new("stake", 2)]);
        assert!(matches!(err, Err(DaoTypesError::InvalidCoins(_))));
    }

    #[test]
    fn parse_coin_list() {
        let coins: Coins = "10000000stake".parse().unwrap();
        assert_eq!(coins.amount_of("stake"), 10_000_000);
        assert!(coins.is_all_positive());

        let empty: Coins = "".parse().unwrap();
        assert!(empty.is_zero());
        assert!(!empty.is_all_positive());

        assert!("stake".parse::<Coins>().is_err());
        assert!("10".parse::<Coins>().is_err());
    }

    #[test]
    fn validate_catches_unsanitized_input() {
        let raw: Coins = serde_json::from_str(r#"[{"denom":"stake","amount":0}]"#).unwrap();
        assert!(raw.validate().is_err());
        let unsorted: Coins = serde_json::from_str(
            r#"[{"denom":"zeta","amount":1},{"denom":"alpha","amount":1}]"#,
        )
        .unwrap();
        assert!(unsorted.validate().is_err());
    }
}
