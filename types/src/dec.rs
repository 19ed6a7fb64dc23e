//! Fixed-point decimal with 18 fractional digits.
//!
//! Used for governance fractions (quorum, yes-threshold). All comparisons
//! against integer ratios are exact: products are widened to 256 bits so
//! nothing is rounded or overflows.

use crate::error::DaoTypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of fractional decimal digits.
pub const PRECISION: u32 = 18;

/// Raw representation of 1.0.
const ONE_RAW: u128 = 1_000_000_000_000_000_000;

/// A non-negative fixed-point decimal, stored as `value × 10^18`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Dec(u128);

impl Dec {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(ONE_RAW);

    pub fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    /// `pct / 100`, e.g. `Dec::percent(50)` is 0.5.
    pub fn percent(pct: u64) -> Self {
        Self(pct as u128 * (ONE_RAW / 100))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Whether `numerator / denominator >= self`, computed without rounding.
    ///
    /// A zero denominator never satisfies a positive threshold and always
    /// satisfies a zero threshold.
    pub fn is_met_by(&self, numerator: u128, denominator: u128) -> bool {
        if denominator == 0 {
            return self.is_zero();
        }
        mul_wide(numerator, ONE_RAW) >= mul_wide(self.0, denominator)
    }
}

/// Full 256-bit product of two u128 values as `(high, low)`.
pub fn mul_wide(a: u128, b: u128) -> (u128, u128) {
    let mask = u64::MAX as u128;
    let (a_hi, a_lo) = (a >> 64, a & mask);
    let (b_hi, b_lo) = (b >> 64, b & mask);

    let ll = a_lo * b_lo;
    let lh = a_lo * b_hi;
    let hl = a_hi * b_lo;
    let hh = a_hi * b_hi;

    let mid = (ll >> 64) + (lh & mask) + (hl & mask);
    let lo = (ll & mask) | ((mid & mask) << 64);
    let hi = hh + (lh >> 64) + (hl >> 64) + (mid >> 64);
    (hi, lo)
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:0width$}",
            self.0 / ONE_RAW,
            self.0 % ONE_RAW,
            width = PRECISION as usize
        )
    }
}

impl FromStr for Dec {
    type Err = DaoTypesError;

    /// Parse a plain decimal string such as `"0.50"`, `"1"` or `".3"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DaoTypesError::InvalidDecimal(s.to_string());
        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
            || frac_part.len() > PRECISION as usize
        {
            return Err(invalid());
        }
        let int_value: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| invalid())?
        };
        let frac_value: u128 = if frac_part.is_empty() {
            0
        } else {
            let padded = format!("{:0<width$}", frac_part, width = PRECISION as usize);
            padded.parse().map_err(|_| invalid())?
        };
        int_value
            .checked_mul(ONE_RAW)
            .and_then(|v| v.checked_add(frac_value))
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl TryFrom<String> for Dec {
    type Error = DaoTypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Dec> for String {
    fn from(d: Dec) -> Self {
        d.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let d: Dec = "0.50".parse().unwrap();
        assert_eq!(d, Dec::percent(50));
        assert_eq!(d.to_string(), "0.500000000000000000");
        assert_eq!("1".parse::<Dec>().unwrap(), Dec::ONE);
        assert_eq!(".3".parse::<Dec>().unwrap(), Dec::percent(30));
        assert!("".parse::<Dec>().is_err());
        assert!("-0.1".parse::<Dec>().is_err());
        assert!("0.1234567890123456789".parse::<Dec>().is_err());
    }

    #[test]
    fn threshold_comparison_is_inclusive() {
        let half = Dec::percent(50);
        assert!(half.is_met_by(1, 2));
        assert!(half.is_met_by(10, 10));
        assert!(!half.is_met_by(49, 100));
    }

    #[test]
    fn zero_denominator_edge_cases() {
        assert!(Dec::ZERO.is_met_by(0, 0));
        assert!(!Dec::percent(1).is_met_by(0, 0));
    }

    #[test]
    fn huge_values_do_not_overflow() {
        let almost_one: Dec = "0.999999999999999999".parse().unwrap();
        assert!(almost_one.is_met_by(u128::MAX, u128::MAX));
        assert!(!Dec::ONE.is_met_by(u128::MAX - 1, u128::MAX));
    }

    #[test]
    fn mul_wide_matches_small_products() {
        assert_eq!(mul_wide(3, 7), (0, 21));
        assert_eq!(mul_wide(u128::MAX, 2), (1, u128::MAX - 1));
        assert_eq!(mul_wide(1u128 << 64, 1u128 << 64), (1, 0));
    }
}
