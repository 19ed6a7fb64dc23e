//! Account address type with the `dns1` prefix.

use crate::error::DaoTypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Characters allowed after the human-readable prefix (bech32 alphabet).
const DATA_CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// An account address, always prefixed with `dns1`.
///
/// Only the textual shape is checked here. Checksums and key derivation
/// belong to the account layer, which this module does not own.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountAddress(String);

impl AccountAddress {
    /// The human-readable prefix for all account addresses.
    pub const PREFIX: &'static str = "dns1";

    /// Minimum number of data characters after the prefix.
    pub const MIN_DATA_LEN: usize = 8;

    /// Maximum total length (the bech32 limit).
    pub const MAX_LEN: usize = 90;

    /// Parse and validate an address string.
    pub fn parse(raw: impl Into<String>) -> Result<Self, DaoTypesError> {
        let s = raw.into();
        if Self::is_valid(&s) {
            Ok(Self(s))
        } else {
            Err(DaoTypesError::InvalidAddress(s))
        }
    }

    /// Whether `s` is a well-formed address.
    pub fn is_valid(s: &str) -> bool {
        let Some(data) = s.strip_prefix(Self::PREFIX) else {
            return false;
        };
        s.len() <= Self::MAX_LEN
            && data.len() >= Self::MIN_DATA_LEN
            && data.chars().all(|c| DATA_CHARSET.contains(c))
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountAddress {
    type Err = DaoTypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AccountAddress {
    type Error = DaoTypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<AccountAddress> for String {
    fn from(addr: AccountAddress) -> Self {
        addr.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_address() {
        let addr = AccountAddress::parse("dns1qpzry9x8gf2tvdw0").unwrap();
        assert_eq!(addr.as_str(), "dns1qpzry9x8gf2tvdw0");
        assert_eq!(addr.to_string(), "dns1qpzry9x8gf2tvdw0");
    }

    #[test]
    fn rejects_wrong_prefix() {
        assert!(AccountAddress::parse("cosmos1qpzry9x8gf2tvdw0").is_err());
    }

    #[test]
    fn rejects_short_or_non_bech32_data() {
        assert!(AccountAddress::parse("dns1qpzry").is_err());
        // 'b', 'i', 'o' and '1' are outside the bech32 alphabet
        assert!(AccountAddress::parse("dns1bbbbbbbbbb").is_err());
        assert!(AccountAddress::parse("dns1QPZRY9X8GF").is_err());
    }

    #[test]
    fn deserialization_validates() {
        let ok: Result<AccountAddress, _> = serde_json::from_str("\"dns1qqqqqqqqqq\"");
        assert!(ok.is_ok());
        let bad: Result<AccountAddress, _> = serde_json::from_str("\"nope\"");
        assert!(bad.is_err());
    }
}
