//! Composite binary key encoding.
//!
//! Integers are big-endian so LMDB's lexicographic order matches numeric
//! order. Addresses inside composite keys are length-prefixed so a prefix
//! scan for one address never matches a longer address sharing its prefix.

use dnsdao_types::AccountAddress;

use crate::LmdbError;

pub fn proposal_key(id: u64) -> [u8; 8] {
    id.to_be_bytes()
}

/// `id_be(8) ++ voter`
pub fn vote_key(proposal_id: u64, voter: &AccountAddress) -> Vec<u8> {
    let mut key = proposal_id.to_be_bytes().to_vec();
    key.extend_from_slice(voter.as_str().as_bytes());
    key
}

/// `len(1) ++ voter`
pub fn lot_prefix(voter: &AccountAddress) -> Vec<u8> {
    let bytes = voter.as_str().as_bytes();
    let mut key = Vec::with_capacity(1 + bytes.len() + 8);
    // Addresses are capped at 90 bytes, so the length always fits in one byte.
    key.push(bytes.len() as u8);
    key.extend_from_slice(bytes);
    key
}

/// `len(1) ++ voter ++ id_be(8)`
pub fn lot_key(voter: &AccountAddress, proposal_id: u64) -> Vec<u8> {
    let mut key = lot_prefix(voter);
    key.extend_from_slice(&proposal_id.to_be_bytes());
    key
}

pub fn decode_u64(bytes: &[u8]) -> Result<u64, LmdbError> {
    let arr: [u8; 8] = bytes
        .try_into()
        .map_err(|_| LmdbError::Serialization(format!("expected 8-byte id, got {}", bytes.len())))?;
    Ok(u64::from_be_bytes(arr))
}

fn decode_address(bytes: &[u8]) -> Result<AccountAddress, LmdbError> {
    let s = std::str::from_utf8(bytes).map_err(|e| LmdbError::Serialization(e.to_string()))?;
    AccountAddress::parse(s).map_err(|e| LmdbError::Serialization(e.to_string()))
}

pub fn decode_vote_key(key: &[u8]) -> Result<(u64, AccountAddress), LmdbError> {
    if key.len() <= 8 {
        return Err(LmdbError::Serialization("vote key too short".into()));
    }
    let (id, voter) = key.split_at(8);
    Ok((decode_u64(id)?, decode_address(voter)?))
}

pub fn decode_lot_key(key: &[u8]) -> Result<(AccountAddress, u64), LmdbError> {
    let (&len, rest) = key
        .split_first()
        .ok_or_else(|| LmdbError::Serialization("empty lot key".into()))?;
    let len = len as usize;
    if rest.len() != len + 8 {
        return Err(LmdbError::Serialization(format!(
            "lot key length mismatch: prefix says {len}, have {}",
            rest.len()
        )));
    }
    let (voter, id) = rest.split_at(len);
    Ok((decode_address(voter)?, decode_u64(id)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(data: &str) -> AccountAddress {
        AccountAddress::parse(format!("dns1{data}")).unwrap()
    }

    #[test]
    fn vote_key_decodes() {
        let voter = addr("qqqqqqqqqq");
        let key = vote_key(7, &voter);
        assert_eq!(decode_vote_key(&key).unwrap(), (7, voter));
    }

    #[test]
    fn lot_key_decodes() {
        let voter = addr("pppppppppp");
        let key = lot_key(&voter, 42);
        assert_eq!(decode_lot_key(&key).unwrap(), (voter, 42));
    }

    #[test]
    fn lot_prefix_does_not_cover_longer_address() {
        let short = addr("qqqqqqqq");
        let long = addr("qqqqqqqqq");
        assert!(!lot_key(&long, 1).starts_with(&lot_prefix(&short)));
        assert!(lot_key(&short, 1).starts_with(&lot_prefix(&short)));
    }

    #[test]
    fn big_endian_ids_sort_numerically() {
        assert!(proposal_key(255) < proposal_key(256));
        let voter = addr("qqqqqqqqqq");
        assert!(vote_key(1, &voter) < vote_key(2, &voter));
    }

    #[test]
    fn corrupt_keys_are_rejected() {
        assert!(decode_vote_key(&[0u8; 8]).is_err());
        assert!(decode_lot_key(&[]).is_err());
        assert!(decode_lot_key(&[3, b'a']).is_err());
    }
}
