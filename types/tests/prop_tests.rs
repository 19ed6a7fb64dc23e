use proptest::prelude::*;

use dnsdao_types::dec::mul_wide;
use dnsdao_types::{AccountAddress, BlockHeight, Coin, Coins, Dec};

proptest! {
    /// The widened product agrees with native multiplication whenever that fits.
    #[test]
    fn mul_wide_agrees_with_checked_mul(a in any::<u64>(), b in any::<u128>()) {
        let a = a as u128;
        if let Some(p) = a.checked_mul(b) {
            prop_assert_eq!(mul_wide(a, b), (0, p));
        } else {
            prop_assert!(mul_wide(a, b).0 > 0);
        }
    }

    /// Fraction comparison matches an exact integer cross-multiplication.
    #[test]
    fn is_met_by_matches_cross_multiplication(
        num in 0u128..1_000_000_000,
        den in 1u128..1_000_000_000,
        pct in 0u64..=100,
    ) {
        let threshold = Dec::percent(pct);
        let expected = num * 100 >= pct as u128 * den;
        prop_assert_eq!(threshold.is_met_by(num, den), expected);
    }

    /// Decimal display output parses back to the same value.
    #[test]
    fn dec_display_parses_back(raw in 0u128..(u64::MAX as u128)) {
        let d = Dec::from_raw(raw);
        let parsed: Dec = d.to_string().parse().unwrap();
        prop_assert_eq!(parsed, d);
    }

    /// Sanitized coin sets always satisfy their own invariants.
    #[test]
    fn coins_new_always_validates(amounts in prop::collection::vec(0u128..1_000, 0..5)) {
        let denoms = ["alpha", "beta", "gamma", "delta", "epsilon"];
        let coins: Vec<Coin> = amounts
            .iter()
            .zip(denoms.iter())
            .map(|(amount, denom)| Coin::new(*denom, *amount))
            .collect();
        let set = Coins::new(coins).unwrap();
        prop_assert!(set.validate().is_ok());
        prop_assert!(set.iter().all(|c| c.amount > 0));
    }

    /// Heights never go backwards when measuring elapsed blocks.
    #[test]
    fn blocks_since_saturates(a in any::<u64>(), b in any::<u64>()) {
        let elapsed = BlockHeight::new(a).blocks_since(BlockHeight::new(b));
        prop_assert_eq!(elapsed, a.saturating_sub(b));
    }

    /// Addresses survive a bincode round trip with validation intact.
    #[test]
    fn address_bincode_roundtrip(data in "[qpzry9x8gf2tvdw0s3jn54khce6mua7l]{8,40}") {
        let addr = AccountAddress::parse(format!("dns1{data}")).unwrap();
        let encoded = bincode::serialize(&addr).unwrap();
        let decoded: AccountAddress = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, addr);
    }
}
