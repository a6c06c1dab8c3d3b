// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for call key encoding
//!
//! Keys are the only identity shared by the registry and the cache, so they
//! must round-trip exactly and never collide for different calldata.

use multicall_sync::CallKey;
use proptest::prelude::*;

fn arb_hex() -> impl Strategy<Value = String> {
    "0x[0-9a-f]{1,64}"
}

fn arb_calldata() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[0-9a-zA-Z_x]{1,16}", 0..8)
}

proptest! {
    /// Property: parsing a key recovers its identity fields exactly
    #[test]
    fn prop_key_round_trips(
        address in arb_hex(),
        selector in arb_hex(),
        calldata in arb_calldata(),
    ) {
        let key = CallKey::from_parts(&address, &selector, &calldata).unwrap();
        let identity = key.parse().unwrap();

        prop_assert_eq!(identity.address, address);
        prop_assert_eq!(identity.selector, selector);
        prop_assert_eq!(identity.calldata, calldata);
    }

    /// Property: keys are equal exactly when calldata is equal
    #[test]
    fn prop_key_sensitive_to_calldata(
        address in arb_hex(),
        selector in arb_hex(),
        a in arb_calldata(),
        b in arb_calldata(),
    ) {
        let key_a = CallKey::from_parts(&address, &selector, &a).unwrap();
        let key_b = CallKey::from_parts(&address, &selector, &b).unwrap();

        prop_assert_eq!(key_a == key_b, a == b);
    }

    /// Property: the string form parses back into the same key
    #[test]
    fn prop_key_from_str(
        address in arb_hex(),
        selector in arb_hex(),
        calldata in arb_calldata(),
    ) {
        let key = CallKey::from_parts(&address, &selector, &calldata).unwrap();
        let reparsed: CallKey = key.as_str().parse().unwrap();
        prop_assert_eq!(reparsed, key);
    }

    /// Property: separators inside identity fields are rejected, never encoded
    #[test]
    fn prop_separators_rejected(
        address in arb_hex(),
        selector in arb_hex(),
        prefix in "[0-9a-f]{0,4}",
        suffix in "[0-9a-f]{0,4}",
    ) {
        let with_comma = vec![format!("{prefix},{suffix}")];
        prop_assert!(CallKey::from_parts(&address, &selector, &with_comma).is_err());

        let dashed_address = format!("{address}-{suffix}");
        prop_assert!(CallKey::from_parts(&dashed_address, &selector, &[]).is_err());
    }
}
