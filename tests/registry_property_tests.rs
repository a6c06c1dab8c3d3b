// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for listener reference counting

mod helpers;

use helpers::felt_call;
use multicall_sync::{Call, ListenerRegistry};
use proptest::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum Op {
    Add(u64),
    Remove(u64),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u64..4).prop_map(Op::Add),
        (0u64..4).prop_map(Op::Remove),
    ]
}

proptest! {
    /// Property: counts never go negative and a key is present iff its net
    /// count is positive
    #[test]
    fn prop_counts_match_model(ops in prop::collection::vec(arb_op(), 0..64)) {
        let calls: Vec<Call> = (0..4).map(|n| felt_call("0xa", n)).collect();
        let mut registry = ListenerRegistry::new();
        let mut model: HashMap<u64, usize> = HashMap::new();

        for op in ops {
            match op {
                Op::Add(n) => {
                    registry.add_listeners([&calls[n as usize]]);
                    *model.entry(n).or_default() += 1;
                }
                Op::Remove(n) => {
                    registry.remove_listeners([calls[n as usize].key()]);
                    if let Some(count) = model.get_mut(&n) {
                        *count -= 1;
                        if *count == 0 {
                            model.remove(&n);
                        }
                    }
                }
            }

            for (n, call) in calls.iter().enumerate() {
                let expected = model.get(&(n as u64)).copied().unwrap_or(0);
                prop_assert_eq!(registry.count(call.key()), expected);
                prop_assert_eq!(registry.active_keys().contains(call.key()), expected > 0);
            }
            prop_assert_eq!(registry.len(), model.len());
        }
    }
}
