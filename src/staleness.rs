// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Selection of keys that need fetching at the latest chain position

use std::collections::BTreeSet;

use crate::cache::{CacheEntry, ResultCache};
use crate::call::CallKey;
use crate::types::block::BlockTimestamp;

/// Returns true if `entry` needs a fetch at `latest`
///
/// A key is outdated when it has no decoded result, or when both its data
/// and its last fetch attempt are behind `latest`. A first fetch already
/// targeting `latest` is not reissued.
pub fn is_outdated(entry: Option<&CacheEntry>, latest: BlockTimestamp) -> bool {
    let Some(entry) = entry else {
        return true;
    };

    let behind = |position: Option<BlockTimestamp>| position.is_none_or(|p| p < latest);

    if entry.result().is_none() {
        let first_fetch_in_flight = entry.data.is_none()
            && entry.block_timestamp.is_none()
            && !behind(entry.fetching_block_timestamp);
        return !first_fetch_in_flight;
    }

    behind(entry.fetching_block_timestamp) && behind(entry.block_timestamp)
}

/// Keys among `keys` that need a fetch at `latest`
///
/// Empty while the chain position is unknown.
pub fn outdated_keys<'k>(
    keys: impl IntoIterator<Item = &'k CallKey>,
    cache: &ResultCache,
    latest: Option<BlockTimestamp>,
) -> BTreeSet<CallKey> {
    let Some(latest) = latest else {
        return BTreeSet::new();
    };

    keys.into_iter()
        .filter(|key| is_outdated(cache.get(key), latest))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{ResultData, ResultValue};
    use std::sync::Arc;

    fn key(n: u8) -> CallKey {
        CallKey::from_parts("0xabc", "0x1", &[n.to_string()]).unwrap()
    }

    fn ts(t: u64) -> BlockTimestamp {
        BlockTimestamp::new(t)
    }

    fn data() -> Arc<ResultData> {
        let mut data = ResultData::new();
        data.insert("value".to_string(), ResultValue::from("1"));
        Arc::new(data)
    }

    #[test]
    fn test_unknown_position_yields_nothing() {
        let cache = ResultCache::new();
        assert!(outdated_keys([&key(1)], &cache, None).is_empty());
    }

    #[test]
    fn test_never_fetched_is_outdated() {
        let cache = ResultCache::new();
        let outdated = outdated_keys([&key(1)], &cache, Some(ts(100)));
        assert!(outdated.contains(&key(1)));
    }

    #[test]
    fn test_first_fetch_in_flight_is_not_reissued() {
        let mut cache = ResultCache::new();
        cache.mark_fetching([&key(1)], ts(100));

        assert!(outdated_keys([&key(1)], &cache, Some(ts(100))).is_empty());
        assert!(!outdated_keys([&key(1)], &cache, Some(ts(105))).is_empty());
    }

    #[test]
    fn test_fresh_result_is_not_outdated() {
        let mut cache = ResultCache::new();
        cache.mark_fetching([&key(1)], ts(100));
        cache.record_success(&key(1), data(), ts(100));

        assert!(outdated_keys([&key(1)], &cache, Some(ts(100))).is_empty());
        assert!(!outdated_keys([&key(1)], &cache, Some(ts(101))).is_empty());
    }

    #[test]
    fn test_refresh_in_flight_is_not_reissued() {
        let mut cache = ResultCache::new();
        cache.mark_fetching([&key(1)], ts(100));
        cache.record_success(&key(1), data(), ts(100));
        cache.mark_fetching([&key(1)], ts(105));

        assert!(outdated_keys([&key(1)], &cache, Some(ts(105))).is_empty());
    }

    #[test]
    fn test_errored_key_is_outdated() {
        let mut cache = ResultCache::new();
        cache.mark_fetching([&key(1)], ts(100));
        cache.record_error(&key(1), ts(100));

        assert!(outdated_keys([&key(1)], &cache, Some(ts(100))).contains(&key(1)));
    }
}
