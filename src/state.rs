// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Projection of cache entries into subscriber-facing call states
//!
//! Results are served stale-while-revalidate: data from an older chain
//! position is returned immediately with `syncing` set, never withheld.

use std::sync::Arc;

use crate::cache::CacheEntry;
use crate::decode::ResultData;
use crate::types::block::BlockTimestamp;

/// What a subscriber sees for one call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallState {
    /// The call could be built
    pub valid: bool,
    /// No fetch has landed yet, or the chain position is unknown
    pub loading: bool,
    /// `result` is from an older chain position than the latest
    pub syncing: bool,
    /// The last landed fetch failed or returned nothing
    pub error: bool,
    /// Decoded result of the last successful fetch
    pub result: Option<Arc<ResultData>>,
}

impl CallState {
    /// State of a call that could not be built
    pub const INVALID: Self = Self {
        valid: false,
        loading: false,
        syncing: false,
        error: false,
        result: None,
    };

    /// State of a valid call with nothing to show yet
    pub const LOADING: Self = Self {
        valid: true,
        loading: true,
        syncing: false,
        error: false,
        result: None,
    };
}

/// Cache view of a single call, before projection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallResult {
    /// The call could be built
    pub valid: bool,
    /// Non-empty decoded result, if the last landed fetch produced one
    pub data: Option<Arc<ResultData>>,
    /// Chain position of the last landed fetch
    pub block_timestamp: Option<BlockTimestamp>,
}

impl CallResult {
    /// View of a valid call's cache entry
    pub fn from_entry(entry: Option<&CacheEntry>) -> Self {
        Self {
            valid: true,
            data: entry
                .and_then(CacheEntry::result)
                .filter(|data| !data.is_empty())
                .cloned(),
            block_timestamp: entry.and_then(|entry| entry.block_timestamp),
        }
    }
}

/// Project a call's cache view at the latest chain position
///
/// # Examples
///
/// ```
/// use multicall_sync::{project, BlockTimestamp, CallResult, CallState};
///
/// assert_eq!(project(None, Some(BlockTimestamp::new(100))), CallState::INVALID);
///
/// let pending = CallResult::from_entry(None);
/// assert_eq!(project(Some(&pending), Some(BlockTimestamp::new(100))), CallState::LOADING);
/// ```
pub fn project(result: Option<&CallResult>, latest: Option<BlockTimestamp>) -> CallState {
    let Some(result) = result.filter(|result| result.valid) else {
        return CallState::INVALID;
    };

    let (Some(block_timestamp), Some(latest)) = (result.block_timestamp, latest) else {
        return CallState::LOADING;
    };

    CallState {
        valid: true,
        loading: false,
        syncing: block_timestamp < latest,
        error: result.data.is_none(),
        result: result.data.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CachedData;
    use crate::decode::ResultValue;

    fn ts(t: u64) -> BlockTimestamp {
        BlockTimestamp::new(t)
    }

    fn data() -> Arc<ResultData> {
        let mut data = ResultData::new();
        data.insert("balance".to_string(), ResultValue::from("42"));
        Arc::new(data)
    }

    fn entry(data: Option<CachedData>, block: Option<u64>) -> CacheEntry {
        CacheEntry {
            data,
            block_timestamp: block.map(ts),
            fetching_block_timestamp: block.map(ts),
        }
    }

    #[test]
    fn test_invalid_call() {
        let invalid = CallResult {
            valid: false,
            data: None,
            block_timestamp: Some(ts(1)),
        };
        assert_eq!(project(Some(&invalid), Some(ts(1))), CallState::INVALID);
        assert_eq!(project(None, Some(ts(1))), CallState::INVALID);
    }

    #[test]
    fn test_loading_until_first_fetch_lands() {
        let fetching = CacheEntry {
            fetching_block_timestamp: Some(ts(100)),
            ..CacheEntry::default()
        };
        let result = CallResult::from_entry(Some(&fetching));
        assert_eq!(project(Some(&result), Some(ts(100))), CallState::LOADING);
    }

    #[test]
    fn test_loading_without_chain_position() {
        let landed = entry(Some(CachedData::Result(data())), Some(100));
        let result = CallResult::from_entry(Some(&landed));
        assert_eq!(project(Some(&result), None), CallState::LOADING);
    }

    #[test]
    fn test_fresh_and_syncing_results() {
        let landed = entry(Some(CachedData::Result(data())), Some(100));
        let result = CallResult::from_entry(Some(&landed));

        let fresh = project(Some(&result), Some(ts(100)));
        assert!(fresh.valid && !fresh.loading && !fresh.syncing && !fresh.error);
        assert_eq!(fresh.result, Some(data()));

        let syncing = project(Some(&result), Some(ts(105)));
        assert!(syncing.syncing);
        assert_eq!(syncing.result, Some(data()));
    }

    #[test]
    fn test_errored_and_empty_results_are_errors() {
        let errored = entry(Some(CachedData::Errored), Some(100));
        let state = project(Some(&CallResult::from_entry(Some(&errored))), Some(ts(100)));
        assert!(state.error);
        assert!(state.result.is_none());

        let empty = entry(Some(CachedData::Result(Arc::new(ResultData::new()))), Some(100));
        let state = project(Some(&CallResult::from_entry(Some(&empty))), Some(ts(100)));
        assert!(state.error);
    }
}
