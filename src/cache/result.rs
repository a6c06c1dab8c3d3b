// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-key result cache with monotonic chain-position writes
//!
//! Batches complete out of order. Every write is therefore tagged with the
//! chain position it was issued for, and a write for an older position never
//! replaces a newer one. Both `block_timestamp` and
//! `fetching_block_timestamp` are non-decreasing for every key.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

use crate::call::CallKey;
use crate::decode::ResultData;
use crate::types::block::BlockTimestamp;

/// Outcome of the last fetch that landed for a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedData {
    /// Decoded result
    Result(Arc<ResultData>),
    /// The fetch failed, was cancelled or could not be decoded
    Errored,
}

impl CachedData {
    /// Returns true if this is a decoded result
    pub fn is_result(&self) -> bool {
        matches!(self, CachedData::Result(_))
    }
}

/// Cached state of a single call key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheEntry {
    /// Outcome of the last landed fetch, if any
    pub data: Option<CachedData>,
    /// Chain position `data` was produced at
    pub block_timestamp: Option<BlockTimestamp>,
    /// Chain position of the most recent fetch attempt
    pub fetching_block_timestamp: Option<BlockTimestamp>,
}

impl CacheEntry {
    /// The decoded result, if the last landed fetch succeeded
    pub fn result(&self) -> Option<&Arc<ResultData>> {
        match &self.data {
            Some(CachedData::Result(data)) => Some(data),
            _ => None,
        }
    }
}

/// Result cache keyed by [`CallKey`]
///
/// Entries are created on the first fetch and never removed.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: HashMap<CallKey, CacheEntry>,
}

impl ResultCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a fetch for `keys` was issued at `at`
    ///
    /// Attempts at or before an entry's current fetching position are ignored.
    pub fn mark_fetching<'k>(
        &mut self,
        keys: impl IntoIterator<Item = &'k CallKey>,
        at: BlockTimestamp,
    ) {
        for key in keys {
            let entry = self.entries.entry(key.clone()).or_default();
            match entry.fetching_block_timestamp {
                Some(fetching) if fetching >= at => {
                    trace!(key = %key, %fetching, %at, "Ignoring older fetch attempt");
                }
                _ => entry.fetching_block_timestamp = Some(at),
            }
        }
    }

    /// Store a decoded result produced at `at`
    ///
    /// Applied when the entry has no result from `at` or later. A success
    /// replaces an error recorded at the same position. Returns whether the
    /// write was applied.
    pub fn record_success(
        &mut self,
        key: &CallKey,
        data: Arc<ResultData>,
        at: BlockTimestamp,
    ) -> bool {
        let entry = self.entries.entry(key.clone()).or_default();

        let applies = match entry.block_timestamp {
            None => true,
            Some(block) if block < at => true,
            Some(block) if block == at => !matches!(entry.data, Some(CachedData::Result(_))),
            Some(_) => false,
        };

        if applies {
            entry.data = Some(CachedData::Result(data));
            entry.block_timestamp = Some(at);
        } else {
            trace!(key = %key, %at, "Rejecting stale success");
        }
        applies
    }

    /// Mark the key errored at `at`
    ///
    /// Only applied when a fetch was issued at or before `at`, and never over
    /// data from a later position or a success from the same position.
    /// Returns whether the write was applied.
    pub fn record_error(&mut self, key: &CallKey, at: BlockTimestamp) -> bool {
        let Some(entry) = self.entries.get_mut(key) else {
            return false;
        };

        let fetched = matches!(entry.fetching_block_timestamp, Some(fetching) if fetching <= at);
        let superseded = match entry.block_timestamp {
            Some(block) if block > at => true,
            Some(block) if block == at => matches!(entry.data, Some(CachedData::Result(_))),
            _ => false,
        };

        let applies = fetched && !superseded;
        if applies {
            entry.data = Some(CachedData::Errored);
            entry.block_timestamp = Some(at);
        } else {
            trace!(key = %key, %at, "Rejecting stale error");
        }
        applies
    }

    /// Snapshot of the entry for `key`
    pub fn get(&self, key: &CallKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Number of cached keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been fetched yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
