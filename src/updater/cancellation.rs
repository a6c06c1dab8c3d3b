// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Cancellation cohorts keyed by chain position
//!
//! Every in-flight chunk owns a [`CancellationToken`] registered under the
//! chain position it was issued for. When an evaluation starts at a newer
//! position, every token of the previous cohort is cancelled before new
//! requests go out. Evaluations at the same position join the current
//! cohort.

use std::collections::HashMap;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::types::block::BlockTimestamp;

/// Identifies one in-flight chunk
pub(crate) type ChunkId = u64;

#[derive(Debug)]
struct Cohort {
    block_timestamp: BlockTimestamp,
    tokens: HashMap<ChunkId, CancellationToken>,
}

/// Tracks the in-flight chunks of the most recent chain position
#[derive(Debug, Default)]
pub(crate) struct CancellationManager {
    cohort: Option<Cohort>,
    next_id: ChunkId,
}

impl CancellationManager {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Cancel the current cohort if it targets a position other than `at`
    ///
    /// Returns the number of chunks cancelled.
    pub(crate) fn supersede(&mut self, at: BlockTimestamp) -> usize {
        match &self.cohort {
            Some(cohort) if cohort.block_timestamp == at => 0,
            _ => {
                let cancelled = self.cancel_all();
                self.cohort = Some(Cohort {
                    block_timestamp: at,
                    tokens: HashMap::new(),
                });
                cancelled
            }
        }
    }

    /// Register a new chunk in the current cohort
    ///
    /// Callers [`supersede`](Self::supersede) to `at` first; a missing cohort
    /// is started at `at`.
    pub(crate) fn register(&mut self, at: BlockTimestamp) -> (ChunkId, CancellationToken) {
        let id = self.next_id;
        self.next_id += 1;

        let token = CancellationToken::new();
        self.cohort
            .get_or_insert_with(|| Cohort {
                block_timestamp: at,
                tokens: HashMap::new(),
            })
            .tokens
            .insert(id, token.clone());
        (id, token)
    }

    /// Forget a settled chunk
    pub(crate) fn complete(&mut self, id: ChunkId) {
        if let Some(cohort) = self.cohort.as_mut() {
            cohort.tokens.remove(&id);
        }
    }

    /// Cancel every tracked chunk and drop the cohort
    pub(crate) fn cancel_all(&mut self) -> usize {
        let Some(cohort) = self.cohort.take() else {
            return 0;
        };

        let cancelled = cohort.tokens.len();
        for token in cohort.tokens.into_values() {
            token.cancel();
        }
        if cancelled > 0 {
            debug!(
                block_timestamp = %cohort.block_timestamp,
                cancelled,
                "Cancelled in-flight chunks"
            );
        }
        cancelled
    }

    /// Number of chunks still in flight in the current cohort
    pub(crate) fn in_flight(&self) -> usize {
        self.cohort.as_ref().map_or(0, |cohort| cohort.tokens.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(t: u64) -> BlockTimestamp {
        BlockTimestamp::new(t)
    }

    #[test]
    fn test_same_position_extends_cohort() {
        let mut manager = CancellationManager::new();
        let (_, first) = manager.register(ts(100));
        let (_, second) = manager.register(ts(100));

        assert_eq!(manager.supersede(ts(100)), 0);
        assert_eq!(manager.in_flight(), 2);
        assert!(!first.is_cancelled());
        assert!(!second.is_cancelled());
    }

    #[test]
    fn test_new_position_cancels_previous_cohort() {
        let mut manager = CancellationManager::new();
        let (_, old) = manager.register(ts(100));

        assert_eq!(manager.supersede(ts(105)), 1);
        assert!(old.is_cancelled());

        let (_, new) = manager.register(ts(105));
        assert!(!new.is_cancelled());
        assert_eq!(manager.in_flight(), 1);
    }

    #[test]
    fn test_completed_chunks_are_not_cancelled() {
        let mut manager = CancellationManager::new();
        let (id, token) = manager.register(ts(100));
        manager.complete(id);

        assert_eq!(manager.supersede(ts(105)), 0);
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_cancel_all_drains() {
        let mut manager = CancellationManager::new();
        let (_, a) = manager.register(ts(100));
        let (_, b) = manager.register(ts(100));

        assert_eq!(manager.cancel_all(), 2);
        assert!(a.is_cancelled() && b.is_cancelled());
        assert_eq!(manager.in_flight(), 0);
    }
}
