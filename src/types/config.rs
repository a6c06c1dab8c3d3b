// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for configuration values
//!
//! These types ensure configuration values are not confused with
//! chain values (block timestamps, felts, listener counts).

use serde::{Deserialize, Serialize};

/// Maximum number of calls submitted together in one batched request
///
/// Multicall contracts and RPC nodes both reject requests that are too
/// large, so outdated calls are partitioned into chunks no larger than this.
///
/// # Examples
///
/// ```
/// use multicall_sync::MaxCallsPerChunk;
///
/// let max = MaxCallsPerChunk::DEFAULT;
/// assert_eq!(max.as_usize(), 100);
///
/// // Zero would make every chunk empty, so it is clamped to one
/// assert_eq!(MaxCallsPerChunk::new(0).as_usize(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaxCallsPerChunk(usize);

impl MaxCallsPerChunk {
    /// Default ceiling, safe for public Starknet RPC endpoints
    pub const DEFAULT: Self = Self(crate::config::constants::DEFAULT_MAX_CALLS_PER_CHUNK);

    /// Create a new chunk ceiling
    pub const fn new(calls: usize) -> Self {
        if calls == 0 {
            Self(1)
        } else {
            Self(calls)
        }
    }

    /// Get the inner usize value
    pub const fn as_usize(&self) -> usize {
        self.0
    }

    /// Calculate number of chunks needed to cover `total` calls
    ///
    /// # Examples
    ///
    /// ```
    /// use multicall_sync::MaxCallsPerChunk;
    ///
    /// let max = MaxCallsPerChunk::new(3);
    /// assert_eq!(max.chunks_needed(7), 3);
    /// assert_eq!(max.chunks_needed(0), 0);
    /// ```
    pub fn chunks_needed(&self, total: usize) -> usize {
        total.div_ceil(self.0)
    }

    /// Sizes of the balanced chunks covering `total` calls
    ///
    /// Uses the minimum number of chunks, then spreads calls so that sizes
    /// differ by at most one. Larger chunks come first.
    ///
    /// # Examples
    ///
    /// ```
    /// use multicall_sync::MaxCallsPerChunk;
    ///
    /// let sizes: Vec<_> = MaxCallsPerChunk::new(3).chunk_sizes(7).collect();
    /// assert_eq!(sizes, vec![3, 2, 2]);
    /// ```
    pub fn chunk_sizes(&self, total: usize) -> ChunkSizes {
        let chunks = self.chunks_needed(total);
        let (base, extra) = if chunks == 0 {
            (0, 0)
        } else {
            (total / chunks, total % chunks)
        };

        ChunkSizes {
            index: 0,
            chunks,
            base,
            extra,
        }
    }
}

impl Default for MaxCallsPerChunk {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<usize> for MaxCallsPerChunk {
    fn from(value: usize) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for MaxCallsPerChunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} calls", self.0)
    }
}

/// Iterator over balanced chunk sizes
///
/// Created by [`MaxCallsPerChunk::chunk_sizes`].
#[derive(Debug, Clone)]
pub struct ChunkSizes {
    index: usize,
    chunks: usize,
    base: usize,
    extra: usize,
}

impl Iterator for ChunkSizes {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.chunks {
            return None;
        }

        let size = if self.index < self.extra {
            self.base + 1
        } else {
            self.base
        };
        self.index += 1;

        Some(size)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.chunks - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ChunkSizes {}
