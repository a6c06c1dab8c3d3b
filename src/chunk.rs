// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Balanced partitioning of calls into batched requests

use crate::types::config::MaxCallsPerChunk;

/// Split `calls` into balanced, order-preserving chunks
///
/// Chunk sizes never exceed `max` and differ from each other by at most one,
/// so there is no trailing near-empty chunk.
///
/// # Examples
///
/// ```
/// use multicall_sync::{chunk_calls, MaxCallsPerChunk};
///
/// let chunks = chunk_calls((0..7).collect(), MaxCallsPerChunk::new(3));
/// let sizes: Vec<_> = chunks.iter().map(Vec::len).collect();
/// assert_eq!(sizes, vec![3, 2, 2]);
/// ```
pub fn chunk_calls<T>(calls: Vec<T>, max: MaxCallsPerChunk) -> Vec<Vec<T>> {
    let mut remaining = calls.into_iter();
    max.chunk_sizes(remaining.len())
        .map(|size| remaining.by_ref().take(size).collect())
        .collect()
}
