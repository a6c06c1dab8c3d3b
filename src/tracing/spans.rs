// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for multicall operations.
//!
//! Each instrumented operation has a span helper here instead of an
//! `#[instrument]` attribute on the operation itself.
//!
//! Usage pattern:
//! ```rust,ignore
//! let span = spans::evaluate(trigger, block_timestamp, listened);
//! let _guard = span.enter();
//! ```

use tracing::{Level, Span};

use crate::types::block::BlockTimestamp;

/// Create span for the lifetime of an updater task.
///
/// Parent: None (root span for this updater)
/// Children: evaluate spans, fetch_chunk spans
#[inline]
pub(crate) fn updater(max_calls_per_chunk: usize, debounce_ms: u128) -> Span {
    tracing::span!(
        Level::INFO,
        "multicall.updater",
        max_calls_per_chunk = max_calls_per_chunk,
        debounce_ms = debounce_ms,
    )
}

/// Create span for one evaluation of the settled listener set.
///
/// Parent: updater span
/// Children: None (chunks are spawned, not awaited)
#[inline]
pub(crate) fn evaluate(
    trigger: &'static str,
    block_timestamp: BlockTimestamp,
    listened: usize,
) -> Span {
    tracing::debug_span!(
        "multicall.evaluate",
        trigger = trigger,
        block_timestamp = %block_timestamp,
        listened = listened,
    )
}

/// Create span for one batched chunk request.
///
/// Parent: updater span
/// Children: chain client request
#[inline]
pub(crate) fn fetch_chunk(chunk_id: u64, block_timestamp: BlockTimestamp, calls: usize) -> Span {
    tracing::debug_span!(
        "multicall.fetch_chunk",
        chunk_id = chunk_id,
        block_timestamp = %block_timestamp,
        calls = calls,
    )
}
