// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for chunk fetches.

use super::{ChainClientError, DecodeError};
use crate::BlockTimestamp;

/// Why a chunk failed.
///
/// Every variant is handled the same way by the updater: all calls in the
/// chunk are marked errored at the chunk's block timestamp. The variants
/// only differ in how they are logged.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The chain client rejected or failed the request.
    #[error("Chain client error: {0}")]
    Client(#[from] ChainClientError),

    /// The response did not match the calls' output schemas.
    #[error("Malformed response: {0}")]
    Decode(#[from] DecodeError),

    /// The request was abandoned because a newer block was observed.
    #[error("Fetch for block {block_timestamp} was cancelled")]
    Cancelled {
        /// The block timestamp the abandoned request targeted
        block_timestamp: BlockTimestamp,
    },
}

impl FetchError {
    /// Create a `Cancelled` error.
    pub fn cancelled(block_timestamp: BlockTimestamp) -> Self {
        FetchError::Cancelled { block_timestamp }
    }

    /// Whether this failure is a cancellation rather than a real error.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled { .. })
    }
}
