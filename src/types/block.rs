// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong type for chain positions
//!
//! Every cache write is tagged with the chain position it was produced at.
//! Using a dedicated type keeps these positions from being confused with
//! listener counts, chunk sizes or raw felt values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonically advancing marker of chain position
///
/// Stands in for "as of which chain state was this data computed". The
/// updater only ever compares timestamps; it never does arithmetic on them.
///
/// # Examples
///
/// ```
/// use multicall_sync::BlockTimestamp;
///
/// let earlier = BlockTimestamp::new(100);
/// let later = BlockTimestamp::new(105);
/// assert!(earlier < later);
/// assert_eq!(later.as_u64(), 105);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockTimestamp(u64);

impl BlockTimestamp {
    /// Create a new block timestamp
    pub const fn new(timestamp: u64) -> Self {
        Self(timestamp)
    }

    /// Get the inner u64 value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for BlockTimestamp {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for BlockTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
