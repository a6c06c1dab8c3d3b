// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Fixed tuning constants
//!
//! Centralizes the numbers the updater is tuned with, so they are not
//! scattered as magic values across the scheduler and executor.

use std::time::Duration;

/// Default ceiling on calls per batched request
pub const DEFAULT_MAX_CALLS_PER_CHUNK: usize = 100;

/// Quiet period the listener set must stay unchanged before an evaluation
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Suffix marking a length helper field that precedes an array output
pub const LENGTH_FIELD_SUFFIX: &str = "_len";

/// Suffix marking an array type in Cairo ABIs
pub const ARRAY_TYPE_SUFFIX: char = '*';

/// Deepest struct nesting the decoder follows before failing the chunk
pub const MAX_DECODE_DEPTH: usize = 32;

/// Number of low bits kept from keccak-256 when deriving a selector
pub const SELECTOR_BITS: usize = 250;
