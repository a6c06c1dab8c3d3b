// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Caching of decoded call results
//!
//! Every entry remembers the chain position its data was produced at and the
//! position of the latest fetch attempt. Those two positions drive both the
//! staleness check and the projected call state.

pub mod result;

pub use result::{CacheEntry, CachedData, ResultCache};
