// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for the multicall updater
//!
//! Both knobs are fixed for the lifetime of an updater; there is no runtime
//! reconfiguration.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use multicall_sync::MulticallConfig;
//!
//! // 100 calls per chunk, 100ms debounce
//! let config = MulticallConfig::default();
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use multicall_sync::MulticallConfigBuilder;
//! use std::time::Duration;
//!
//! let config = MulticallConfigBuilder::new()
//!     .max_calls_per_chunk(25)
//!     .debounce(Duration::from_millis(250))
//!     .build();
//! ```

use std::time::Duration;

use crate::types::config::MaxCallsPerChunk;

pub mod constants;

/// Configuration for the multicall updater
///
/// Use [`MulticallConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MulticallConfig {
    /// Maximum number of calls in a single batched request
    /// Default: 100
    pub max_calls_per_chunk: MaxCallsPerChunk,

    /// Quiet period after the last listener change before evaluating
    /// Default: 100ms
    pub debounce: Duration,
}

impl Default for MulticallConfig {
    fn default() -> Self {
        Self {
            max_calls_per_chunk: MaxCallsPerChunk::DEFAULT,
            debounce: constants::DEFAULT_DEBOUNCE,
        }
    }
}

impl MulticallConfig {
    /// Create config with no debounce delay
    ///
    /// Suitable for tests and for callers that already coalesce their own
    /// subscription bursts.
    ///
    /// # Example
    ///
    /// ```rust
    /// use multicall_sync::MulticallConfig;
    /// use std::time::Duration;
    ///
    /// let config = MulticallConfig::immediate();
    /// assert_eq!(config.debounce, Duration::ZERO);
    /// ```
    pub fn immediate() -> Self {
        Self {
            debounce: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Builder for [`MulticallConfig`]
///
/// # Example
///
/// ```rust
/// use multicall_sync::{MaxCallsPerChunk, MulticallConfigBuilder};
///
/// let config = MulticallConfigBuilder::new()
///     .max_calls_per_chunk(10)
///     .build();
/// assert_eq!(config.max_calls_per_chunk, MaxCallsPerChunk::new(10));
/// ```
#[derive(Debug, Default)]
pub struct MulticallConfigBuilder {
    config: MulticallConfig,
}

impl MulticallConfigBuilder {
    /// Create a new builder starting from the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of calls per batched request
    pub fn max_calls_per_chunk(mut self, calls: usize) -> Self {
        self.config.max_calls_per_chunk = MaxCallsPerChunk::new(calls);
        self
    }

    /// Set the listener debounce quiet period
    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.config.debounce = debounce;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> MulticallConfig {
        self.config
    }
}
