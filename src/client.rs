// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Chain client boundary
//!
//! The updater never talks to a node directly. It hands each chunk's
//! flattened calldata to a [`ChainClient`], which executes it through an
//! aggregating contract and returns the flat result values.

use alloy_primitives::U256;
use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::ChainClientError;

/// Executes one batched read request
///
/// `calldata` is the concatenation, per call, of
/// `address, selector, calldata length, calldata...`. The returned values
/// are decoded positionally against every call of the chunk in order.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use async_trait::async_trait;
/// use multicall_sync::{ChainClient, ChainClientError};
///
/// struct Zeroes;
///
/// #[async_trait]
/// impl ChainClient for Zeroes {
///     async fn execute_batch(&self, calldata: Vec<String>) -> Result<Vec<U256>, ChainClientError> {
///         Ok(vec![U256::ZERO; calldata.len() / 3])
///     }
/// }
/// ```
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Execute the flattened batch and return its flat result values
    async fn execute_batch(&self, calldata: Vec<String>) -> Result<Vec<U256>, ChainClientError>;
}

#[async_trait]
impl<C: ChainClient + ?Sized> ChainClient for Arc<C> {
    async fn execute_batch(&self, calldata: Vec<String>) -> Result<Vec<U256>, ChainClientError> {
        (**self).execute_batch(calldata).await
    }
}
