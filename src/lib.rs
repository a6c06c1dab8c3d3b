// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Deduplicating, batching, block-aware cache for on-chain view calls.
//!
//! Many independent consumers declare interest in read-only contract calls.
//! The [`Updater`] collapses identical calls into one [`CallKey`], waits for
//! the listened set to settle, fetches whatever is stale at the latest chain
//! position in balanced batches through a [`ChainClient`], decodes the flat
//! responses against each call's [`OutputSchema`], and serves the cached
//! results back as [`CallState`]s.
//!
//! # Example
//!
//! ```no_run
//! use alloy_primitives::U256;
//! use async_trait::async_trait;
//! use multicall_sync::{
//!     BlockTimestamp, ChainClient, ChainClientError, ContractAbi, MulticallConfig, Updater,
//! };
//! use tokio::sync::watch;
//!
//! struct Node;
//!
//! #[async_trait]
//! impl ChainClient for Node {
//!     async fn execute_batch(&self, calldata: Vec<String>) -> Result<Vec<U256>, ChainClientError> {
//!         // Execute `calldata` through the aggregating contract here
//!         Ok(Vec::new())
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let abi = ContractAbi::from_json(r#"[
//!     {"type": "function", "name": "decimals", "inputs": [],
//!      "outputs": [{"name": "decimals", "type": "felt"}]}
//! ]"#)?;
//! let calls = abi.multiple_contract_single_data(
//!     &[Some("0x49d36570".to_string())],
//!     "decimals",
//!     Some(Vec::new()),
//! )?;
//!
//! let (block_tx, block_rx) = watch::channel(Some(BlockTimestamp::new(1_700_000_000)));
//! let (handle, _task) = Updater::spawn(Node, MulticallConfig::default(), block_rx);
//!
//! let _subscription = handle.subscribe(calls.iter().flatten());
//! let mut changes = handle.changes();
//! changes.changed().await?;
//!
//! for state in handle.call_states(&calls) {
//!     println!("{state:?}");
//! }
//! # drop(block_tx);
//! # Ok(())
//! # }
//! ```

pub mod abi;
pub mod cache;
pub mod call;
mod chunk;
mod client;
pub mod config;
pub mod decode;
pub mod errors;
mod handle;
mod registry;
mod staleness;
mod state;
mod store;
mod tracing;
pub mod types;
mod updater;

pub use abi::{
    selector_from_name, ContractAbi, ElementKind, FieldKind, OutputField, OutputSchema,
    ResolvedField, StructDict,
};
pub use cache::{CacheEntry, CachedData, ResultCache};
pub use call::{Call, CallBuilder, CallIdentity, CallKey};
pub use chunk::chunk_calls;
pub use client::ChainClient;
pub use config::{MulticallConfig, MulticallConfigBuilder};
pub use decode::{decode_chunk, ResultData, ResultValue};
pub use errors::{
    AbiError, ChainClientError, DecodeError, FetchError, InvalidCallError, MulticallError,
};
pub use handle::{MulticallHandle, Subscription};
pub use registry::ListenerRegistry;
pub use staleness::{is_outdated, outdated_keys};
pub use state::{project, CallResult, CallState};
pub use store::MulticallStore;
pub use types::block::BlockTimestamp;
pub use types::config::{ChunkSizes, MaxCallsPerChunk};
pub use updater::Updater;
