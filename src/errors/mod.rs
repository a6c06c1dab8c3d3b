// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the multicall-sync library.
//!
//! This module provides strongly-typed errors for all public APIs.
//! It follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained error handling
//!   (`InvalidCallError`, `DecodeError`, etc.)
//! - **Unified error type** (`MulticallError`) for convenience when you don't
//!   need to distinguish between error sources
//!
//! # Architecture
//!
//! - [`InvalidCallError`] - Incomplete or malformed call identities
//! - [`AbiError`] - ABI documents and output schemas that cannot be resolved
//! - [`DecodeError`] - Responses that do not match their output schemas
//! - [`ChainClientError`] - Failures at the chain client boundary
//! - [`FetchError`] - Why a chunk failed (client, decode or cancellation)
//!
//! None of these escape the updater: chunk failures are converted into
//! errored cache entries and surface as `CallState { error: true, .. }`.
//!
//! # Examples
//!
//! ```rust
//! use multicall_sync::{Call, MulticallError, OutputField, OutputSchema, StructDict};
//!
//! fn build() -> Result<Call, MulticallError> {
//!     // AbiError converts into MulticallError
//!     let schema = OutputSchema::resolve(&[OutputField::new("res", "felt")], &StructDict::new())?;
//!     // ...and so does InvalidCallError
//!     let call = Call::builder("0x49d36570", "0x2e4263afad30923c")
//!         .calldata(vec!["0x1".to_string()])
//!         .schema(schema)
//!         .build()?;
//!     Ok(call)
//! }
//! # build().unwrap();
//! ```

mod abi;
mod call;
mod client;
mod decode;
mod fetch;

pub use abi::AbiError;
pub use call::InvalidCallError;
pub use client::ChainClientError;
pub use decode::DecodeError;
pub use fetch::FetchError;

/// Unified error type for all multicall-sync operations.
///
/// All module-specific error types automatically convert to
/// `MulticallError` via `From` implementations, so you can use `?` to
/// propagate errors naturally.
#[derive(Debug, thiserror::Error)]
pub enum MulticallError {
    /// Error from call construction or key parsing.
    #[error("Invalid call: {0}")]
    InvalidCall(#[from] InvalidCallError),

    /// Error from ABI parsing or schema resolution.
    #[error("ABI error: {0}")]
    Abi(#[from] AbiError),

    /// Error from response decoding.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Error from a chunk fetch.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}
