// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Shared error types for the chain client boundary.
//!
//! These errors are produced by [`ChainClient`](crate::ChainClient)
//! implementations when a batched view call cannot be executed.

/// Errors that can occur while executing a batched call on chain.
///
/// # Examples
///
/// ```rust
/// use multicall_sync::ChainClientError;
///
/// let error = ChainClientError::Rejected {
///     reason: "entrypoint not found".to_string(),
/// };
/// println!("Error: {}", error);
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ChainClientError {
    /// The node or transport failed to execute the request.
    ///
    /// This can occur due to rate limiting, network connectivity issues,
    /// or provider-side errors.
    #[error("Batched call failed during {operation}")]
    RequestFailed {
        /// Description of the operation that failed
        operation: String,
        /// The underlying transport error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The node executed the request but the multicall contract reverted.
    #[error("Batched call rejected: {reason}")]
    Rejected {
        /// Revert reason reported by the node
        reason: String,
    },
}

impl ChainClientError {
    /// Helper to create a `RequestFailed` error from any error type.
    pub fn request_failed(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ChainClientError::RequestFailed {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Helper to create a `Rejected` error.
    pub fn rejected(reason: impl Into<String>) -> Self {
        ChainClientError::Rejected {
            reason: reason.into(),
        }
    }
}
