// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for call construction and call key parsing.

/// Errors that can occur while building a [`Call`](crate::Call) or parsing
/// a [`CallKey`](crate::CallKey).
///
/// An invalid call never enters the listener registry or the result cache;
/// callers that hold an invalid call project it as
/// [`CallState::INVALID`](crate::CallState::INVALID).
///
/// # Examples
///
/// ```rust
/// use multicall_sync::{Call, InvalidCallError};
///
/// let err = Call::builder("", "0x2e4263").build().unwrap_err();
/// assert!(matches!(err, InvalidCallError::MissingField { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidCallError {
    /// A required identity field is empty.
    #[error("Missing call field: {field}")]
    MissingField {
        /// Name of the empty field
        field: &'static str,
    },

    /// An identity field contains a character reserved by the key format.
    ///
    /// Addresses, selectors and calldata are hex or decimal felts, so a
    /// separator inside one of them means the input is not a felt at all.
    #[error("Field {field} contains reserved character {character:?}: {value}")]
    ReservedCharacter {
        /// Name of the offending field
        field: &'static str,
        /// The reserved character found
        character: char,
        /// The full offending value
        value: String,
    },

    /// A call key string does not have the `address-selector-calldata` shape.
    #[error("Malformed call key: {key}")]
    MalformedKey {
        /// The key that failed to parse
        key: String,
    },
}

impl InvalidCallError {
    /// Create a `MissingField` error for the named field.
    pub fn missing_field(field: &'static str) -> Self {
        InvalidCallError::MissingField { field }
    }

    /// Create a `ReservedCharacter` error.
    pub fn reserved_character(
        field: &'static str,
        character: char,
        value: impl Into<String>,
    ) -> Self {
        InvalidCallError::ReservedCharacter {
            field,
            character,
            value: value.into(),
        }
    }

    /// Create a `MalformedKey` error.
    pub fn malformed_key(key: impl Into<String>) -> Self {
        InvalidCallError::MalformedKey { key: key.into() }
    }
}
