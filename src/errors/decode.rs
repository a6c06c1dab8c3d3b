// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for response decoding.

/// Errors that can occur while decoding a flat chunk response.
///
/// Any of these fails the whole chunk: no call in the chunk is recorded as
/// a success, every call in it is marked errored instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The response ended before the schema was fully decoded.
    #[error("Response exhausted while decoding field {field}")]
    Exhausted {
        /// The field being decoded when values ran out
        field: String,
    },

    /// Values remained after every call in the chunk was decoded.
    #[error("{remaining} unconsumed values left in response")]
    Leftover {
        /// Number of values left over
        remaining: usize,
    },

    /// An array field has no decoded `_len` sibling before it.
    #[error("Missing length field {length_field} for array {field}")]
    MissingLength {
        /// The array field
        field: String,
        /// The expected length field name
        length_field: String,
    },

    /// A length value does not fit a `usize`.
    #[error("Length for field {field} is out of range: {value}")]
    LengthOutOfRange {
        /// The length field
        field: String,
        /// The decimal rendering of the raw value
        value: String,
    },

    /// Struct nesting went deeper than the decoder follows.
    #[error("Struct nesting deeper than {limit} levels at field {field}")]
    DepthExceeded {
        /// The field whose struct would exceed the limit
        field: String,
        /// The nesting limit
        limit: usize,
    },

    /// An array element decoded without consuming any value.
    ///
    /// Element counts come from the response, so an element that reads
    /// nothing could otherwise be repeated without bound.
    #[error("Array {field} has elements that consume no values")]
    EmptyElement {
        /// The array field
        field: String,
    },

    /// A struct reference names a struct missing from the schema.
    #[error("Unknown struct {name}")]
    UnknownStruct {
        /// The struct name
        name: String,
    },
}

impl DecodeError {
    /// Create an `Exhausted` error.
    pub fn exhausted(field: impl Into<String>) -> Self {
        DecodeError::Exhausted {
            field: field.into(),
        }
    }

    /// Create a `MissingLength` error for the given array field.
    pub fn missing_length(field: impl Into<String>, length_field: impl Into<String>) -> Self {
        DecodeError::MissingLength {
            field: field.into(),
            length_field: length_field.into(),
        }
    }

    /// Create a `LengthOutOfRange` error.
    pub fn length_out_of_range(field: impl Into<String>, value: impl Into<String>) -> Self {
        DecodeError::LengthOutOfRange {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a `DepthExceeded` error.
    pub fn depth_exceeded(field: impl Into<String>, limit: usize) -> Self {
        DecodeError::DepthExceeded {
            field: field.into(),
            limit,
        }
    }

    /// Create an `EmptyElement` error.
    pub fn empty_element(field: impl Into<String>) -> Self {
        DecodeError::EmptyElement {
            field: field.into(),
        }
    }

    /// Create an `UnknownStruct` error.
    pub fn unknown_struct(name: impl Into<String>) -> Self {
        DecodeError::UnknownStruct { name: name.into() }
    }
}
