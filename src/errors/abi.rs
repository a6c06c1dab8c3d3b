// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for ABI parsing and output schema resolution.

/// Errors that can occur while loading an ABI or resolving an output schema.
///
/// Schema errors surface when a call is built, before it ever reaches the
/// registry. Response-shape problems (such as a missing `_len` value) are
/// not schema errors; they are reported by [`DecodeError`](crate::DecodeError)
/// at decode time.
#[derive(Debug, thiserror::Error)]
pub enum AbiError {
    /// The ABI document is not valid JSON or does not match the entry shape.
    #[error("Failed to parse ABI: {0}")]
    Parse(#[from] serde_json::Error),

    /// No function with the given name exists in the ABI.
    #[error("Function not found in ABI: {name}")]
    FunctionNotFound {
        /// The method name that was looked up
        name: String,
    },

    /// A type string could not be interpreted.
    ///
    /// For example an unbalanced tuple such as `(felt, felt` or an array
    /// marker with no element type.
    #[error("Invalid type {ty} for field {field}")]
    InvalidType {
        /// Name of the field carrying the type
        field: String,
        /// The raw type string
        ty: String,
    },

    /// A struct contains itself without an array in between.
    ///
    /// Such a struct has no finite encoding.
    #[error("Struct {name} contains itself")]
    RecursiveStruct {
        /// A struct on the cycle
        name: String,
    },
}

impl AbiError {
    /// Create a `FunctionNotFound` error.
    pub fn function_not_found(name: impl Into<String>) -> Self {
        AbiError::FunctionNotFound { name: name.into() }
    }

    /// Create an `InvalidType` error.
    pub fn invalid_type(field: impl Into<String>, ty: impl Into<String>) -> Self {
        AbiError::InvalidType {
            field: field.into(),
            ty: ty.into(),
        }
    }

    /// Create a `RecursiveStruct` error.
    pub fn recursive_struct(name: impl Into<String>) -> Self {
        AbiError::RecursiveStruct { name: name.into() }
    }
}
