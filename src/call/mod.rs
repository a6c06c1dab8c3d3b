// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! View calls and their identities
//!
//! A [`Call`] is a single read request against a fixed address, entry point
//! and calldata, together with the output schema needed to decode its
//! result. Its [`CallKey`] is derived once at construction.

use std::sync::Arc;

use crate::abi::OutputSchema;
use crate::errors::InvalidCallError;

pub mod key;

pub use key::{CallIdentity, CallKey};

/// A single read request against a contract
///
/// Identity for caching and subscription is `(address, selector, calldata)`.
/// The output schema is not part of the identity, but every subscriber of
/// the same key is expected to supply an equivalent schema.
///
/// # Examples
///
/// ```rust
/// use multicall_sync::{Call, OutputField, OutputSchema, StructDict};
///
/// let outputs = vec![OutputField::new("balance", "Uint256")];
/// let mut structs = StructDict::new();
/// structs.insert(
///     "Uint256".to_string(),
///     vec![OutputField::new("low", "felt"), OutputField::new("high", "felt")],
/// );
///
/// let call = Call::builder("0x49d36570", "0x2e4263af")
///     .calldata(vec!["0x557b".to_string()])
///     .schema(OutputSchema::resolve(&outputs, &structs).unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(call.key().as_str(), "0x49d36570-0x2e4263af-0x557b");
/// ```
#[derive(Debug, Clone)]
pub struct Call {
    address: String,
    selector: String,
    calldata: Vec<String>,
    schema: Arc<OutputSchema>,
    key: CallKey,
}

impl Call {
    /// Start building a call against `address` / `selector`
    pub fn builder(address: impl Into<String>, selector: impl Into<String>) -> CallBuilder {
        CallBuilder {
            address: address.into(),
            selector: selector.into(),
            calldata: None,
            schema: None,
        }
    }

    /// Contract address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Entry point selector
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Compiled calldata
    pub fn calldata(&self) -> &[String] {
        &self.calldata
    }

    /// Output schema used to decode the call's result
    pub fn schema(&self) -> &OutputSchema {
        &self.schema
    }

    /// Canonical identity of the call
    pub fn key(&self) -> &CallKey {
        &self.key
    }
}

/// Builder for [`Call`]
///
/// Address, selector, calldata and schema are all required; a call missing
/// any of them is invalid and never reaches the registry.
#[derive(Debug)]
pub struct CallBuilder {
    address: String,
    selector: String,
    calldata: Option<Vec<String>>,
    schema: Option<Arc<OutputSchema>>,
}

impl CallBuilder {
    /// Set the compiled calldata (may be empty, but must be set)
    pub fn calldata(mut self, calldata: Vec<String>) -> Self {
        self.calldata = Some(calldata);
        self
    }

    /// Set the output schema
    pub fn schema(mut self, schema: impl Into<Arc<OutputSchema>>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Validate the identity fields and build the call
    pub fn build(self) -> Result<Call, InvalidCallError> {
        let calldata = self
            .calldata
            .ok_or_else(|| InvalidCallError::missing_field("calldata"))?;
        let schema = self
            .schema
            .ok_or_else(|| InvalidCallError::missing_field("schema"))?;

        let key = CallKey::from_parts(&self.address, &self.selector, &calldata)?;

        Ok(Call {
            address: self.address,
            selector: self.selector,
            calldata,
            schema,
            key,
        })
    }
}
