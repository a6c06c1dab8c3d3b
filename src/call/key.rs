// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Canonical call identity
//!
//! A call key is the only map key shared by the listener registry and the
//! result cache. It is built from the identity fields of a call only
//! (address, selector, calldata); output schemas are not part of it.
//!
//! Format: `{address}-{selector}-{calldata joined by ','}`. Addresses and
//! selectors may not contain `-`, calldata elements may not contain `,`, so
//! the format is injective and [`CallKey::parse`] recovers the fields exactly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::InvalidCallError;

const FIELD_SEPARATOR: char = '-';
const CALLDATA_SEPARATOR: char = ',';

/// Identity fields of a call, recovered from a [`CallKey`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallIdentity {
    /// Contract address
    pub address: String,
    /// Entry point selector
    pub selector: String,
    /// Compiled calldata
    pub calldata: Vec<String>,
}

/// Canonical string identity of a call
///
/// Two calls with identical address, selector and calldata always map to the
/// same key. Keys order lexicographically, which gives evaluation cycles a
/// deterministic call order.
///
/// # Examples
///
/// ```
/// use multicall_sync::CallKey;
///
/// let key = CallKey::from_parts("0x49d3", "0x2e42", &["0x1".to_string(), "7".to_string()]).unwrap();
/// assert_eq!(key.as_str(), "0x49d3-0x2e42-0x1,7");
///
/// let identity = key.parse().unwrap();
/// assert_eq!(identity.calldata, vec!["0x1", "7"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallKey(String);

impl CallKey {
    /// Build the key for the given identity fields
    pub fn from_parts(
        address: &str,
        selector: &str,
        calldata: &[String],
    ) -> Result<Self, InvalidCallError> {
        validate_identity(address, selector, calldata)?;

        let calldata = calldata.join(&CALLDATA_SEPARATOR.to_string());
        Ok(Self(format!(
            "{address}{FIELD_SEPARATOR}{selector}{FIELD_SEPARATOR}{calldata}"
        )))
    }

    /// Recover the identity fields this key was built from
    pub fn parse(&self) -> Result<CallIdentity, InvalidCallError> {
        let mut parts = self.0.splitn(3, FIELD_SEPARATOR);

        let (Some(address), Some(selector), Some(calldata)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(InvalidCallError::malformed_key(&self.0));
        };

        let calldata: Vec<String> = if calldata.is_empty() {
            Vec::new()
        } else {
            calldata
                .split(CALLDATA_SEPARATOR)
                .map(str::to_string)
                .collect()
        };

        validate_identity(address, selector, &calldata)
            .map_err(|_| InvalidCallError::malformed_key(&self.0))?;

        Ok(CallIdentity {
            address: address.to_string(),
            selector: selector.to_string(),
            calldata,
        })
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CallKey {
    type Err = InvalidCallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = Self(s.to_string());
        key.parse()?;
        Ok(key)
    }
}

impl fmt::Display for CallKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn validate_identity(
    address: &str,
    selector: &str,
    calldata: &[String],
) -> Result<(), InvalidCallError> {
    if address.is_empty() {
        return Err(InvalidCallError::missing_field("address"));
    }
    if selector.is_empty() {
        return Err(InvalidCallError::missing_field("selector"));
    }
    if address.contains(FIELD_SEPARATOR) {
        return Err(InvalidCallError::reserved_character(
            "address",
            FIELD_SEPARATOR,
            address,
        ));
    }
    if selector.contains(FIELD_SEPARATOR) {
        return Err(InvalidCallError::reserved_character(
            "selector",
            FIELD_SEPARATOR,
            selector,
        ));
    }

    for value in calldata {
        if value.is_empty() {
            return Err(InvalidCallError::missing_field("calldata"));
        }
        if value.contains(CALLDATA_SEPARATOR) {
            return Err(InvalidCallError::reserved_character(
                "calldata",
                CALLDATA_SEPARATOR,
                value.as_str(),
            ));
        }
    }

    Ok(())
}
