// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Decoded fields of a single call, in schema order
pub type ResultData = IndexMap<String, ResultValue>;

/// A decoded output value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultValue {
    /// A primitive, rendered in decimal
    Felt(String),
    /// A `*_len` element count
    Count(usize),
    /// A tuple or array
    List(Vec<ResultValue>),
    /// A nested struct
    Struct(ResultData),
}

impl ResultValue {
    /// The primitive rendering, if this is a primitive
    pub fn as_felt(&self) -> Option<&str> {
        match self {
            ResultValue::Felt(value) => Some(value),
            _ => None,
        }
    }

    /// The element count, if this is a `*_len` helper
    pub fn as_count(&self) -> Option<usize> {
        match self {
            ResultValue::Count(count) => Some(*count),
            _ => None,
        }
    }

    /// The elements, if this is a tuple or array
    pub fn as_list(&self) -> Option<&[ResultValue]> {
        match self {
            ResultValue::List(values) => Some(values),
            _ => None,
        }
    }

    /// The nested fields, if this is a struct
    pub fn as_struct(&self) -> Option<&ResultData> {
        match self {
            ResultValue::Struct(fields) => Some(fields),
            _ => None,
        }
    }
}

impl From<&str> for ResultValue {
    fn from(value: &str) -> Self {
        ResultValue::Felt(value.to_string())
    }
}
