// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use alloy_primitives::U256;

use crate::errors::DecodeError;

/// Forward-only reader shared by every call in a chunk
#[derive(Debug)]
pub(crate) struct ResponseCursor<'a> {
    values: &'a [U256],
    position: usize,
}

impl<'a> ResponseCursor<'a> {
    pub(crate) fn new(values: &'a [U256]) -> Self {
        Self {
            values,
            position: 0,
        }
    }

    /// Consume the next value, attributing exhaustion to `field`
    pub(crate) fn next(&mut self, field: &str) -> Result<U256, DecodeError> {
        let value = self
            .values
            .get(self.position)
            .copied()
            .ok_or_else(|| DecodeError::exhausted(field))?;
        self.position += 1;
        Ok(value)
    }

    pub(crate) fn remaining(&self) -> usize {
        self.values.len() - self.position
    }
}
