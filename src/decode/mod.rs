// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Positional decoding of chunk responses
//!
//! A chunk response is one flat sequence of values. Every call in the chunk
//! decodes its output schema against the same cursor, in chunk order, so a
//! schema mismatch in any call shifts every call after it. The cursor must be
//! exactly exhausted at the end; anything else fails the whole chunk.
//!
//! Arrays are prefixed by a `<name>_len` sibling holding their element count.
//! An empty array still occupies one placeholder slot, which is consumed and
//! discarded. Length helpers are removed from the decoded object once their
//! array has been populated; an empty array keeps its `_len` of zero.
//!
//! Element counts come from the chain, so decoding is bounded: struct nesting
//! stops at [`MAX_DECODE_DEPTH`] and every array element must consume at
//! least one value.

use alloy_primitives::U256;

use crate::abi::{ElementKind, FieldKind, OutputSchema, ResolvedField};
use crate::config::constants::MAX_DECODE_DEPTH;
use crate::errors::DecodeError;

mod cursor;
pub mod value;

use cursor::ResponseCursor;
pub use value::{ResultData, ResultValue};

/// Decode one chunk response into one [`ResultData`] per schema
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use multicall_sync::{decode_chunk, OutputField, OutputSchema, StructDict};
///
/// let schema = OutputSchema::resolve(
///     &[OutputField::new("decimals", "felt")],
///     &StructDict::new(),
/// ).unwrap();
///
/// let decoded = decode_chunk([&schema, &schema], &[U256::from(18u8), U256::from(6u8)]).unwrap();
/// assert_eq!(decoded[0]["decimals"].as_felt(), Some("18"));
/// assert_eq!(decoded[1]["decimals"].as_felt(), Some("6"));
/// ```
pub fn decode_chunk<'s>(
    schemas: impl IntoIterator<Item = &'s OutputSchema>,
    values: &[U256],
) -> Result<Vec<ResultData>, DecodeError> {
    let mut cursor = ResponseCursor::new(values);

    let decoded = schemas
        .into_iter()
        .map(|schema| decode_fields(schema.outputs(), schema, &mut cursor, 0))
        .collect::<Result<Vec<_>, _>>()?;

    match cursor.remaining() {
        0 => Ok(decoded),
        remaining => Err(DecodeError::Leftover { remaining }),
    }
}

fn decode_fields(
    fields: &[ResolvedField],
    schema: &OutputSchema,
    cursor: &mut ResponseCursor<'_>,
    depth: usize,
) -> Result<ResultData, DecodeError> {
    let mut data = ResultData::with_capacity(fields.len());

    for field in fields {
        let value = match &field.kind {
            FieldKind::Length => ResultValue::Count(read_count(&field.name, cursor)?),
            FieldKind::Primitive => felt(cursor.next(&field.name)?),
            FieldKind::Tuple(elements) => ResultValue::List(
                elements
                    .iter()
                    .map(|_| cursor.next(&field.name).map(felt))
                    .collect::<Result<_, _>>()?,
            ),
            FieldKind::Array(element) => {
                let length_field = field.length_field_name();
                let count = data
                    .get(&length_field)
                    .and_then(ResultValue::as_count)
                    .ok_or_else(|| DecodeError::missing_length(&field.name, &length_field))?;

                let elements = decode_array(&field.name, element, count, schema, cursor, depth)?;
                if count > 0 {
                    data.shift_remove(&length_field);
                }
                ResultValue::List(elements)
            }
            FieldKind::Struct(name) => {
                ResultValue::Struct(decode_struct(&field.name, name, schema, cursor, depth)?)
            }
        };

        data.insert(field.name.clone(), value);
    }

    Ok(data)
}

fn decode_array(
    field: &str,
    element: &ElementKind,
    count: usize,
    schema: &OutputSchema,
    cursor: &mut ResponseCursor<'_>,
    depth: usize,
) -> Result<Vec<ResultValue>, DecodeError> {
    if count == 0 {
        // Empty arrays still occupy one slot
        cursor.next(field)?;
        return Ok(Vec::new());
    }

    let mut elements = Vec::with_capacity(count.min(cursor.remaining()));
    for _ in 0..count {
        let value = match element {
            ElementKind::Primitive => felt(cursor.next(field)?),
            ElementKind::Struct(name) => {
                let before = cursor.remaining();
                let value = decode_struct(field, name, schema, cursor, depth)?;
                if cursor.remaining() == before {
                    return Err(DecodeError::empty_element(field));
                }
                ResultValue::Struct(value)
            }
        };
        elements.push(value);
    }
    Ok(elements)
}

fn decode_struct(
    field: &str,
    name: &str,
    schema: &OutputSchema,
    cursor: &mut ResponseCursor<'_>,
    depth: usize,
) -> Result<ResultData, DecodeError> {
    if depth >= MAX_DECODE_DEPTH {
        return Err(DecodeError::depth_exceeded(field, MAX_DECODE_DEPTH));
    }

    let fields = schema
        .struct_fields(name)
        .ok_or_else(|| DecodeError::unknown_struct(name))?;
    decode_fields(fields, schema, cursor, depth + 1)
}

fn read_count(field: &str, cursor: &mut ResponseCursor<'_>) -> Result<usize, DecodeError> {
    let raw = cursor.next(field)?;
    u64::try_from(raw)
        .ok()
        .and_then(|count| usize::try_from(count).ok())
        .ok_or_else(|| DecodeError::length_out_of_range(field, raw.to_string()))
}

fn felt(value: U256) -> ResultValue {
    ResultValue::Felt(value.to_string())
}
