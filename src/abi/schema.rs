// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Output schemas
//!
//! Raw ABI output fields carry their type as a string (`felt`, `Uint256`,
//! `(felt, felt)`, `felt*`, ...). [`OutputSchema::resolve`] turns those
//! strings into tagged [`FieldKind`]s once, when the call is built, so the
//! decoder never has to pattern-match type strings.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::constants::{ARRAY_TYPE_SUFFIX, LENGTH_FIELD_SUFFIX};
use crate::errors::AbiError;

/// A named, typed field as it appears in an ABI document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputField {
    /// Field name
    pub name: String,
    /// Raw type string
    #[serde(rename = "type")]
    pub ty: String,
}

impl OutputField {
    /// Create a new output field
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// Struct definitions keyed by type name
pub type StructDict = HashMap<String, Vec<OutputField>>;

/// How a single array element is decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// One value per element
    Primitive,
    /// A full struct decode per element
    Struct(String),
}

/// How a single output field is decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// `*_len` helper: one value, read as an element count
    Length,
    /// One value, rendered as a decimal string
    Primitive,
    /// One value per element type, rendered as a list
    Tuple(Vec<String>),
    /// Elements counted by the preceding `*_len` sibling
    Array(ElementKind),
    /// A nested struct decoded against the same cursor
    Struct(String),
}

/// An output field with its type resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    /// Field name
    pub name: String,
    /// Resolved decoding rule
    pub kind: FieldKind,
}

impl ResolvedField {
    /// Name of the length sibling an array field expects
    pub fn length_field_name(&self) -> String {
        format!("{}{LENGTH_FIELD_SUFFIX}", self.name)
    }
}

/// Output fields of a call plus every struct they may reference
///
/// Structs are resolved by name into a shared table, so recursive and
/// mutually-referencing structs are supported as long as every cycle passes
/// through an array. A struct that contains itself directly is rejected.
///
/// # Examples
///
/// ```
/// use multicall_sync::{ElementKind, FieldKind, OutputField, OutputSchema, StructDict};
///
/// let outputs = vec![
///     OutputField::new("values_len", "felt"),
///     OutputField::new("values", "felt*"),
/// ];
/// let schema = OutputSchema::resolve(&outputs, &StructDict::new()).unwrap();
///
/// assert_eq!(schema.outputs()[0].kind, FieldKind::Length);
/// assert_eq!(schema.outputs()[1].kind, FieldKind::Array(ElementKind::Primitive));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSchema {
    outputs: Vec<ResolvedField>,
    structs: HashMap<String, Vec<ResolvedField>>,
}

impl OutputSchema {
    /// Resolve raw output fields against a struct dictionary
    pub fn resolve(outputs: &[OutputField], structs: &StructDict) -> Result<Self, AbiError> {
        let resolved_outputs = resolve_fields(outputs, structs)?;

        let resolved_structs = structs
            .iter()
            .map(|(name, fields)| Ok((name.clone(), resolve_fields(fields, structs)?)))
            .collect::<Result<HashMap<_, _>, AbiError>>()?;

        reject_direct_cycles(&resolved_structs)?;

        Ok(Self {
            outputs: resolved_outputs,
            structs: resolved_structs,
        })
    }

    /// Top-level output fields, in decoding order
    pub fn outputs(&self) -> &[ResolvedField] {
        &self.outputs
    }

    /// Fields of the named struct, if the schema knows it
    pub fn struct_fields(&self, name: &str) -> Option<&[ResolvedField]> {
        self.structs.get(name).map(Vec::as_slice)
    }
}

fn resolve_fields(
    fields: &[OutputField],
    structs: &StructDict,
) -> Result<Vec<ResolvedField>, AbiError> {
    fields
        .iter()
        .map(|field| {
            Ok(ResolvedField {
                name: field.name.clone(),
                kind: resolve_kind(field, structs)?,
            })
        })
        .collect()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

/// Fail if any struct reaches itself through struct fields alone
fn reject_direct_cycles(structs: &HashMap<String, Vec<ResolvedField>>) -> Result<(), AbiError> {
    let mut visits = HashMap::with_capacity(structs.len());
    for name in structs.keys() {
        visit_struct(name, structs, &mut visits)?;
    }
    Ok(())
}

fn visit_struct<'s>(
    name: &'s str,
    structs: &'s HashMap<String, Vec<ResolvedField>>,
    visits: &mut HashMap<&'s str, Visit>,
) -> Result<(), AbiError> {
    match visits.get(name) {
        Some(Visit::Done) => return Ok(()),
        Some(Visit::InProgress) => return Err(AbiError::recursive_struct(name)),
        None => {}
    }

    visits.insert(name, Visit::InProgress);
    for field in structs.get(name).into_iter().flatten() {
        // Arrays may recurse: their length comes from the response
        if let FieldKind::Struct(inner) = &field.kind {
            visit_struct(inner, structs, visits)?;
        }
    }
    visits.insert(name, Visit::Done);
    Ok(())
}

fn resolve_kind(field: &OutputField, structs: &StructDict) -> Result<FieldKind, AbiError> {
    if field.name.ends_with(LENGTH_FIELD_SUFFIX) {
        return Ok(FieldKind::Length);
    }

    let ty = field.ty.trim();
    let invalid = || AbiError::invalid_type(&field.name, &field.ty);

    if ty.is_empty() {
        return Err(invalid());
    }

    if let Some(inner) = ty.strip_prefix('(') {
        let inner = inner.strip_suffix(')').ok_or_else(invalid)?;
        let elements = inner
            .split(',')
            .map(|element| {
                // Named members are written `name : type`
                let ty = element.rsplit(':').next().unwrap_or(element).trim();
                if ty.is_empty() {
                    Err(invalid())
                } else {
                    Ok(ty.to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(FieldKind::Tuple(elements));
    }

    if let Some(element) = ty.strip_suffix(ARRAY_TYPE_SUFFIX) {
        let element = element.trim();
        if element.is_empty() || element.ends_with(ARRAY_TYPE_SUFFIX) {
            return Err(invalid());
        }

        let kind = if structs.contains_key(element) {
            ElementKind::Struct(element.to_string())
        } else {
            ElementKind::Primitive
        };
        return Ok(FieldKind::Array(kind));
    }

    if structs.contains_key(ty) {
        return Ok(FieldKind::Struct(ty.to_string()));
    }

    Ok(FieldKind::Primitive)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uint256_structs() -> StructDict {
        let mut structs = StructDict::new();
        structs.insert(
            "Uint256".to_string(),
            vec![
                OutputField::new("low", "felt"),
                OutputField::new("high", "felt"),
            ],
        );
        structs
    }

    #[test]
    fn test_resolves_primitive_and_struct() {
        let outputs = vec![
            OutputField::new("decimals", "felt"),
            OutputField::new("balance", "Uint256"),
        ];
        let schema = OutputSchema::resolve(&outputs, &uint256_structs()).unwrap();

        assert_eq!(schema.outputs()[0].kind, FieldKind::Primitive);
        assert_eq!(
            schema.outputs()[1].kind,
            FieldKind::Struct("Uint256".to_string())
        );
        assert_eq!(schema.struct_fields("Uint256").unwrap().len(), 2);
    }

    #[test]
    fn test_length_suffix_wins_over_type() {
        let outputs = vec![OutputField::new("items_len", "Uint256")];
        let schema = OutputSchema::resolve(&outputs, &uint256_structs()).unwrap();
        assert_eq!(schema.outputs()[0].kind, FieldKind::Length);
    }

    #[test]
    fn test_resolves_tuples() {
        let outputs = vec![
            OutputField::new("pair", "(felt, felt)"),
            OutputField::new("named", "(x : felt, y : felt, z : felt)"),
        ];
        let schema = OutputSchema::resolve(&outputs, &StructDict::new()).unwrap();

        assert_eq!(
            schema.outputs()[0].kind,
            FieldKind::Tuple(vec!["felt".to_string(), "felt".to_string()])
        );
        match &schema.outputs()[1].kind {
            FieldKind::Tuple(elements) => assert_eq!(elements.len(), 3),
            other => panic!("expected tuple, got {other:?}"),
        }
    }

    #[test]
    fn test_resolves_struct_arrays_against_dereferenced_type() {
        let outputs = vec![
            OutputField::new("balances_len", "felt"),
            OutputField::new("balances", "Uint256*"),
        ];
        let schema = OutputSchema::resolve(&outputs, &uint256_structs()).unwrap();
        assert_eq!(
            schema.outputs()[1].kind,
            FieldKind::Array(ElementKind::Struct("Uint256".to_string()))
        );
    }

    #[test]
    fn test_rejects_malformed_types() {
        for ty in ["(felt, felt", "*", "felt**", "", "(felt,)"] {
            let outputs = vec![OutputField::new("bad", ty)];
            assert!(
                OutputSchema::resolve(&outputs, &StructDict::new()).is_err(),
                "type {ty:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_recursive_structs_resolve() {
        let mut structs = StructDict::new();
        structs.insert(
            "Node".to_string(),
            vec![
                OutputField::new("value", "felt"),
                OutputField::new("children_len", "felt"),
                OutputField::new("children", "Node*"),
            ],
        );
        let schema =
            OutputSchema::resolve(&[OutputField::new("root", "Node")], &structs).unwrap();

        let node = schema.struct_fields("Node").unwrap();
        assert_eq!(
            node[2].kind,
            FieldKind::Array(ElementKind::Struct("Node".to_string()))
        );
    }

    #[test]
    fn test_struct_containing_itself_is_rejected() {
        let mut structs = StructDict::new();
        structs.insert("Loop".to_string(), vec![OutputField::new("inner", "Loop")]);

        let result = OutputSchema::resolve(&[OutputField::new("x", "Loop")], &structs);
        assert!(matches!(result, Err(AbiError::RecursiveStruct { .. })));
    }

    #[test]
    fn test_mutually_containing_structs_are_rejected() {
        let mut structs = StructDict::new();
        structs.insert("A".to_string(), vec![OutputField::new("b", "B")]);
        structs.insert(
            "B".to_string(),
            vec![OutputField::new("value", "felt"), OutputField::new("a", "A")],
        );

        let result = OutputSchema::resolve(&[OutputField::new("x", "felt")], &structs);
        assert!(matches!(result, Err(AbiError::RecursiveStruct { .. })));
    }

    #[test]
    fn test_shared_struct_is_not_a_cycle() {
        let mut structs = uint256_structs();
        structs.insert(
            "Pair".to_string(),
            vec![
                OutputField::new("left", "Uint256"),
                OutputField::new("right", "Uint256"),
            ],
        );

        assert!(OutputSchema::resolve(&[OutputField::new("p", "Pair")], &structs).is_ok());
    }

    #[test]
    fn test_length_field_name() {
        let field = ResolvedField {
            name: "items".to_string(),
            kind: FieldKind::Array(ElementKind::Primitive),
        };
        assert_eq!(field.length_field_name(), "items_len");
    }
}
