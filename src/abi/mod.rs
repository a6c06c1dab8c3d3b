// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Contract ABIs and resolved output schemas

pub mod contract;
pub mod schema;

pub use contract::{selector_from_name, ContractAbi};
pub use schema::{ElementKind, FieldKind, OutputField, OutputSchema, ResolvedField, StructDict};
