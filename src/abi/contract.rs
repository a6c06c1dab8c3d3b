// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Contract ABI documents and call construction helpers

use alloy_primitives::{keccak256, U256};
use serde::Deserialize;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use tracing::debug;

use super::schema::{OutputField, OutputSchema, StructDict};
use crate::call::Call;
use crate::config::constants::{ARRAY_TYPE_SUFFIX, SELECTOR_BITS};
use crate::errors::AbiError;

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum AbiEntry {
    Function {
        name: String,
        #[serde(default)]
        outputs: Vec<OutputField>,
    },
    Struct {
        name: String,
        #[serde(default)]
        members: Vec<OutputField>,
    },
    #[serde(other)]
    Other,
}

/// A parsed contract ABI
///
/// Only functions and structs are retained; events, constructors and other
/// entries are ignored.
#[derive(Debug, Clone, Default)]
pub struct ContractAbi {
    functions: HashMap<String, Vec<OutputField>>,
    structs: StructDict,
}

impl ContractAbi {
    /// Parse a JSON ABI document
    ///
    /// # Examples
    ///
    /// ```
    /// use multicall_sync::ContractAbi;
    ///
    /// let abi = ContractAbi::from_json(r#"[
    ///     {"type": "function", "name": "decimals", "inputs": [],
    ///      "outputs": [{"name": "decimals", "type": "felt"}]},
    ///     {"type": "event", "name": "Transfer", "keys": [], "data": []}
    /// ]"#).unwrap();
    ///
    /// assert_eq!(abi.function_outputs("decimals").unwrap().len(), 1);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, AbiError> {
        let entries: Vec<AbiEntry> = serde_json::from_str(json)?;

        let mut abi = Self::default();
        for entry in entries {
            match entry {
                AbiEntry::Function { name, outputs } => {
                    abi.functions.insert(name, outputs);
                }
                AbiEntry::Struct { name, members } => {
                    abi.structs.insert(name, members);
                }
                AbiEntry::Other => {}
            }
        }

        debug!(
            functions = abi.functions.len(),
            structs = abi.structs.len(),
            "Parsed contract ABI"
        );
        Ok(abi)
    }

    /// Output fields of the named function
    pub fn function_outputs(&self, name: &str) -> Result<&[OutputField], AbiError> {
        self.functions
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| AbiError::function_not_found(name))
    }

    /// Struct definitions reachable from `outputs`
    ///
    /// Array suffixes are stripped before lookup, so `Uint256*` pulls in
    /// `Uint256`. Structs referenced only from other structs are included.
    pub fn structs_for(&self, outputs: &[OutputField]) -> StructDict {
        let mut reachable = StructDict::new();
        let mut seen = HashSet::new();
        let mut queue: VecDeque<&str> = outputs.iter().map(|f| f.ty.as_str()).collect();

        while let Some(ty) = queue.pop_front() {
            let name = ty.trim().trim_end_matches(ARRAY_TYPE_SUFFIX);
            if !seen.insert(name.to_string()) {
                continue;
            }
            if let Some(members) = self.structs.get(name) {
                queue.extend(members.iter().map(|m| m.ty.as_str()));
                reachable.insert(name.to_string(), members.clone());
            }
        }

        reachable
    }

    /// Resolved output schema of the named function
    pub fn output_schema(&self, name: &str) -> Result<OutputSchema, AbiError> {
        let outputs = self.function_outputs(name)?;
        OutputSchema::resolve(outputs, &self.structs_for(outputs))
    }

    /// Build the same call against many contracts
    ///
    /// The result is index-aligned with `addresses`. An entry is `None` when
    /// its address is missing, when `calldata` is missing, or when the method
    /// declares no outputs. Those project to the invalid call state.
    ///
    /// # Examples
    ///
    /// ```
    /// use multicall_sync::ContractAbi;
    ///
    /// let abi = ContractAbi::from_json(r#"[
    ///     {"type": "function", "name": "balanceOf",
    ///      "inputs": [{"name": "account", "type": "felt"}],
    ///      "outputs": [{"name": "balance", "type": "felt"}]}
    /// ]"#).unwrap();
    ///
    /// let calls = abi
    ///     .multiple_contract_single_data(
    ///         &[Some("0x1".to_string()), None],
    ///         "balanceOf",
    ///         Some(vec!["0x557b".to_string()]),
    ///     )
    ///     .unwrap();
    ///
    /// assert!(calls[0].is_some());
    /// assert!(calls[1].is_none());
    /// ```
    pub fn multiple_contract_single_data(
        &self,
        addresses: &[Option<String>],
        method: &str,
        calldata: Option<Vec<String>>,
    ) -> Result<Vec<Option<Call>>, AbiError> {
        let outputs = self.function_outputs(method)?;

        let (Some(calldata), false) = (calldata, outputs.is_empty()) else {
            return Ok(vec![None; addresses.len()]);
        };

        let schema = Arc::new(OutputSchema::resolve(
            outputs,
            &self.structs_for(outputs),
        )?);
        let selector = selector_from_name(method);

        Ok(addresses
            .iter()
            .map(|address| {
                let address = address.as_deref()?;
                Call::builder(address, selector.as_str())
                    .calldata(calldata.clone())
                    .schema(Arc::clone(&schema))
                    .build()
                    .inspect_err(|e| debug!(address, error = %e, "Skipping invalid call"))
                    .ok()
            })
            .collect())
    }
}

/// Starknet entry point selector for a function name
///
/// Keccak-256 of the name, truncated to its low 250 bits, rendered as
/// lowercase `0x` hex.
///
/// # Examples
///
/// ```
/// use multicall_sync::selector_from_name;
///
/// assert_eq!(
///     selector_from_name("balanceOf"),
///     "0x2e4263afad30923c891518314c3c95dbe830a16874e8abc5777a9a20b54c76e"
/// );
/// ```
pub fn selector_from_name(name: &str) -> String {
    let hash = keccak256(name.as_bytes());
    let mask = (U256::from(1u8) << SELECTOR_BITS) - U256::from(1u8);
    let selector = U256::from_be_bytes(hash.0) & mask;
    format!("0x{selector:x}")
}
