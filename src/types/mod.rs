// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for type safety across multicall-sync.
//!
//! This module provides newtype wrappers for:
//! - Chain positions (block timestamps)
//! - Configuration values (chunk ceilings)

pub mod block;
pub mod config;

// Note: Public types are re-exported from lib.rs, not here
