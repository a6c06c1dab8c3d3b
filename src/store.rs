// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Owned store shared between the updater and its handles
//!
//! The updater task is the only writer. Handles take read locks for
//! projection and snapshots.

use crate::cache::{CacheEntry, ResultCache};
use crate::call::CallKey;
use crate::registry::ListenerRegistry;

/// Listener registry plus result cache
#[derive(Debug, Default)]
pub struct MulticallStore {
    registry: ListenerRegistry,
    cache: ResultCache,
}

impl MulticallStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Listener registry
    pub fn registry(&self) -> &ListenerRegistry {
        &self.registry
    }

    /// Mutable listener registry
    pub fn registry_mut(&mut self) -> &mut ListenerRegistry {
        &mut self.registry
    }

    /// Result cache
    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Mutable result cache
    pub fn cache_mut(&mut self) -> &mut ResultCache {
        &mut self.cache
    }

    /// Cache entry for `key`, if any fetch has touched it
    pub fn entry(&self, key: &CallKey) -> Option<&CacheEntry> {
        self.cache.get(key)
    }
}
