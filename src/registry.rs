// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Listener reference counts per call key
//!
//! A key is present exactly while its net listener count is positive. The
//! registry also keeps the first [`Call`] registered for each key, which is
//! the instance the updater fetches and decodes with.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::trace;

use crate::call::{Call, CallKey};

#[derive(Debug)]
struct Listener {
    count: usize,
    call: Call,
}

/// Reference-counted set of subscribed calls
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    listeners: HashMap<CallKey, Listener>,
}

impl ListenerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the listener count of every call
    pub fn add_listeners<'c>(&mut self, calls: impl IntoIterator<Item = &'c Call>) {
        for call in calls {
            self.listeners
                .entry(call.key().clone())
                .and_modify(|listener| listener.count += 1)
                .or_insert_with(|| Listener {
                    count: 1,
                    call: call.clone(),
                });
        }
    }

    /// Decrement the listener count of every key
    ///
    /// Keys reaching zero are removed. Unknown keys are ignored, since an
    /// unsubscribe may race a resubscribe.
    pub fn remove_listeners<'k>(&mut self, keys: impl IntoIterator<Item = &'k CallKey>) {
        for key in keys {
            let Some(listener) = self.listeners.get_mut(key) else {
                trace!(key = %key, "Ignoring removal of unknown listener");
                continue;
            };

            listener.count -= 1;
            if listener.count == 0 {
                self.listeners.remove(key);
            }
        }
    }

    /// Net listener count for `key`
    pub fn count(&self, key: &CallKey) -> usize {
        self.listeners.get(key).map_or(0, |listener| listener.count)
    }

    /// The call fetched for `key`, if it is being listened to
    pub fn call(&self, key: &CallKey) -> Option<&Call> {
        self.listeners.get(key).map(|listener| &listener.call)
    }

    /// Keys with at least one listener
    pub fn active_keys(&self) -> BTreeSet<CallKey> {
        self.listeners.keys().cloned().collect()
    }

    /// Ordered snapshot of every listened call
    pub fn snapshot(&self) -> BTreeMap<CallKey, Call> {
        self.listeners
            .iter()
            .map(|(key, listener)| (key.clone(), listener.call.clone()))
            .collect()
    }

    /// Number of listened keys
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns true if nothing is listened to
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
