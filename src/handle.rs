// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Subscriber-facing handle to a running updater

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::debug;

use crate::cache::CacheEntry;
use crate::call::{Call, CallKey};
use crate::state::{project, CallResult, CallState};
use crate::store::MulticallStore;
use crate::types::block::BlockTimestamp;
use crate::updater::Command;

/// Cheap, cloneable access to an updater's store
///
/// Subscriptions are applied by the updater task, so a state read right
/// after [`subscribe`](Self::subscribe) may still report
/// [`CallState::LOADING`].
#[derive(Debug, Clone)]
pub struct MulticallHandle {
    commands: mpsc::UnboundedSender<Command>,
    store: Arc<RwLock<MulticallStore>>,
    blocks: watch::Receiver<Option<BlockTimestamp>>,
    changes: watch::Receiver<u64>,
}

impl MulticallHandle {
    pub(crate) fn new(
        commands: mpsc::UnboundedSender<Command>,
        store: Arc<RwLock<MulticallStore>>,
        blocks: watch::Receiver<Option<BlockTimestamp>>,
        changes: watch::Receiver<u64>,
    ) -> Self {
        Self {
            commands,
            store,
            blocks,
            changes,
        }
    }

    /// Register one listener for each call
    ///
    /// A call repeated in `calls` is counted once per occurrence, and the
    /// returned [`Subscription`] releases the same number on drop.
    pub fn subscribe<'c>(&self, calls: impl IntoIterator<Item = &'c Call>) -> Subscription {
        let mut calls: Vec<Call> = calls.into_iter().cloned().collect();
        calls.sort_by(|a, b| a.key().cmp(b.key()));
        let keys: Vec<CallKey> = calls.iter().map(|call| call.key().clone()).collect();

        if !calls.is_empty() && self.commands.send(Command::AddListeners(calls)).is_err() {
            debug!("Updater stopped, subscription is inert");
        }

        Subscription {
            keys,
            commands: self.commands.clone(),
        }
    }

    /// Project the state of every call, index-aligned with `calls`
    ///
    /// `None` entries project to [`CallState::INVALID`].
    pub fn call_states(&self, calls: &[Option<Call>]) -> Vec<CallState> {
        let latest = self.latest_block_timestamp();
        let store = self.store.read();

        calls
            .iter()
            .map(|call| {
                let result = call
                    .as_ref()
                    .map(|call| CallResult::from_entry(store.entry(call.key())));
                project(result.as_ref(), latest)
            })
            .collect()
    }

    /// Project the state of a single call
    pub fn call_state(&self, call: Option<&Call>) -> CallState {
        let latest = self.latest_block_timestamp();
        let result = call.map(|call| CallResult::from_entry(self.store.read().entry(call.key())));
        project(result.as_ref(), latest)
    }

    /// Snapshot of the cache entry for `key`
    pub fn entry(&self, key: &CallKey) -> Option<CacheEntry> {
        self.store.read().entry(key).cloned()
    }

    /// Current listener count for `key`
    pub fn listener_count(&self, key: &CallKey) -> usize {
        self.store.read().registry().count(key)
    }

    /// The latest known chain position
    pub fn latest_block_timestamp(&self) -> Option<BlockTimestamp> {
        *self.blocks.borrow()
    }

    /// Revision counter bumped after every store change
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.changes.clone()
    }
}

/// Listener registration that is released on drop
#[derive(Debug)]
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    keys: Vec<CallKey>,
    commands: mpsc::UnboundedSender<Command>,
}

impl Subscription {
    /// Keys held by this subscription
    pub fn keys(&self) -> &[CallKey] {
        &self.keys
    }

    /// Release the listeners now
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if self.keys.is_empty() {
            return;
        }

        let keys = std::mem::take(&mut self.keys);
        // The updater has shut down if this fails
        let _ = self.commands.send(Command::RemoveListeners(keys));
    }
}
