// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The updater task
//!
//! A single spawned task owns every write to the [`MulticallStore`]. It
//! reacts to four event sources:
//!
//! - listener commands from handles and subscriptions, which restart the
//!   debounce timer
//! - expiry of the debounce timer, which settles the listened set and
//!   evaluates it
//! - a new chain position, which evaluates the settled set immediately
//! - settled chunks, whose results or errors are written to the cache
//!
//! The task exits once every handle and subscription has been dropped,
//! cancelling whatever is still in flight.

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn, Instrument};

use crate::call::{Call, CallKey};
use crate::chunk::chunk_calls;
use crate::client::ChainClient;
use crate::config::MulticallConfig;
use crate::handle::MulticallHandle;
use crate::staleness::outdated_keys;
use crate::store::MulticallStore;
use crate::tracing::spans;
use crate::types::block::BlockTimestamp;

pub(crate) mod cancellation;
pub(crate) mod executor;
pub(crate) mod scheduler;

use cancellation::CancellationManager;
use executor::{spawn_chunk, ChunkSettled};
use scheduler::{Scheduler, Trigger};

/// Listener changes sent from handles to the updater
#[derive(Debug)]
pub(crate) enum Command {
    AddListeners(Vec<Call>),
    RemoveListeners(Vec<CallKey>),
}

/// Background task keeping subscribed calls fresh
///
/// # Examples
///
/// ```no_run
/// use alloy_primitives::U256;
/// use async_trait::async_trait;
/// use multicall_sync::{BlockTimestamp, ChainClient, ChainClientError, MulticallConfig, Updater};
/// use tokio::sync::watch;
///
/// struct Node;
///
/// #[async_trait]
/// impl ChainClient for Node {
///     async fn execute_batch(&self, _calldata: Vec<String>) -> Result<Vec<U256>, ChainClientError> {
///         Ok(Vec::new())
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (block_tx, block_rx) = watch::channel(None);
/// let (handle, task) = Updater::spawn(Node, MulticallConfig::default(), block_rx);
///
/// block_tx.send_replace(Some(BlockTimestamp::new(1_700_000_000)));
///
/// drop(handle);
/// task.await.unwrap();
/// # }
/// ```
pub struct Updater {
    client: Arc<dyn ChainClient>,
    config: MulticallConfig,
    store: Arc<RwLock<MulticallStore>>,
    commands: mpsc::UnboundedReceiver<Command>,
    settled_tx: mpsc::UnboundedSender<ChunkSettled>,
    settled_rx: mpsc::UnboundedReceiver<ChunkSettled>,
    blocks: watch::Receiver<Option<BlockTimestamp>>,
    changes: watch::Sender<u64>,
    scheduler: Scheduler,
    cancellations: CancellationManager,
}

impl Updater {
    /// Spawn the updater on the current tokio runtime
    ///
    /// `blocks` is the chain position source; `None` suspends all fetching.
    /// The returned handle is the only way to subscribe and read state.
    pub fn spawn<C>(
        client: C,
        config: MulticallConfig,
        blocks: watch::Receiver<Option<BlockTimestamp>>,
    ) -> (MulticallHandle, JoinHandle<()>)
    where
        C: ChainClient + 'static,
    {
        let store = Arc::new(RwLock::new(MulticallStore::new()));
        let (command_tx, commands) = mpsc::unbounded_channel();
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();
        let (changes, changes_rx) = watch::channel(0);

        let handle =
            MulticallHandle::new(command_tx, Arc::clone(&store), blocks.clone(), changes_rx);
        let span = spans::updater(
            config.max_calls_per_chunk.as_usize(),
            config.debounce.as_millis(),
        );

        let updater = Self {
            client: Arc::new(client),
            scheduler: Scheduler::new(config.debounce),
            config,
            store,
            commands,
            settled_tx,
            settled_rx,
            blocks,
            changes,
            cancellations: CancellationManager::new(),
        };

        let task = tokio::spawn(updater.run().instrument(span));
        (handle, task)
    }

    async fn run(mut self) {
        info!("Multicall updater started");
        let mut blocks_open = true;

        loop {
            let deadline = self.scheduler.deadline();

            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.apply(command),
                    None => break,
                },
                Some(settled) = self.settled_rx.recv() => self.settle(settled),
                changed = self.blocks.changed(), if blocks_open => match changed {
                    Ok(()) => {
                        let trigger = self.scheduler.begin_new_block();
                        self.evaluate(trigger);
                    }
                    Err(_) => {
                        debug!("Chain position source closed");
                        blocks_open = false;
                    }
                },
                () = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    let store = &self.store;
                    let trigger = self
                        .scheduler
                        .begin_settled(Instant::now(), || store.read().registry().snapshot());
                    if let Some(trigger) = trigger {
                        self.evaluate(trigger);
                    }
                }
            }
        }

        let cancelled = self.cancellations.cancel_all();
        info!(cancelled, "Multicall updater stopped");
    }

    fn apply(&mut self, command: Command) {
        {
            let mut store = self.store.write();
            match &command {
                Command::AddListeners(calls) => store.registry_mut().add_listeners(calls),
                Command::RemoveListeners(keys) => store.registry_mut().remove_listeners(keys),
            }
        }

        self.scheduler.listeners_changed(Instant::now());
        self.notify();
    }

    fn evaluate(&mut self, trigger: Trigger) {
        let latest = *self.blocks.borrow();
        match latest {
            Some(latest) => self.issue(trigger, latest),
            None => debug!(
                trigger = trigger.as_str(),
                "No chain position yet, skipping evaluation"
            ),
        }
        self.scheduler.finish();
    }

    fn issue(&mut self, trigger: Trigger, latest: BlockTimestamp) {
        let settled = self.scheduler.settled();
        let span = spans::evaluate(trigger.as_str(), latest, settled.len());
        let _guard = span.enter();

        // Any change of position abandons the previous cohort
        let superseded = self.cancellations.supersede(latest);

        let outdated: Vec<Call> = {
            let store = self.store.read();
            outdated_keys(settled.keys(), store.cache(), Some(latest))
                .into_iter()
                .filter_map(|key| settled.get(&key).cloned())
                .collect()
        };

        if outdated.is_empty() {
            debug!(superseded, "No outdated calls");
            return;
        }

        self.store
            .write()
            .cache_mut()
            .mark_fetching(outdated.iter().map(Call::key), latest);
        self.notify();

        let calls = outdated.len();
        let chunks = chunk_calls(outdated, self.config.max_calls_per_chunk);
        debug!(calls, chunks = chunks.len(), superseded, "Issuing chunk requests");

        for chunk in chunks {
            let (id, token) = self.cancellations.register(latest);
            spawn_chunk(
                Arc::clone(&self.client),
                id,
                chunk,
                latest,
                token,
                self.settled_tx.clone(),
            );
        }
    }

    fn settle(&mut self, settled: ChunkSettled) {
        self.cancellations.complete(settled.id);

        let ChunkSettled {
            block_timestamp,
            calls,
            outcome,
            ..
        } = settled;

        {
            let mut store = self.store.write();
            let cache = store.cache_mut();

            match outcome {
                Ok(results) => {
                    let mut applied = 0;
                    for (call, data) in calls.iter().zip(results) {
                        if cache.record_success(call.key(), Arc::new(data), block_timestamp) {
                            applied += 1;
                        }
                    }
                    debug!(
                        %block_timestamp,
                        calls = calls.len(),
                        applied,
                        in_flight = self.cancellations.in_flight(),
                        "Chunk settled"
                    );
                }
                Err(error) => {
                    if error.is_cancelled() {
                        debug!(%block_timestamp, calls = calls.len(), "Chunk cancelled");
                    } else {
                        warn!(
                            %block_timestamp,
                            calls = calls.len(),
                            error = %error,
                            "Chunk fetch failed"
                        );
                    }
                    for call in &calls {
                        cache.record_error(call.key(), block_timestamp);
                    }
                }
            }
        }

        self.notify();
    }

    fn notify(&self) {
        self.changes
            .send_modify(|revision| *revision = revision.wrapping_add(1));
    }
}

impl std::fmt::Debug for Updater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Updater")
            .field("config", &self.config)
            .field("scheduler", &self.scheduler)
            .field("cancellations", &self.cancellations)
            .finish_non_exhaustive()
    }
}
