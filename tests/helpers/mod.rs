// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for multicall-sync integration tests
//!
//! Provides a scripted chain client and call fixtures so the updater can be
//! exercised without a node.

#![allow(dead_code)]

use alloy_primitives::U256;
use async_trait::async_trait;
use multicall_sync::{
    Call, ChainClient, ChainClientError, MulticallHandle, OutputField, OutputSchema, StructDict,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One call as it appeared inside a flattened batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchCall {
    pub address: String,
    pub selector: String,
    pub calldata: Vec<String>,
}

/// Split flattened batch calldata back into its calls
pub fn parse_batch(flattened: &[String]) -> Vec<BatchCall> {
    let mut calls = Vec::new();
    let mut values = flattened.iter();

    while let Some(address) = values.next() {
        let selector = values.next().expect("selector").clone();
        let len: usize = values.next().expect("calldata length").parse().expect("length");
        let calldata = values.by_ref().take(len).cloned().collect();
        calls.push(BatchCall {
            address: address.clone(),
            selector,
            calldata,
        });
    }
    calls
}

type Responder = Box<dyn Fn(&[BatchCall]) -> Result<Vec<U256>, ChainClientError> + Send + Sync>;

/// Shared log of every batch a [`MockChainClient`] received
#[derive(Debug, Clone, Default)]
pub struct BatchLog {
    received: Arc<Mutex<Vec<Vec<BatchCall>>>>,
    answered: Arc<AtomicUsize>,
}

impl BatchLog {
    /// Number of batches received so far
    pub fn len(&self) -> usize {
        self.received.lock().unwrap().len()
    }

    /// Every batch received so far
    pub fn batches(&self) -> Vec<Vec<BatchCall>> {
        self.received.lock().unwrap().clone()
    }

    /// Call count of every batch received so far
    pub fn sizes(&self) -> Vec<usize> {
        self.received.lock().unwrap().iter().map(Vec::len).collect()
    }

    /// Number of batches that ran to completion instead of being dropped
    pub fn answered(&self) -> usize {
        self.answered.load(Ordering::SeqCst)
    }
}

/// Scripted ChainClient for testing the updater
///
/// The responder sees the parsed calls of each batch and returns the flat
/// response values.
///
/// # Example
///
/// ```rust,ignore
/// let client = MockChainClient::new(|calls| Ok(vec![U256::from(42u8); calls.len()]))
///     .with_delay(Duration::from_millis(500));
/// let log = client.log();
/// ```
pub struct MockChainClient {
    responder: Responder,
    delay: Option<Duration>,
    log: BatchLog,
}

impl MockChainClient {
    /// Create a client answering every batch with `responder`
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&[BatchCall]) -> Result<Vec<U256>, ChainClientError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            delay: None,
            log: BatchLog::default(),
        }
    }

    /// Answer one felt per call, equal to the call's first calldata element
    pub fn echo_first_argument() -> Self {
        Self::new(|calls| {
            Ok(calls
                .iter()
                .map(|call| {
                    call.calldata
                        .first()
                        .and_then(|arg| arg.parse::<u64>().ok())
                        .map_or(U256::ZERO, U256::from)
                })
                .collect())
        })
    }

    /// Fail every batch
    pub fn failing(reason: &'static str) -> Self {
        Self::new(move |_| Err(ChainClientError::rejected(reason)))
    }

    /// Wait `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Handle to the batch log, usable after the client moved into an updater
    pub fn log(&self) -> BatchLog {
        self.log.clone()
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    async fn execute_batch(&self, calldata: Vec<String>) -> Result<Vec<U256>, ChainClientError> {
        let calls = parse_batch(&calldata);
        self.log.received.lock().unwrap().push(calls.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.log.answered.fetch_add(1, Ordering::SeqCst);
        (self.responder)(&calls)
    }
}

/// Output schema with a single felt named `res`
pub fn felt_schema() -> OutputSchema {
    OutputSchema::resolve(&[OutputField::new("res", "felt")], &StructDict::new()).unwrap()
}

/// A `res: felt` call against `address` with a single argument
pub fn felt_call(address: &str, argument: u64) -> Call {
    Call::builder(address, "0x1")
        .calldata(vec![argument.to_string()])
        .schema(felt_schema())
        .build()
        .unwrap()
}

/// Struct dictionary with Starknet's two-felt `Uint256`
pub fn uint256_structs() -> StructDict {
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

/// Wait until `done` holds, re-checking after every store change
pub async fn wait_until<F>(handle: &MulticallHandle, mut done: F)
where
    F: FnMut(&MulticallHandle) -> bool,
{
    let mut changes = handle.changes();
    tokio::time::timeout(Duration::from_secs(60), async {
        while !done(handle) {
            if changes.changed().await.is_err() {
                break;
            }
        }
    })
    .await
    .expect("condition not reached before timeout");
}

/// Let the updater drain its queued commands
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

/// Install a test subscriber honouring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
