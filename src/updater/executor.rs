// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Batched chunk execution
//!
//! Each chunk runs as its own task. The outcome is sent back to the updater
//! as a [`ChunkSettled`] message; the task never touches the store.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, Instrument};

use super::cancellation::ChunkId;
use crate::call::Call;
use crate::client::ChainClient;
use crate::decode::{decode_chunk, ResultData};
use crate::errors::FetchError;
use crate::tracing::spans;
use crate::types::block::BlockTimestamp;

/// Outcome of one chunk
#[derive(Debug)]
pub(crate) struct ChunkSettled {
    pub(crate) id: ChunkId,
    pub(crate) block_timestamp: BlockTimestamp,
    pub(crate) calls: Vec<Call>,
    pub(crate) outcome: Result<Vec<ResultData>, FetchError>,
}

/// Concatenate `address, selector, calldata length, calldata...` per call
pub(crate) fn flatten_calls(calls: &[Call]) -> Vec<String> {
    let mut flattened = Vec::with_capacity(calls.iter().map(|c| 3 + c.calldata().len()).sum());
    for call in calls {
        flattened.push(call.address().to_string());
        flattened.push(call.selector().to_string());
        flattened.push(call.calldata().len().to_string());
        flattened.extend(call.calldata().iter().cloned());
    }
    flattened
}

/// Execute and decode one chunk, abandoning it if `token` is cancelled
pub(crate) async fn fetch_chunk(
    client: &dyn ChainClient,
    calls: &[Call],
    block_timestamp: BlockTimestamp,
    token: &CancellationToken,
) -> Result<Vec<ResultData>, FetchError> {
    let calldata = flatten_calls(calls);

    let values = tokio::select! {
        biased;
        () = token.cancelled() => return Err(FetchError::cancelled(block_timestamp)),
        response = client.execute_batch(calldata) => response?,
    };

    debug!(values = values.len(), "Chunk response received");
    Ok(decode_chunk(calls.iter().map(Call::schema), &values)?)
}

/// Spawn a task that fetches `calls` and reports back on `settled`
pub(crate) fn spawn_chunk(
    client: Arc<dyn ChainClient>,
    id: ChunkId,
    calls: Vec<Call>,
    block_timestamp: BlockTimestamp,
    token: CancellationToken,
    settled: mpsc::UnboundedSender<ChunkSettled>,
) {
    let span = spans::fetch_chunk(id, block_timestamp, calls.len());

    tokio::spawn(
        async move {
            let outcome = fetch_chunk(client.as_ref(), &calls, block_timestamp, &token).await;

            // The updater has shut down if this fails
            let _ = settled.send(ChunkSettled {
                id,
                block_timestamp,
                calls,
                outcome,
            });
        }
        .instrument(span),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::{OutputField, OutputSchema, StructDict};
    use crate::errors::ChainClientError;
    use alloy_primitives::U256;
    use async_trait::async_trait;
    use std::time::Duration;

    struct Echo(Vec<U256>);

    #[async_trait]
    impl ChainClient for Echo {
        async fn execute_batch(
            &self,
            _calldata: Vec<String>,
        ) -> Result<Vec<U256>, ChainClientError> {
            Ok(self.0.clone())
        }
    }

    struct Hang;

    #[async_trait]
    impl ChainClient for Hang {
        async fn execute_batch(
            &self,
            _calldata: Vec<String>,
        ) -> Result<Vec<U256>, ChainClientError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }
    }

    fn call(address: &str, calldata: &[&str]) -> Call {
        let schema =
            OutputSchema::resolve(&[OutputField::new("res", "felt")], &StructDict::new()).unwrap();
        Call::builder(address, "0x1")
            .calldata(calldata.iter().map(|s| s.to_string()).collect())
            .schema(schema)
            .build()
            .unwrap()
    }

    #[test]
    fn test_flatten_calls() {
        let calls = vec![call("0xa", &["1", "2"]), call("0xb", &[])];
        assert_eq!(
            flatten_calls(&calls),
            vec!["0xa", "0x1", "2", "1", "2", "0xb", "0x1", "0"]
        );
    }

    #[tokio::test]
    async fn test_fetch_chunk_decodes_in_order() {
        let calls = vec![call("0xa", &[]), call("0xb", &[])];
        let client = Echo(vec![U256::from(7u8), U256::from(9u8)]);
        let token = CancellationToken::new();

        let results = fetch_chunk(&client, &calls, BlockTimestamp::new(1), &token)
            .await
            .unwrap();
        assert_eq!(results[0]["res"].as_felt(), Some("7"));
        assert_eq!(results[1]["res"].as_felt(), Some("9"));
    }

    #[tokio::test]
    async fn test_fetch_chunk_fails_closed_on_short_response() {
        let calls = vec![call("0xa", &[]), call("0xb", &[])];
        let client = Echo(vec![U256::from(7u8)]);
        let token = CancellationToken::new();

        let result = fetch_chunk(&client, &calls, BlockTimestamp::new(1), &token).await;
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_chunk_observes_cancellation() {
        let calls = vec![call("0xa", &[])];
        let token = CancellationToken::new();
        token.cancel();

        let result = fetch_chunk(&Hang, &calls, BlockTimestamp::new(1), &token).await;
        assert!(result.unwrap_err().is_cancelled());
    }
}
