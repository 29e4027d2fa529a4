// ABOUTME: Cancellable stream orchestrator between completion backends and the HTTP boundary
// ABOUTME: Forwards model deltas as increments over mpsc, terminated by Done or Error markers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

//! Stream orchestration
//!
//! The orchestrator is a cooperative producer: it consumes a backend's delta
//! stream on a spawned task and forwards discrete increments through a
//! bounded channel. The caller supplies the complete ordered history per
//! request; nothing is retained between requests, so independent requests
//! never share state.

use std::sync::Arc;

use aromi_core::CancellationToken;
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tracing::debug;

use crate::llm::{ChatMessage, CompletionBackend, CompletionRequest};

/// Bounded channel depth between producer task and response writer
const INCREMENT_BUFFER: usize = 32;

/// One unit of orchestrator output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Increment {
    /// Text extending the in-progress assistant message
    Text(String),
    /// End of stream; the increments received so far form the full message
    Done,
    /// Terminal failure with a human-readable message
    Error(String),
}

/// Drives one completion per call through a cancellable increment channel
pub struct StreamOrchestrator {
    backend: Arc<dyn CompletionBackend>,
}

impl StreamOrchestrator {
    /// Create an orchestrator over the given backend
    #[must_use]
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    /// Start a completion and return the receiving end of its increments
    ///
    /// The system prompt is placed first, followed by the supplied history in
    /// its exact order. Once `cancel` fires, no further increments are sent
    /// and the upstream connection is released; a cancelled stream simply
    /// ends without a [`Increment::Done`] marker.
    #[must_use]
    pub fn stream(
        &self,
        system_prompt: String,
        history: Vec<ChatMessage>,
        cancel: CancellationToken,
    ) -> mpsc::Receiver<Increment> {
        let (tx, rx) = mpsc::channel(INCREMENT_BUFFER);
        let backend = Arc::clone(&self.backend);
        tokio::spawn(run_completion(backend, system_prompt, history, cancel, tx));
        rx
    }
}

async fn run_completion(
    backend: Arc<dyn CompletionBackend>,
    system_prompt: String,
    history: Vec<ChatMessage>,
    cancel: CancellationToken,
    tx: mpsc::Sender<Increment>,
) {
    if cancel.is_cancelled() {
        return;
    }

    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(ChatMessage::system(system_prompt));
    messages.extend(history);

    let mut deltas = match backend.stream_completion(CompletionRequest::new(messages)).await {
        Ok(stream) => stream,
        Err(e) => {
            let _ = tx.send(Increment::Error(e.to_string())).await;
            return;
        }
    };

    loop {
        tokio::select! {
            () = cancel.cancelled() => {
                debug!("completion cancelled, releasing upstream stream");
                return;
            }
            next = deltas.next() => match next {
                Some(Ok(text)) => {
                    if cancel.is_cancelled() {
                        return;
                    }
                    if tx.send(Increment::Text(text)).await.is_err() {
                        return;
                    }
                }
                Some(Err(e)) => {
                    let _ = tx.send(Increment::Error(e.to_string())).await;
                    return;
                }
                None => {
                    let _ = tx.send(Increment::Done).await;
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use std::time::Duration;

    use super::*;
    use crate::llm::MessageRole;
    use crate::test_utils::ScriptedBackend;

    #[tokio::test]
    async fn forwards_increments_in_order_then_done() {
        let backend = Arc::new(ScriptedBackend::with_chunks(["Hel", "lo", " world"]));
        let orchestrator = StreamOrchestrator::new(backend);

        let mut rx = orchestrator.stream(
            "prompt".to_owned(),
            vec![ChatMessage::user("hi")],
            CancellationToken::new(),
        );

        let mut received = Vec::new();
        while let Some(increment) = rx.recv().await {
            received.push(increment);
        }
        assert_eq!(
            received,
            vec![
                Increment::Text("Hel".to_owned()),
                Increment::Text("lo".to_owned()),
                Increment::Text(" world".to_owned()),
                Increment::Done,
            ]
        );
    }

    #[tokio::test]
    async fn history_reaches_backend_complete_and_in_order() {
        let backend = Arc::new(ScriptedBackend::with_chunks(["ok"]));
        let orchestrator = StreamOrchestrator::new(Arc::<ScriptedBackend>::clone(&backend));

        let history = vec![
            ChatMessage::user("first"),
            ChatMessage::assistant("second"),
            ChatMessage::user("third"),
        ];
        let mut rx = orchestrator.stream(
            "system text".to_owned(),
            history.clone(),
            CancellationToken::new(),
        );
        while rx.recv().await.is_some() {}

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        let messages = &requests[0].messages;
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[0].content, "system text");
        assert_eq!(&messages[1..], history.as_slice());
    }

    #[tokio::test]
    async fn upstream_failure_surfaces_as_single_error_marker() {
        let backend = Arc::new(ScriptedBackend::failing_after(
            ["Partial answer"],
            "model unavailable",
        ));
        let orchestrator = StreamOrchestrator::new(backend);

        let mut rx = orchestrator.stream("prompt".to_owned(), Vec::new(), CancellationToken::new());

        assert_eq!(
            rx.recv().await,
            Some(Increment::Text("Partial answer".to_owned()))
        );
        match rx.recv().await {
            Some(Increment::Error(message)) => assert!(message.contains("model unavailable")),
            other => panic!("expected error marker, got {other:?}"),
        }
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn cancellation_stops_increments_without_done() {
        let backend = Arc::new(
            ScriptedBackend::with_chunks(vec!["a"; 100])
                .with_chunk_delay(Duration::from_millis(5)),
        );
        let orchestrator = StreamOrchestrator::new(backend);
        let cancel = CancellationToken::new();

        let mut rx = orchestrator.stream("prompt".to_owned(), Vec::new(), cancel.clone());

        assert_eq!(rx.recv().await, Some(Increment::Text("a".to_owned())));
        cancel.cancel();

        // At most one already-buffered increment may still arrive; the stream
        // must then end without a Done marker.
        let mut trailing = 0;
        while let Some(increment) = rx.recv().await {
            assert!(matches!(increment, Increment::Text(_)));
            trailing += 1;
        }
        assert!(trailing <= 1, "stream kept producing after cancellation");
    }

    #[tokio::test]
    async fn cancelling_a_completed_stream_is_a_noop() {
        let backend = Arc::new(ScriptedBackend::with_chunks(["done"]));
        let orchestrator = StreamOrchestrator::new(backend);
        let cancel = CancellationToken::new();

        let mut rx = orchestrator.stream("prompt".to_owned(), Vec::new(), cancel.clone());
        let mut received = Vec::new();
        while let Some(increment) = rx.recv().await {
            received.push(increment);
        }
        assert_eq!(received.last(), Some(&Increment::Done));

        cancel.cancel();
        cancel.cancel();
        assert!(cancel.is_cancelled());
    }
}
