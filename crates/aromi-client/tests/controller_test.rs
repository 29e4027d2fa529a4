// ABOUTME: State-machine tests for the chat session controller over a scripted transport
// ABOUTME: Increment ordering, rejected submissions, error retention, cancellation, isolation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use aromi_client::{ChatController, ChatStatus, ChatTransport, ClientResult, EventStream};
use aromi_core::{
    CancellationToken, ChatStreamRequest, Role, StreamEvent, UserContext, UserProfile,
};
use async_trait::async_trait;
use futures_util::StreamExt;

// ============================================================================
// Scripted transport
// ============================================================================

#[derive(Default)]
struct Script {
    turns: Mutex<VecDeque<Vec<ClientResult<StreamEvent>>>>,
    requests: Mutex<Vec<ChatStreamRequest>>,
}

/// Transport replaying scripted turns and recording every request
#[derive(Clone, Default)]
struct MockTransport {
    script: Arc<Script>,
}

impl MockTransport {
    fn push_turn(&self, events: Vec<ClientResult<StreamEvent>>) {
        self.script.turns.lock().unwrap().push_back(events);
    }

    fn requests(&self) -> Vec<ChatStreamRequest> {
        self.script.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn send_messages(
        &self,
        request: &ChatStreamRequest,
        _cancel: &CancellationToken,
    ) -> ClientResult<EventStream> {
        self.script.requests.lock().unwrap().push(request.clone());
        let events = self
            .script
            .turns
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default();
        Ok(Box::pin(futures_util::stream::iter(events)))
    }
}

fn text_turn(deltas: &[&str]) -> Vec<ClientResult<StreamEvent>> {
    let mut events = vec![
        Ok(StreamEvent::Start {
            message_id: "msg_srv".to_owned(),
        }),
        Ok(StreamEvent::TextStart {
            id: "txt_srv".to_owned(),
        }),
    ];
    for delta in deltas {
        events.push(Ok(StreamEvent::TextDelta {
            id: "txt_srv".to_owned(),
            delta: (*delta).to_owned(),
        }));
    }
    events.push(Ok(StreamEvent::TextEnd {
        id: "txt_srv".to_owned(),
    }));
    events.push(Ok(StreamEvent::Finish));
    events
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn increments_assemble_in_order_and_renders_are_prefixes() {
    let transport = MockTransport::default();
    transport.push_turn(text_turn(&["Hel", "lo", " world"]));
    let mut controller = ChatController::new(transport, None);

    controller.set_draft("hi coach");
    let mut events = controller.submit().await.unwrap().unwrap();
    assert_eq!(controller.status(), ChatStatus::Submitted);
    assert_eq!(controller.draft(), "");

    let mut last_render = String::new();
    while let Some(event) = events.next().await {
        controller.apply(&event.unwrap());
        let render = controller.messages().last().unwrap().text();
        // Every intermediate render extends the previous one
        assert!(render.starts_with(&last_render));
        assert!("Hello world".starts_with(&render));
        last_render = render;
    }

    assert_eq!(controller.status(), ChatStatus::Idle);
    assert_eq!(controller.messages().len(), 2);
    assert_eq!(controller.messages()[0].role, Role::User);
    assert_eq!(controller.messages()[0].text(), "hi coach");
    assert_eq!(controller.messages()[1].role, Role::Assistant);
    assert_eq!(controller.messages()[1].text(), "Hello world");
}

#[tokio::test]
async fn blank_submissions_are_rejected_without_state_or_network() {
    let transport = MockTransport::default();
    let mut controller = ChatController::new(transport.clone(), None);

    assert!(controller.submit().await.unwrap().is_none());
    controller.set_draft("   \n\t ");
    assert!(controller.submit().await.unwrap().is_none());

    assert_eq!(controller.status(), ChatStatus::Idle);
    assert!(controller.messages().is_empty());
    assert!(transport.requests().is_empty());
    // A rejected submission leaves the draft alone
    assert_eq!(controller.draft(), "   \n\t ");
}

#[tokio::test]
async fn submissions_while_streaming_are_rejected() {
    let transport = MockTransport::default();
    transport.push_turn(text_turn(&["working"]));
    let mut controller = ChatController::new(transport.clone(), None);

    controller.set_draft("first");
    let mut events = controller.submit().await.unwrap().unwrap();

    // Enter streaming, then attempt a concurrent send from the same surface
    controller.apply(&events.next().await.unwrap().unwrap());
    assert_eq!(controller.status(), ChatStatus::Streaming);

    controller.set_draft("second");
    assert!(controller.submit().await.unwrap().is_none());
    assert!(controller.submit_with("also second").await.unwrap().is_none());

    assert_eq!(controller.status(), ChatStatus::Streaming);
    assert_eq!(transport.requests().len(), 1);
    assert_eq!(controller.draft(), "second");
    // History holds only the first user turn and the pending assistant
    assert_eq!(controller.messages().len(), 2);
}

#[tokio::test]
async fn midstream_error_preserves_partial_content_and_allows_retry() {
    let transport = MockTransport::default();
    transport.push_turn(vec![
        Ok(StreamEvent::Start {
            message_id: "msg_srv".to_owned(),
        }),
        Ok(StreamEvent::TextStart {
            id: "txt_srv".to_owned(),
        }),
        Ok(StreamEvent::TextDelta {
            id: "txt_srv".to_owned(),
            delta: "Partial answer".to_owned(),
        }),
        Ok(StreamEvent::Error {
            error_text: "model unavailable".to_owned(),
        }),
    ]);
    let mut controller = ChatController::new(transport.clone(), None);

    controller.set_draft("hello?");
    let events = controller.submit().await.unwrap().unwrap();
    controller.drive(events).await.unwrap();

    assert_eq!(controller.status(), ChatStatus::Error);
    assert_eq!(controller.last_error(), Some("model unavailable"));
    // Already-streamed text stays visible
    assert_eq!(controller.messages().last().unwrap().text(), "Partial answer");

    // error → submitted on the next send
    transport.push_turn(text_turn(&["Recovered"]));
    controller.set_draft("try again");
    let events = controller.submit().await.unwrap().unwrap();
    controller.drive(events).await.unwrap();
    assert_eq!(controller.status(), ChatStatus::Idle);
    assert_eq!(controller.messages().last().unwrap().text(), "Recovered");
}

#[tokio::test]
async fn cancellation_returns_to_idle_and_is_idempotent() {
    let transport = MockTransport::default();
    transport.push_turn(text_turn(&["half a rep"]));
    let mut controller = ChatController::new(transport, None);

    controller.set_draft("go");
    let mut events = controller.submit().await.unwrap().unwrap();
    controller.apply(&events.next().await.unwrap().unwrap());
    controller.apply(&events.next().await.unwrap().unwrap());
    assert_eq!(controller.status(), ChatStatus::Streaming);

    controller.cancel();
    assert_eq!(controller.status(), ChatStatus::Idle);

    // Cancelling an already-settled session is a no-op
    controller.cancel();
    assert_eq!(controller.status(), ChatStatus::Idle);
    assert_eq!(controller.messages().len(), 2);
}

#[tokio::test]
async fn stream_ending_without_finish_settles_idle_with_partial_kept() {
    let transport = MockTransport::default();
    transport.push_turn(vec![
        Ok(StreamEvent::Start {
            message_id: "msg_srv".to_owned(),
        }),
        Ok(StreamEvent::TextDelta {
            id: "txt_srv".to_owned(),
            delta: "cut off".to_owned(),
        }),
    ]);
    let mut controller = ChatController::new(transport, None);

    controller.set_draft("stream this");
    let events = controller.submit().await.unwrap().unwrap();
    controller.drive(events).await.unwrap();

    assert_eq!(controller.status(), ChatStatus::Idle);
    assert_eq!(controller.messages().last().unwrap().text(), "cut off");
}

#[tokio::test]
async fn each_turn_resends_full_history_and_context_snapshot() {
    let context = UserContext {
        profile: Some(UserProfile {
            full_name: Some("Priya Sharma".to_owned()),
            ..UserProfile::default()
        }),
        assessment: None,
    };
    let transport = MockTransport::default();
    transport.push_turn(text_turn(&["One"]));
    transport.push_turn(text_turn(&["Two"]));
    let mut controller = ChatController::new(transport.clone(), Some(context.clone()));

    let events = controller.submit_with("first question").await.unwrap().unwrap();
    controller.drive(events).await.unwrap();
    let events = controller.submit_with("second question").await.unwrap().unwrap();
    controller.drive(events).await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].messages.len(), 1);
    assert_eq!(requests[1].messages.len(), 3);
    assert_eq!(requests[1].messages[0].text(), "first question");
    assert_eq!(requests[1].messages[1].text(), "One");
    assert_eq!(requests[1].messages[2].text(), "second question");
    // The same snapshot and correlation id accompany every turn
    assert_eq!(requests[0].context.as_ref(), Some(&context));
    assert_eq!(requests[1].context.as_ref(), Some(&context));
    assert_eq!(requests[0].id, requests[1].id);
}

#[tokio::test]
async fn two_controllers_never_leak_into_each_other() {
    let context = UserContext::default();
    let transport_a = MockTransport::default();
    let transport_b = MockTransport::default();
    transport_a.push_turn(text_turn(&["Answer A"]));
    transport_b.push_turn(text_turn(&["Answer B"]));

    let mut first = ChatController::new(transport_a.clone(), Some(context.clone()));
    let mut second = ChatController::new(transport_b.clone(), Some(context));

    let events = first.submit_with("A").await.unwrap().unwrap();
    first.drive(events).await.unwrap();
    let events = second.submit_with("B").await.unwrap().unwrap();
    second.drive(events).await.unwrap();

    let first_texts: Vec<String> = first.messages().iter().map(aromi_core::UiMessage::text).collect();
    let second_texts: Vec<String> = second.messages().iter().map(aromi_core::UiMessage::text).collect();
    assert_eq!(first_texts, vec!["A".to_owned(), "Answer A".to_owned()]);
    assert_eq!(second_texts, vec!["B".to_owned(), "Answer B".to_owned()]);

    // Each request carried only its own controller's history
    assert_eq!(transport_a.requests().len(), 1);
    assert_eq!(transport_b.requests().len(), 1);
    assert_eq!(transport_a.requests()[0].messages.len(), 1);
    assert_eq!(transport_b.requests()[0].messages.len(), 1);
    assert_ne!(transport_a.requests()[0].id, transport_b.requests()[0].id);
}
