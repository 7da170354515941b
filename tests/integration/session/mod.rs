//! Client state machine driven against a live relay

use std::time::Duration;

use relaychat_client::session::{DEFAULT_ERROR_TEXT, DEFAULT_GREETING};
use relaychat_client::{
    ClientConfig, ConversationState, HttpRelayClient, Message, RelayTransport, SubmitOutcome,
};
use relaychat_common::ChatRequest;
use relaychat_llm::MockLlmService;
use tokio_test::{assert_err, assert_ok};

use crate::common::TestRelay;

#[tokio::test]
async fn test_round_trip_transcript() {
    let relay = TestRelay::start(MockLlmService::replying("hi there"))
        .await
        .unwrap();
    let mut client = relay.chat_client().unwrap();

    let outcome = client.send("hello").await;

    assert_eq!(outcome, SubmitOutcome::Dispatched(ChatRequest::new("hello")));
    assert_eq!(
        client.state().transcript().as_slice(),
        &[
            Message::assistant(DEFAULT_GREETING),
            Message::user("hello"),
            Message::assistant("hi there"),
        ]
    );
    assert!(!client.state().is_pending());
}

#[tokio::test]
async fn test_provider_failure_becomes_error_entry() {
    let relay = TestRelay::start(MockLlmService::failing("provider down"))
        .await
        .unwrap();
    let mut client = relay.chat_client().unwrap();

    client.send("hello").await;

    assert_eq!(
        client.state().transcript().as_slice(),
        &[
            Message::assistant(DEFAULT_GREETING),
            Message::user("hello"),
            Message::failure(DEFAULT_ERROR_TEXT),
        ]
    );
    assert!(!client.state().is_pending());
}

#[tokio::test]
async fn test_client_timeout_becomes_error_entry() {
    let llm = MockLlmService::replying("too late").with_delay(Duration::from_secs(3));
    let relay = TestRelay::start(llm).await.unwrap();
    let transport = relay.transport(Duration::from_millis(200)).unwrap();

    let mut state = ConversationState::default();
    let SubmitOutcome::Dispatched(request) = state.submit("hello") else {
        panic!("submission should be dispatched");
    };
    let result = transport.send(&request).await;
    assert_err!(&result);
    assert_ok!(state.resolve(result));

    let last = state.transcript().last().unwrap();
    assert!(last.error);
    assert!(!state.is_pending());
}

#[tokio::test]
async fn test_relay_unreachable_becomes_error_entry() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let transport = HttpRelayClient::new(ClientConfig {
        relay_url: format!("http://{}", addr),
        timeout: Duration::from_secs(2),
    })
    .unwrap();
    let mut client = relaychat_client::ChatClient::new(transport, Default::default());

    client.send("hello").await;

    assert_eq!(client.state().transcript().len(), 3);
    assert_eq!(
        client.state().transcript().last().unwrap(),
        &Message::failure(DEFAULT_ERROR_TEXT)
    );
}

#[tokio::test]
async fn test_second_submission_while_pending_sends_nothing() {
    let llm = MockLlmService::replying("only once").with_delay(Duration::from_millis(100));
    let relay = TestRelay::start(llm).await.unwrap();
    let transport = relay.transport(Duration::from_secs(5)).unwrap();

    let mut state = ConversationState::default();
    let SubmitOutcome::Dispatched(request) = state.submit("first") else {
        panic!("submission should be dispatched");
    };
    let in_flight = tokio::spawn(async move { transport.send(&request).await });

    assert_eq!(state.submit("second"), SubmitOutcome::Rejected);
    assert_eq!(state.transcript().len(), 2);

    let result = in_flight.await.unwrap();
    assert_ok!(state.resolve(result));

    assert_eq!(state.transcript().len(), 3);
    assert_eq!(relay.llm.recorded_requests().len(), 1);
    assert_eq!(state.transcript().last().unwrap().text, "only once");
}

#[tokio::test]
async fn test_blank_submission_never_reaches_relay() {
    let relay = TestRelay::start(MockLlmService::new()).await.unwrap();
    let mut client = relay.chat_client().unwrap();

    assert_eq!(client.send("   ").await, SubmitOutcome::Ignored);
    assert_eq!(client.state().transcript().len(), 1);
    assert!(relay.llm.recorded_requests().is_empty());
}
