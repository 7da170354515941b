//! Async driver pairing a conversation with a relay transport

use crate::session::{ConversationState, SessionOptions, SubmitOutcome};
use crate::transport::RelayTransport;

/// Runs full chat turns: submit, send, resolve.
///
/// `send` holds `&mut self` across the network call, so a second turn can
/// only start after the first has resolved.
pub struct ChatClient<T> {
    state: ConversationState,
    transport: T,
}

impl<T: RelayTransport> ChatClient<T> {
    pub fn new(transport: T, options: SessionOptions) -> Self {
        Self {
            state: ConversationState::new(options),
            transport,
        }
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Submit `text` and, if it was dispatched, wait for the relay's answer.
    pub async fn send(&mut self, text: &str) -> SubmitOutcome {
        let outcome = self.state.submit(text);

        if let SubmitOutcome::Dispatched(request) = &outcome {
            let result = self.transport.send(request).await;
            if let Err(e) = self.state.resolve(result) {
                tracing::error!(error = %e, "Failed to record relay outcome");
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Message;
    use crate::session::{DEFAULT_ERROR_TEXT, DEFAULT_GREETING};
    use crate::transport::TransportError;
    use relaychat_common::{ChatReply, ChatRequest};
    use std::sync::Mutex;

    /// Transport stub that answers from a fixed outcome and counts calls
    struct StubTransport {
        outcome: Result<ChatReply, TransportError>,
        sent: Mutex<Vec<ChatRequest>>,
    }

    impl StubTransport {
        fn replying(reply: &str) -> Self {
            Self {
                outcome: Ok(ChatReply {
                    reply: reply.to_string(),
                }),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: TransportError) -> Self {
            Self {
                outcome: Err(err),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<ChatRequest> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl RelayTransport for StubTransport {
        async fn send(&self, request: &ChatRequest) -> Result<ChatReply, TransportError> {
            self.sent.lock().unwrap().push(request.clone());
            self.outcome.clone()
        }
    }

    #[tokio::test]
    async fn test_send_round_trip() {
        let mut client = ChatClient::new(
            StubTransport::replying("hi there"),
            SessionOptions::default(),
        );

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
    async fn test_send_failure_records_error_entry() {
        let mut client = ChatClient::new(
            StubTransport::failing(TransportError::Timeout),
            SessionOptions::default(),
        );

        client.send("hello").await;

        let last = client.state().transcript().last().unwrap();
        assert_eq!(last, &Message::failure(DEFAULT_ERROR_TEXT));
        assert!(!client.state().is_pending());
    }

    #[tokio::test]
    async fn test_blank_send_never_reaches_transport() {
        let mut client = ChatClient::new(StubTransport::replying("x"), SessionOptions::default());

        assert_eq!(client.send("   ").await, SubmitOutcome::Ignored);
        assert!(client.transport().sent().is_empty());
        assert_eq!(client.state().transcript().len(), 1);
    }

    #[tokio::test]
    async fn test_each_turn_adds_two_entries() {
        let mut client = ChatClient::new(StubTransport::replying("ok"), SessionOptions::default());

        for turn in 1..=3 {
            client.send(&format!("message {turn}")).await;
            assert_eq!(client.state().transcript().len(), 1 + 2 * turn);
        }
        assert_eq!(client.transport().sent().len(), 3);
    }
}
