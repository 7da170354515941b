//! Conversation state owned by the chat client
//!
//! `ConversationState` turns user submissions into outbound `ChatRequest`s
//! and relay outcomes into transcript entries. It performs no I/O; the
//! caller sends the dispatched request and feeds the outcome back through
//! [`ConversationState::resolve`].

use relaychat_common::{ChatReply, ChatRequest};

use crate::domain::entities::{Message, Transcript};
use crate::domain::state::{ClientEvent, ClientPhase, ClientStateMachine, StateError};
use crate::transport::TransportError;

pub const DEFAULT_GREETING: &str = "Hey Sam! How can I assist you today?";
pub const DEFAULT_ERROR_TEXT: &str = "⚠️ Oops! Something went wrong.";

/// Fixed texts shown by a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Seeded as the first assistant entry
    pub greeting: String,
    /// Shown for every failed turn
    pub error_text: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            greeting: DEFAULT_GREETING.to_string(),
            error_text: DEFAULT_ERROR_TEXT.to_string(),
        }
    }
}

/// Result of a submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// User entry appended; the caller must send this request
    Dispatched(ChatRequest),
    /// Empty or whitespace-only input, nothing changed
    Ignored,
    /// A request is already in flight, nothing changed
    Rejected,
}

#[derive(Debug, Clone)]
pub struct ConversationState {
    transcript: Transcript,
    phase: ClientPhase,
    draft_input: String,
    /// Index of the entry the view is scrolled to
    scroll_anchor: Option<usize>,
    error_text: String,
}

impl ConversationState {
    pub fn new(options: SessionOptions) -> Self {
        let mut transcript = Transcript::new();
        transcript.push(Message::assistant(options.greeting));

        let mut state = Self {
            transcript,
            phase: ClientPhase::Idle,
            draft_input: String::new(),
            scroll_anchor: None,
            error_text: options.error_text,
        };
        state.scroll_to_latest();
        state
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn phase(&self) -> ClientPhase {
        self.phase
    }

    /// True while a relay call is outstanding
    pub fn is_pending(&self) -> bool {
        self.phase.is_pending()
    }

    pub fn draft_input(&self) -> &str {
        &self.draft_input
    }

    pub fn set_draft_input(&mut self, text: impl Into<String>) {
        self.draft_input = text.into();
    }

    pub fn scroll_anchor(&self) -> Option<usize> {
        self.scroll_anchor
    }

    /// Submit the current draft input
    pub fn submit_draft(&mut self) -> SubmitOutcome {
        let draft = std::mem::take(&mut self.draft_input);
        let outcome = self.submit(&draft);
        if !matches!(outcome, SubmitOutcome::Dispatched(_)) {
            self.draft_input = draft;
        }
        outcome
    }

    /// Submit `text` as the next user turn.
    ///
    /// Whitespace is trimmed before the entry is recorded and sent.
    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        if self.is_pending() {
            tracing::debug!("Submission rejected while a request is in flight");
            return SubmitOutcome::Rejected;
        }

        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }

        match ClientStateMachine::transition(self.phase, ClientEvent::Submit) {
            Ok(next) => self.phase = next,
            Err(_) => return SubmitOutcome::Rejected,
        }

        self.transcript.push(Message::user(text));
        self.draft_input.clear();
        self.scroll_to_latest();

        SubmitOutcome::Dispatched(ChatRequest::new(text))
    }

    /// Record the outcome of the in-flight request and return to `Idle`.
    ///
    /// Fails without touching the transcript if no request is in flight.
    pub fn resolve(
        &mut self,
        outcome: Result<ChatReply, TransportError>,
    ) -> Result<(), StateError> {
        let event = match outcome {
            Ok(_) => ClientEvent::ReplyReceived,
            Err(_) => ClientEvent::RequestFailed,
        };
        self.phase = ClientStateMachine::transition(self.phase, event)?;

        let entry = match outcome {
            Ok(reply) => Message::assistant(reply.reply),
            Err(e) => {
                tracing::warn!(error = %e, "Chat request failed");
                Message::failure(self.error_text.clone())
            }
        };
        self.transcript.push(entry);
        self.scroll_to_latest();
        Ok(())
    }

    /// Point the view at the most recent entry. Returns whether the anchor moved.
    pub fn scroll_to_latest(&mut self) -> bool {
        let latest = self.transcript.len().checked_sub(1);
        if self.scroll_anchor == latest {
            return false;
        }
        self.scroll_anchor = latest;
        true
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}
