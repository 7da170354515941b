//! Plain-text rendering of the transcript for the terminal front end

use crate::domain::entities::{Message, Sender};
use crate::session::ConversationState;

pub const PENDING_INDICATOR: &str = "assistant> ...";
/// Printed when input arrives while a reply is still outstanding
pub const REJECTED_NOTICE: &str = "(still waiting for the last reply)";

/// Format one entry, indenting continuation lines under the label.
pub fn render_message(message: &Message) -> String {
    let label = match (message.sender, message.error) {
        (Sender::User, _) => "you",
        (Sender::Assistant, false) => "assistant",
        (Sender::Assistant, true) => "error",
    };
    let indent = " ".repeat(label.len() + 2);

    let mut out = String::with_capacity(message.text.len() + label.len() + 2);
    for (i, line) in message.text.lines().enumerate() {
        if i == 0 {
            out.push_str(label);
            out.push_str("> ");
        } else {
            out.push('\n');
            out.push_str(&indent);
        }
        out.push_str(line);
    }
    if out.is_empty() {
        out.push_str(label);
        out.push('>');
    }
    out
}

/// Append-only terminal view that follows the session's scroll anchor
#[derive(Debug, Default)]
pub struct TerminalView {
    rendered: usize,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines for every entry up to the scroll anchor not yet printed
    pub fn drain_new(&mut self, state: &ConversationState) -> Vec<String> {
        let Some(anchor) = state.scroll_anchor() else {
            return Vec::new();
        };

        let lines: Vec<String> = state
            .transcript()
            .iter()
            .enumerate()
            .skip(self.rendered)
            .take_while(|(i, _)| *i <= anchor)
            .map(|(_, m)| render_message(m))
            .collect();
        self.rendered += lines.len();
        lines
    }
}
