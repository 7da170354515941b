//! Timed character-by-character reveal for the title banner

use std::time::Duration;

pub const TITLE: &str = "Welcome to GenAI!";
pub const REVEAL_INTERVAL: Duration = Duration::from_millis(100);

/// Reveals `text` one character per step.
#[derive(Debug, Clone)]
pub struct TextReveal {
    text: String,
    /// Number of characters currently visible
    shown: usize,
    total: usize,
}

impl TextReveal {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let total = text.chars().count();
        Self {
            text,
            shown: 0,
            total,
        }
    }

    /// Currently visible prefix
    pub fn visible(&self) -> &str {
        match self.text.char_indices().nth(self.shown) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.shown >= self.total
    }

    /// Reveal one more character. Returns false once the whole text is shown.
    pub fn advance(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.shown += 1;
        true
    }

    /// Drive the reveal to completion, calling `render` after every step.
    pub async fn play(mut self, interval: Duration, mut render: impl FnMut(&str)) {
        let mut ticker = tokio::time::interval(interval);
        while self.advance() {
            ticker.tick().await;
            render(self.visible());
        }
    }
}
