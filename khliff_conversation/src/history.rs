//! Context window selection for completion requests.

use khliff_core::{ChatMessage, DEFAULT_HISTORY_LIMIT, Turn};

/// A sliding window over the turn history.
///
/// Decides which stored turns accompany the system prompt on the next
/// request: always the most recent `limit` turns, oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryWindow {
    limit: usize,
}

impl HistoryWindow {
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self { limit }
    }

    #[must_use]
    pub fn select<'a>(&self, turns: &'a [Turn]) -> &'a [Turn] {
        let start = turns.len().saturating_sub(self.limit);
        &turns[start..]
    }

    /// System prompt followed by the selected turns as `(role, content)` pairs.
    #[must_use]
    pub fn build_messages(&self, system_prompt: &str, turns: &[Turn]) -> Vec<ChatMessage> {
        let selected = self.select(turns);
        let mut messages = Vec::with_capacity(selected.len() + 1);
        messages.push(ChatMessage::system(system_prompt));
        messages.extend(selected.iter().map(Turn::to_message));
        messages
    }
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
