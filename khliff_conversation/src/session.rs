//! In-memory turn history for one interactive session.

use chrono::{DateTime, Utc};
use khliff_core::Turn;
use uuid::Uuid;

/// Ordered turn list owned by the running session.
///
/// Insertion order is render order and defines the context window. Turns are
/// only ever appended; [`ChatSession::clear`] is the one way to remove them.
#[derive(Debug, Clone)]
pub struct ChatSession {
    /// Session identifier, used for logging
    pub id: Uuid,
    turns: Vec<Turn>,
    /// Session start and last change, reported in the manager's logs
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatSession {
    #[must_use]
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            turns: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
        self.updated_at = Utc::now();
    }

    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    #[must_use]
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
        self.updated_at = Utc::now();
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
