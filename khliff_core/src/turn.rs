//! A single message of the on-screen conversation.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::{ChatMessage, Role};

/// Who produced a turn. System prompts are never stored as turns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl From<Speaker> for Role {
    fn from(speaker: Speaker) -> Self {
        match speaker {
            Speaker::User => Self::User,
            Speaker::Assistant => Self::Assistant,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Turn {
    pub speaker: Speaker,
    pub content: String,
    /// Local wall-clock time, e.g. `03:07 PM`.
    pub timestamp: String,
}

impl Turn {
    /// Create a turn stamped with the current local time.
    #[must_use]
    pub fn now(speaker: Speaker, content: impl Into<String>) -> Self {
        Self::at(speaker, content, Local::now())
    }

    #[must_use]
    pub fn at(speaker: Speaker, content: impl Into<String>, time: DateTime<Local>) -> Self {
        Self {
            speaker,
            content: content.into(),
            timestamp: format_turn_time(time),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::now(Speaker::User, content)
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::now(Speaker::Assistant, content)
    }

    /// The `(role, content)` pair sent upstream.
    #[must_use]
    pub fn to_message(&self) -> ChatMessage {
        ChatMessage {
            role: self.speaker.into(),
            content: self.content.clone(),
        }
    }
}

/// 12-hour clock with AM/PM marker.
#[must_use]
pub fn format_turn_time(time: DateTime<Local>) -> String {
    time.format("%I:%M %p").to_string()
}
