//! Render payload built from the immutable history.
//!
//! Every change to the session is followed by a full re-render; this module
//! turns the turn list into what the renderer draws, with no terminal I/O.

use khliff_core::{ASSISTANT_NAME, Speaker, Turn};

pub const TIP_TEXT: &str = "Tip: To edit a message, send a new one with the corrected text.";

/// Which side of the screen a turn is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTurn {
    pub speaker: Speaker,
    pub label: &'static str,
    pub alignment: Alignment,
    pub body: String,
    pub time: String,
}

impl RenderedTurn {
    fn from_turn(turn: &Turn) -> Self {
        let (label, alignment) = match turn.speaker {
            Speaker::User => ("You", Alignment::Right),
            Speaker::Assistant => (ASSISTANT_NAME, Alignment::Left),
        };
        Self {
            speaker: turn.speaker,
            label,
            alignment,
            body: turn.content.clone(),
            time: turn.timestamp.clone(),
        }
    }
}

/// Everything one full screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub title: &'static str,
    /// Config problem shown above the conversation on every render.
    pub warning: Option<String>,
    pub turns: Vec<RenderedTurn>,
    pub tip: &'static str,
}

impl ViewModel {
    #[must_use]
    pub fn from_turns(turns: &[Turn], warning: Option<String>) -> Self {
        Self {
            title: ASSISTANT_NAME,
            warning,
            turns: turns.iter().map(RenderedTurn::from_turn).collect(),
            tip: TIP_TEXT,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
