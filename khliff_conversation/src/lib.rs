#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! The conversation loop of a single interactive chat session.
//!
//! # Key Features
//! - Append-only, in-memory turn history cleared only on request
//! - Bounded context window (system prompt + last N turns) per request
//! - Remote failures recorded as assistant turns, never propagated
//! - Pure view model built from the history for full re-renders

mod history;
mod manager;
mod session;
mod view;

pub use history::HistoryWindow;
pub use manager::{
    ConversationConfig, ConversationError, ConversationManager, LoopState, MISSING_API_KEY_MESSAGE,
    TurnOutcome, failure_message,
};
pub use session::ChatSession;
pub use view::{Alignment, RenderedTurn, ViewModel};
