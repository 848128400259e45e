//! Conversation manager driving the request/response cycle.
//!
//! The `ConversationManager` is the single owner of the session: the input
//! loop hands it each submission and re-renders from its history afterwards.

use crate::history::HistoryWindow;
use crate::session::ChatSession;
use khliff_core::{
    CompletionParams, DEFAULT_HISTORY_LIMIT, DEFAULT_SYSTEM_PROMPT, LLMProvider, Turn,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Assistant reply used when no credential was configured.
pub const MISSING_API_KEY_MESSAGE: &str = "API key not found in configuration. Please add your API key to the khliff_config.json file.";

/// Configuration for conversation management.
#[derive(Debug, Clone)]
pub struct ConversationConfig {
    /// System prompt sent ahead of every context window
    pub system_prompt: String,
    /// Number of stored turns sent as context
    pub history_limit: usize,
    /// Model and sampling parameters
    pub params: CompletionParams,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            params: CompletionParams::default(),
        }
    }
}

impl ConversationConfig {
    /// Set the model name.
    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.params.model = model;
        self
    }

    /// Set the system prompt.
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: String) -> Self {
        self.system_prompt = prompt;
        self
    }

    /// Set the history limit.
    #[must_use]
    pub const fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }
}

/// Errors that can occur while requesting a completion.
///
/// These never escape [`ConversationManager::submit`]; they are recorded in
/// the history as an assistant turn instead.
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("{0:#}")]
    RemoteCallFailed(#[from] anyhow::Error),
}

/// Human-readable assistant reply for a failed request.
#[must_use]
pub fn failure_message(error: &ConversationError) -> String {
    format!("I'm having trouble responding. Please try again later. Error: {error}")
}

/// The two states of the conversation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    AwaitingResponse,
}

/// What a submission did to the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Blank input; nothing was appended.
    Ignored,
    /// The endpoint answered and its reply was appended.
    Replied,
    /// The request failed; the appended reply carries this error text.
    Failed(String),
    /// No credential configured; the static notice was appended.
    MissingCredential,
}

/// Single-session conversation manager.
///
/// `provider` is `None` when no API key is configured, in which case every
/// submission is answered with [`MISSING_API_KEY_MESSAGE`].
pub struct ConversationManager<P = Arc<dyn LLMProvider>>
where
    P: Send + Sync,
{
    provider: Option<P>,
    config: ConversationConfig,
    window: HistoryWindow,
    session: ChatSession,
    state: LoopState,
}

impl<P> ConversationManager<P>
where
    P: LLMProvider + Send + Sync,
{
    #[must_use]
    pub fn new(provider: Option<P>, config: ConversationConfig) -> Self {
        let session = ChatSession::new();
        info!(
            "Creating conversation manager for session: {} (credential: {})",
            session.id,
            if provider.is_some() { "set" } else { "missing" }
        );

        Self {
            provider,
            window: HistoryWindow::new(config.history_limit),
            config,
            session,
            state: LoopState::Idle,
        }
    }

    /// Process one user submission.
    ///
    /// Blank input is ignored. Otherwise the user turn is appended, a single
    /// completion request is made with the system prompt and the last
    /// `history_limit` turns, and exactly one assistant turn is appended
    /// with either the reply or an error description. The manager is back
    /// in [`LoopState::Idle`] when this returns.
    pub async fn submit(&mut self, input: &str) -> TurnOutcome {
        if input.trim().is_empty() {
            debug!("Ignoring blank submission");
            return TurnOutcome::Ignored;
        }

        self.session.push(Turn::user(input));
        self.state = LoopState::AwaitingResponse;

        let turn_number = self.session.len().div_ceil(2);
        info!(
            "Processing turn {turn_number} for session: {}",
            self.session.id
        );

        let outcome = match self.request_completion().await {
            None => {
                self.session.push(Turn::assistant(MISSING_API_KEY_MESSAGE));
                TurnOutcome::MissingCredential
            }
            Some(Ok(reply)) => {
                self.session.push(Turn::assistant(reply));
                debug!("Turn {turn_number} completed successfully");
                TurnOutcome::Replied
            }
            Some(Err(e)) => {
                warn!("Completion request failed: {e}");
                self.session.push(Turn::assistant(failure_message(&e)));
                TurnOutcome::Failed(e.to_string())
            }
        };

        self.state = LoopState::Idle;
        outcome
    }

    /// `None` when there is no provider to call.
    async fn request_completion(&self) -> Option<Result<String, ConversationError>> {
        let provider = self.provider.as_ref()?;

        let messages = self
            .window
            .build_messages(&self.config.system_prompt, self.session.turns());
        for (i, msg) in messages.iter().enumerate() {
            debug!(
                "Message {}: role={:?}, content_len={}",
                i,
                msg.role,
                msg.content.len()
            );
        }

        let result = provider
            .chat(&messages, &self.config.params)
            .await
            .map(|response| response.content)
            .map_err(ConversationError::RemoteCallFailed);
        Some(result)
    }

    /// Drop every turn. Valid from any state.
    pub fn clear(&mut self) {
        info!(
            "Clearing {} turns from session: {} (started {}, last change {})",
            self.session.len(),
            self.session.id,
            self.session.created_at.to_rfc3339(),
            self.session.updated_at.to_rfc3339()
        );
        self.session.clear();
        self.state = LoopState::Idle;
    }

    #[must_use]
    pub const fn session(&self) -> &ChatSession {
        &self.session
    }

    #[must_use]
    pub const fn state(&self) -> LoopState {
        self.state
    }
}
