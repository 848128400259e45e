//! Integration tests for the submit/clear cycle.
//!
//! These tests verify that:
//! - Blank input leaves the history untouched
//! - Successful turns alternate user/assistant
//! - The context window is capped at system prompt + last N turns
//! - Remote failures append exactly one assistant turn with the error text
//! - A missing credential short-circuits without calling the endpoint

use async_trait::async_trait;
use khliff_conversation::{
    ConversationConfig, ConversationManager, LoopState, MISSING_API_KEY_MESSAGE, TurnOutcome,
};
use khliff_core::{ChatMessage, CompletionParams, LLMProvider, LLMResponse, Role, Speaker};
use std::sync::{Arc, Mutex};

/// Echoes the last message and records every request it receives.
#[derive(Default)]
struct RecordingProvider {
    requests: Mutex<Vec<(Vec<ChatMessage>, CompletionParams)>>,
    fail_with: Option<String>,
    reply_with: Option<String>,
}

impl RecordingProvider {
    fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    fn replying(text: &str) -> Self {
        Self {
            reply_with: Some(text.to_string()),
            ..Self::default()
        }
    }

    fn requests(&self) -> Vec<(Vec<ChatMessage>, CompletionParams)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMProvider for RecordingProvider {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        params: &CompletionParams,
    ) -> anyhow::Result<LLMResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((messages.to_vec(), params.clone()));

        if let Some(message) = &self.fail_with {
            anyhow::bail!("{message}");
        }

        let last = messages.last().map_or("", |m| m.content.as_str());
        Ok(LLMResponse {
            content: self
                .reply_with
                .clone()
                .unwrap_or_else(|| format!("echo: {last}")),
            usage: None,
        })
    }
}

fn manager_with(provider: &Arc<RecordingProvider>) -> ConversationManager<Arc<RecordingProvider>> {
    ConversationManager::new(Some(Arc::clone(provider)), ConversationConfig::default())
}

#[tokio::test]
async fn blank_input_is_ignored() {
    let provider = Arc::new(RecordingProvider::default());
    let mut manager = manager_with(&provider);

    for input in ["", "   ", "\n\t "] {
        assert_eq!(manager.submit(input).await, TurnOutcome::Ignored);
    }

    assert!(manager.session().is_empty());
    assert_eq!(manager.state(), LoopState::Idle);
    assert!(provider.requests().is_empty());
}

#[tokio::test]
async fn successful_turns_alternate() {
    let provider = Arc::new(RecordingProvider::default());
    let mut manager = manager_with(&provider);

    for i in 0..4 {
        let outcome = manager.submit(&format!("question {i}")).await;
        assert_eq!(outcome, TurnOutcome::Replied);
        assert_eq!(manager.state(), LoopState::Idle);
    }

    let turns = manager.session().turns();
    assert_eq!(turns.len(), 8);
    for (i, turn) in turns.iter().enumerate() {
        let expected = if i % 2 == 0 {
            Speaker::User
        } else {
            Speaker::Assistant
        };
        assert_eq!(turn.speaker, expected);
        assert!(!turn.timestamp.is_empty());
    }
    assert_eq!(turns[7].content, "echo: question 3");
}

#[tokio::test]
async fn request_uses_system_prompt_and_fixed_params() {
    let provider = Arc::new(RecordingProvider::default());
    let mut manager = manager_with(&provider);

    manager.submit("hello").await;

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    let (messages, params) = &requests[0];
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::System);
    assert!(messages[0].content.starts_with("You are Khliff-AI"));
    assert_eq!(messages[1].role, Role::User);
    assert_eq!(messages[1].content, "hello");
    assert_eq!(params.max_tokens, 1024);
    assert!((params.temperature - 0.7).abs() < f32::EPSILON);
}

#[tokio::test]
async fn context_window_is_bounded() {
    let provider = Arc::new(RecordingProvider::default());
    let mut manager = manager_with(&provider);

    for i in 0..12 {
        manager.submit(&format!("q{i}")).await;
    }

    for (messages, _) in provider.requests() {
        assert!(messages.len() <= 11);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(
            messages.iter().filter(|m| m.role == Role::System).count(),
            1
        );
    }

    // 23 turns stored before the last request: the window is the last 10,
    // ending with the new user turn.
    let (last_request, _) = provider.requests().pop().unwrap();
    assert_eq!(last_request.len(), 11);
    assert_eq!(last_request[1].content, "echo: q6");
    assert_eq!(last_request[10].content, "q11");
    assert_eq!(manager.session().len(), 24);
}

#[tokio::test]
async fn configurable_history_limit() {
    let provider = Arc::new(RecordingProvider::default());
    let config = ConversationConfig::default().with_history_limit(3);
    let mut manager = ConversationManager::new(Some(Arc::clone(&provider)), config);

    for i in 0..5 {
        manager.submit(&format!("q{i}")).await;
    }

    let (last_request, _) = provider.requests().pop().unwrap();
    assert_eq!(last_request.len(), 4);
    assert_eq!(last_request[3].content, "q4");
}

#[tokio::test]
async fn remote_failure_appends_one_error_turn() {
    let provider = Arc::new(RecordingProvider::failing("401 Unauthorized: invalid api key"));
    let mut manager = manager_with(&provider);

    let outcome = manager.submit("hello").await;

    let TurnOutcome::Failed(error) = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert!(error.contains("invalid api key"));

    let turns = manager.session().turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].speaker, Speaker::User);
    assert_eq!(turns[1].speaker, Speaker::Assistant);
    assert!(turns[1].content.contains("I'm having trouble responding"));
    assert!(turns[1].content.contains("401 Unauthorized: invalid api key"));
    assert_eq!(manager.state(), LoopState::Idle);
    assert_eq!(provider.requests().len(), 1);
}

#[tokio::test]
async fn blank_reply_is_recorded_as_is() {
    let provider = Arc::new(RecordingProvider::replying(""));
    let mut manager = manager_with(&provider);

    let outcome = manager.submit("say nothing").await;

    assert_eq!(outcome, TurnOutcome::Replied);
    let turns = manager.session().turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[1].speaker, Speaker::Assistant);
    assert_eq!(turns[1].content, "");
    assert_eq!(manager.state(), LoopState::Idle);
}

#[tokio::test]
async fn missing_credential_skips_the_call() {
    let mut manager: ConversationManager<Arc<RecordingProvider>> =
        ConversationManager::new(None, ConversationConfig::default());

    let outcome = manager.submit("hello").await;

    assert_eq!(outcome, TurnOutcome::MissingCredential);
    let turns = manager.session().turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[1].content, MISSING_API_KEY_MESSAGE);
}

#[tokio::test]
async fn clear_resets_history() {
    let provider = Arc::new(RecordingProvider::default());
    let mut manager = manager_with(&provider);

    manager.clear();
    assert!(manager.session().is_empty());

    manager.submit("one").await;
    manager.submit("two").await;
    assert_eq!(manager.session().len(), 4);

    manager.clear();
    assert_eq!(manager.session().len(), 0);
    assert_eq!(manager.state(), LoopState::Idle);

    // Context after a clear starts fresh.
    manager.submit("three").await;
    let (last_request, _) = provider.requests().pop().unwrap();
    assert_eq!(last_request.len(), 2);
}
