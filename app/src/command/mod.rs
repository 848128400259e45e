//! Static strategy pattern for CLI commands.
//!
//! Each subcommand is its own zero-sized strategy type with a typed input,
//! dispatched statically from `main`.

use khliff_config::Config;
use khliff_conversation::{ConversationConfig, ConversationManager};
use khliff_core::LLMProvider;
use khliff_providers::TogetherProvider;
use std::sync::Arc;
use tracing::info;

mod chat;
mod info;
mod init;
mod version;

pub use chat::{ChatInput, ChatStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Build the conversation manager from the loaded config.
///
/// Without an API key no provider is created, and every turn is answered
/// with the missing-credential notice.
fn build_manager(config: &Config, model: Option<String>) -> ConversationManager {
    let provider: Option<Arc<dyn LLMProvider>> = if config.has_api_key() {
        let provider = TogetherProvider::new(config.api_key.clone())
            .with_base_url(config.base_url.clone());
        Some(Arc::new(provider))
    } else {
        info!("No API key configured; requests are disabled");
        None
    };

    let mut conversation_config = ConversationConfig {
        system_prompt: config.system_prompt.clone(),
        history_limit: config.history_limit,
        params: config.completion_params(),
    };
    if let Some(model) = model {
        conversation_config = conversation_config.with_model(model);
    }

    ConversationManager::new(provider, conversation_config)
}
