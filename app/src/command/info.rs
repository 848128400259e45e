use std::path::PathBuf;

use khliff_config::Config;

/// Strategy for displaying the effective configuration.
///
/// Uses the same fallback as the chat command, so a missing or broken file
/// is reported rather than treated as fatal.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = PathBuf;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let loaded = Config::load_or_default(&input);
        let config = &loaded.config;

        println!("=== khliff Configuration ===\n");
        println!("File: {}", input.display());
        if let Some(warning) = &loaded.warning {
            println!("  Status: {warning}");
        } else {
            println!("  Status: OK");
        }
        println!();

        println!("API Key: {}", config.masked_api_key());
        println!("Endpoint: {}", config.base_url);
        println!();

        println!("Completion:");
        println!("  Model: {}", config.model);
        println!("  Max Tokens: {}", config.max_tokens);
        println!("  Temperature: {}", config.temperature);
        println!("  History Limit: {}", config.history_limit);
        println!("  System Prompt: {}", truncate(&config.system_prompt, 60));

        Ok(())
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
