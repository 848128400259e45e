//! Interactive chat session.
//!
//! Every send or clear ends with a full redraw of the conversation from the
//! manager's history.

use std::io::Write;
use std::path::PathBuf;

use khliff_config::Config;
use khliff_conversation::{ConversationManager, TurnOutcome, ViewModel};
use tracing::info;

use super::build_manager;
use crate::input::{ChatCommand, read_message};
use crate::render::Renderer;

/// Input parameters for the Chat command strategy.
#[derive(Debug, Clone)]
pub struct ChatInput {
    pub config_path: PathBuf,
    /// Optional single message to send (non-interactive mode)
    pub message: Option<String>,
    /// Optional model override
    pub model: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct ChatStrategy;

impl super::CommandStrategy for ChatStrategy {
    type Input = ChatInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let loaded = Config::load_or_default(&input.config_path);
        let warning = loaded.warning.map(|e| e.to_string());
        let mut manager = build_manager(&loaded.config, input.model);

        if let Some(msg) = input.message {
            if let Some(warning) = &warning {
                eprintln!("Warning: {warning}");
            }
            if manager.submit(&msg).await == TurnOutcome::Ignored {
                anyhow::bail!("Message is empty");
            }
            if let Some(reply) = manager.session().last() {
                println!("{}", reply.content);
            }
            return Ok(());
        }

        run_interactive(&mut manager, warning).await?;
        let session = manager.session();
        info!(
            "Conversation {} ended: {} total turns, open since {}",
            session.id,
            session.len(),
            session.created_at.to_rfc3339()
        );
        Ok(())
    }
}

async fn run_interactive(
    manager: &mut ConversationManager,
    warning: Option<String>,
) -> anyhow::Result<()> {
    let mut renderer = Renderer::new(std::io::stdout());
    redraw(&mut renderer, manager, warning.as_deref())?;

    let stdin = std::io::stdin();
    let mut lines = stdin.lock();

    loop {
        renderer.prompt()?;
        let Some(text) = read_message(&mut lines)? else {
            break;
        };

        match ChatCommand::parse(&text) {
            ChatCommand::Exit => break,
            ChatCommand::Help => renderer.help()?,
            ChatCommand::Clear => {
                manager.clear();
                redraw(&mut renderer, manager, warning.as_deref())?;
            }
            ChatCommand::Send(message) => {
                if message.trim().is_empty() {
                    continue;
                }
                renderer.thinking()?;
                manager.submit(&message).await;
                redraw(&mut renderer, manager, warning.as_deref())?;
            }
        }
    }

    println!("\nSession ended. Total turns: {}", manager.session().len());
    std::io::stdout().flush()?;
    Ok(())
}

fn redraw<W: Write>(
    renderer: &mut Renderer<W>,
    manager: &ConversationManager,
    warning: Option<&str>,
) -> std::io::Result<()> {
    let view = ViewModel::from_turns(manager.session().turns(), warning.map(str::to_string));
    renderer.draw(&view)
}
