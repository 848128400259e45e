#![deny(
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

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use command::{
    ChatInput, ChatStrategy, CommandStrategy, InfoStrategy, InitStrategy, VersionStrategy,
};
use khliff_config::Config;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod command;
mod input;
mod render;

#[derive(Parser)]
#[command(name = "khliff")]
#[command(about = "Khliff-AI terminal chat", long_about = None)]
struct Cli {
    /// Path to the JSON config file
    #[arg(short, long, global = true, default_value_os_t = Config::default_path())]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat (the default)
    Chat {
        /// Single message to send, then exit
        #[arg(short = 'm', long)]
        message: Option<String>,

        /// Model to use
        #[arg(short = 'M', long)]
        model: Option<String>,
    },
    /// Create a config file template
    Init,
    /// Show the loaded configuration
    Info,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the redrawn chat.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Chat {
        message: None,
        model: None,
    }) {
        Commands::Chat { message, model } => {
            ChatStrategy
                .execute(ChatInput {
                    config_path: cli.config,
                    message,
                    model,
                })
                .await
        }
        Commands::Init => InitStrategy.execute(cli.config).await,
        Commands::Info => InfoStrategy.execute(cli.config).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
