use std::path::PathBuf;

use khliff_config::Config;

/// Strategy for creating a config file template at the given path.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = PathBuf;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        Config::create_config(&input)
    }
}
