use std::path::{Path, PathBuf};

use khliff_core::{
    CompletionParams, DEFAULT_HISTORY_LIMIT, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_SYSTEM_PROMPT, DEFAULT_TEMPERATURE,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ConfigError;

/// Default config file, resolved against the working directory.
pub const CONFIG_FILE_NAME: &str = "khliff_config.json";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "Config::default_model")]
    pub model: String,
    #[serde(default = "Config::default_temperature")]
    pub temperature: f32,
    #[serde(default = "Config::default_max_tokens")]
    pub max_tokens: u32,
    /// Number of stored turns sent as context with each request.
    #[serde(default = "Config::default_history_limit")]
    pub history_limit: usize,
    #[serde(default = "Config::default_system_prompt")]
    pub system_prompt: String,
    #[serde(default = "Config::default_base_url")]
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: Self::default_model(),
            temperature: Self::default_temperature(),
            max_tokens: Self::default_max_tokens(),
            history_limit: Self::default_history_limit(),
            system_prompt: Self::default_system_prompt(),
            base_url: Self::default_base_url(),
        }
    }
}

/// Outcome of [`Config::load_or_default`].
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    /// Set when the file was missing or rejected and defaults were used.
    pub warning: Option<ConfigError>,
}

impl Config {
    fn default_model() -> String {
        DEFAULT_MODEL.to_string()
    }

    const fn default_temperature() -> f32 {
        DEFAULT_TEMPERATURE
    }

    const fn default_max_tokens() -> u32 {
        DEFAULT_MAX_TOKENS
    }

    const fn default_history_limit() -> usize {
        DEFAULT_HISTORY_LIMIT
    }

    fn default_system_prompt() -> String {
        DEFAULT_SYSTEM_PROMPT.to_string()
    }

    fn default_base_url() -> String {
        "https://api.together.xyz/v1".to_string()
    }

    #[must_use]
    pub fn default_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE_NAME)
    }

    /// Read and validate the config file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;

        Ok(config)
    }

    /// Like [`Config::load_from`], but falls back to defaults with an empty
    /// credential instead of failing.
    #[must_use]
    pub fn load_or_default(path: &Path) -> LoadedConfig {
        match Self::load_from(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                LoadedConfig {
                    config,
                    warning: None,
                }
            }
            Err(e) => {
                warn!("{e}; continuing without an API key");
                LoadedConfig {
                    config: Self::default(),
                    warning: Some(e),
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Invalid(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::Invalid(
                "max_tokens must be greater than 0".to_string(),
            ));
        }
        if self.history_limit == 0 {
            return Err(ConfigError::Invalid(
                "history_limit must be greater than 0".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model must not be empty".to_string()));
        }
        Ok(())
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    #[must_use]
    pub fn completion_params(&self) -> CompletionParams {
        CompletionParams {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// API key reduced to its first and last four characters.
    #[must_use]
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.is_empty() {
            "(not set)".to_string()
        } else if chars.len() > 8 {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{head}...{tail}")
        } else {
            "***".to_string()
        }
    }

    pub fn create_config(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()).into());
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let template = Self {
            api_key: "your-together-api-key-here".to_string(),
            ..Self::default()
        };
        std::fs::write(path, serde_json::to_string_pretty(&template)?)?;

        println!("✅ Created config file at: {}", path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Edit the config file and add your Together API key");
        println!("   2. Run 'khliff' to start a conversation");
        println!();
        println!("🔧 Configuration options:");
        println!("   - model: completion model identifier");
        println!("   - history_limit: Number of messages sent as context");
        println!();
        Ok(())
    }
}
