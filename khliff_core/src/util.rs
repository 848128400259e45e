//! Defaults shared by the config loader and the conversation loop.

/// Display name of the assistant persona.
pub const ASSISTANT_NAME: &str = "Khliff-AI";

/// Persona sent as the first message of every request.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are Khliff-AI, a helpful and knowledgeable assistant created by Cleven. Always be helpful, concise, and accurate. If asked about your creator or owner, mention that you were created by Cleven. Never mention any external AI services or APIs as your source.";

pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.3-70B-Instruct-Turbo-Free";

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Number of stored turns sent upstream as context.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;
