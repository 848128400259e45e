//! Line input and chat commands for the interactive session.

use std::io::BufRead;

/// What a line typed at the prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Submit the text as a user turn.
    Send(String),
    /// Empty the conversation.
    Clear,
    Help,
    Exit,
}

impl ChatCommand {
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text.trim().to_lowercase().as_str() {
            "/clear" => Self::Clear,
            "/help" => Self::Help,
            "/exit" | "/quit" => Self::Exit,
            _ => Self::Send(text.to_string()),
        }
    }

    #[must_use]
    pub const fn help_text() -> &'static str {
        r"
Commands:
  /clear  - Clear the chat
  /help   - Show this help
  /exit   - End the session

End a line with \ to continue the message on the next line.
"
    }
}

/// Read one message, joining lines that end in a backslash.
///
/// Returns `None` at end of input.
pub fn read_message<R: BufRead>(reader: &mut R) -> std::io::Result<Option<String>> {
    let mut message = String::new();
    let mut read_any = false;

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(read_any.then_some(message));
        }
        read_any = true;

        let line = line.trim_end_matches(['\n', '\r']);
        if let Some(head) = line.strip_suffix('\\') {
            message.push_str(head);
            message.push('\n');
        } else {
            message.push_str(line);
            return Ok(Some(message));
        }
    }
}
