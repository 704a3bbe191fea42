//! Slash command parsing for the chat application.
//!
//! A line starting with `/` is a command, never a message. Commands take no
//! arguments and are matched case-insensitively.

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Display the command table.
    Help,

    /// Exit the chat application.
    Exit,

    /// Reset the conversation.
    Clear,

    /// Re-run model selection.
    Model,

    /// Show recent messages.
    History,

    /// Show version, author, model and message count.
    Info,

    /// Start a fresh session; same effect as `Clear`.
    New,

    /// Anything else starting with `/`.
    Unknown(String),
}

/// Command names and descriptions, in help order.
pub const COMMANDS: [(&str, &str); 7] = [
    ("/help", "Show all commands"),
    ("/exit", "Exit the program"),
    ("/clear", "Reset conversation"),
    ("/model", "Change AI model"),
    ("/history", "View conversation"),
    ("/info", "Show system info"),
    ("/new", "Start fresh session"),
];

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input starts with `/`,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use anonai::chat::{ChatCommand, parse_command};
/// assert_eq!(parse_command("/EXIT"), Some(ChatCommand::Exit));
/// assert_eq!(parse_command("/model"), Some(ChatCommand::Model));
/// assert!(parse_command("Hello there").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let command = input.to_lowercase();
    let result = match command.as_str() {
        "/help" => ChatCommand::Help,
        "/exit" => ChatCommand::Exit,
        "/clear" => ChatCommand::Clear,
        "/model" => ChatCommand::Model,
        "/history" => ChatCommand::History,
        "/info" => ChatCommand::Info,
        "/new" => ChatCommand::New,
        _ => ChatCommand::Unknown(command),
    };

    Some(result)
}
