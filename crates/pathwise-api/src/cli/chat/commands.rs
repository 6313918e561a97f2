//! Slash command parsing and execution for the chat loop.
//!
//! Commands start with `/` and provide in-chat controls for session
//! lifecycle: drafts, switching, renaming, and deletion.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Start a new draft session.
    New,
    /// List recent sessions.
    Sessions,
    /// Switch to a session by list index or ID.
    Select(String),
    /// Rename the current session.
    Rename(String),
    /// Delete the current session (or discard the draft).
    Delete,
    /// Show the transcript for the current session.
    History,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let arg = parts.get(1).map(|s| s.trim().to_string());

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/new" => Some(ChatCommand::New),
        "/sessions" | "/ls" => Some(ChatCommand::Sessions),
        "/select" | "/switch" => match arg.filter(|a| !a.is_empty()) {
            Some(target) => Some(ChatCommand::Select(target)),
            None => Some(ChatCommand::Unknown(
                "/select requires a session number or ID".to_string(),
            )),
        },
        "/rename" => match arg.filter(|a| !a.is_empty()) {
            Some(title) => Some(ChatCommand::Rename(title)),
            None => Some(ChatCommand::Unknown(
                "/rename requires a new title".to_string(),
            )),
        },
        "/delete" | "/rm" => Some(ChatCommand::Delete),
        "/history" => Some(ChatCommand::History),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}      {}", style("/help").cyan(), "Show this help message");
    println!("  {}       {}", style("/new").cyan(), "Start a new conversation");
    println!("  {}  {}", style("/sessions").cyan(), "List recent sessions");
    println!("  {}    {}", style("/select").cyan(), "Switch session by number or ID");
    println!("  {}    {}", style("/rename").cyan(), "Rename the current session");
    println!("  {}    {}", style("/delete").cyan(), "Delete the current session");
    println!("  {}   {}", style("/history").cyan(), "Show the transcript");
    println!("  {}     {}", style("/clear").cyan(), "Clear the screen");
    println!("  {}      {}", style("/exit").cyan(), "Leave the chat");
    println!();
    println!("  {}", style("Ctrl+D to exit").dim());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_help() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/h"), Some(ChatCommand::Help));
        assert_eq!(parse("/?"), Some(ChatCommand::Help));
    }

    #[test]
    fn test_parse_exit() {
        assert_eq!(parse("/exit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/quit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/q"), Some(ChatCommand::Exit));
    }

    #[test]
    fn test_parse_select_with_target() {
        assert_eq!(
            parse("/select 2"),
            Some(ChatCommand::Select("2".to_string()))
        );
        assert_eq!(
            parse("/switch 0192f0c1-2345-7890-abcd-ef0123456789"),
            Some(ChatCommand::Select(
                "0192f0c1-2345-7890-abcd-ef0123456789".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_select_without_target() {
        assert!(matches!(parse("/select"), Some(ChatCommand::Unknown(_))));
    }

    #[test]
    fn test_parse_rename() {
        assert_eq!(
            parse("/rename Career pivot plan"),
            Some(ChatCommand::Rename("Career pivot plan".to_string()))
        );
        assert!(matches!(parse("/rename  "), Some(ChatCommand::Unknown(_))));
    }

    #[test]
    fn test_parse_not_command() {
        assert_eq!(parse("hello world"), None);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse("/foo"), Some(ChatCommand::Unknown("/foo".to_string())));
    }
}
