//! Slash commands accepted wherever the interview asks for free text.

use console::style;

/// Available slash commands during text entry.
#[derive(Debug, PartialEq)]
pub enum InterviewCommand {
    Help,
    /// Start the interview over from the confirmation question.
    Reset,
    /// Print every recorded turn.
    Transcript,
    Quit,
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<InterviewCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_lowercase();

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(InterviewCommand::Help),
        "/reset" | "/restart" => Some(InterviewCommand::Reset),
        "/transcript" | "/history" => Some(InterviewCommand::Transcript),
        "/quit" | "/exit" | "/q" => Some(InterviewCommand::Quit),
        other => Some(InterviewCommand::Unknown(other.to_string())),
    }
}

pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}        Show this help message", style("/help").cyan());
    println!("  {}       Start the interview over", style("/reset").cyan());
    println!("  {}  Show the conversation so far", style("/transcript").cyan());
    println!("  {}        End the session", style("/quit").cyan());
    println!();
}
