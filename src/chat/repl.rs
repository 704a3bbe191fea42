//! The read-eval-print loop.
//!
//! Each line is either a slash command, handled by [`dispatch`], or a
//! message, handled by [`chat_turn`]. Everything the handlers touch is
//! passed in explicitly.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::chat::Console;
use crate::chat::commands::{ChatCommand, parse_command};
use crate::chat::display::{show_help, show_history, show_info};
use crate::chat::input::InputEvent;
use crate::chat::select::select_model;
use crate::chat::session::ChatSession;
use crate::client::CompletionBackend;
use crate::error::Result;
use crate::models::ModelRegistry;
use crate::observability::{CHAT_COMMANDS, CHAT_MALFORMED_RESPONSES, CHAT_TURNS};
use crate::render::{Renderer, Style};

const INTERRUPT_POLL: Duration = Duration::from_millis(50);

/// Whether the loop keeps going after a command.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    Exit,
}

/// How a message turn ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The reply was recorded and shown.
    Replied,
    /// The request failed or the reply was unusable; the error was shown.
    Failed,
    /// Ctrl+C arrived while waiting for the endpoint.
    Interrupted,
}

/// Why the loop stopped.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user typed `/exit`.
    Exit,
    /// Ctrl+C, at the prompt, during a turn or while a command prints.
    Interrupted,
    /// Ctrl+D or end of piped input.
    EndOfInput,
}

/// Executes one slash command against the session.
pub fn dispatch<B: CompletionBackend>(
    command: &ChatCommand,
    session: &mut ChatSession<B>,
    registry: &ModelRegistry,
    console: &mut Console<'_>,
) -> Result<CommandOutcome> {
    CHAT_COMMANDS.click();
    tracing::debug!(?command, "dispatching command");
    match command {
        ChatCommand::Exit => {
            console
                .renderer
                .type_text("Goodbye! Closing session...", Style::Warning);
            return Ok(CommandOutcome::Exit);
        }
        ChatCommand::Help => show_help(console.renderer),
        ChatCommand::Clear => {
            session.clear();
            console
                .renderer
                .type_text("Conversation reset.", Style::Success);
        }
        ChatCommand::New => {
            session.clear();
            console
                .renderer
                .type_text("New session started.", Style::Success);
        }
        ChatCommand::Model => match select_model(registry, console) {
            Ok(model) => {
                session.set_model(model);
                console.renderer.type_text(
                    &format!("Model changed to: {}", session.model()),
                    Style::Success,
                );
            }
            Err(err) if err.is_selection() => {
                console.renderer.type_text(
                    &format!("Model unchanged: {}", session.model()),
                    Style::Warning,
                );
            }
            Err(err) => return Err(err),
        },
        ChatCommand::History => show_history(console.renderer, session.recent()),
        ChatCommand::Info => show_info(console.renderer, session.model(), session.message_count()),
        ChatCommand::Unknown(name) => {
            tracing::debug!(command = %name, "unknown command");
            console
                .renderer
                .print_error("Unknown command. Type /help for options.");
        }
    }
    Ok(CommandOutcome::Continue)
}

/// Sends one message and shows the reply or the error.
///
/// A failed turn leaves the user message in history and adds nothing else.
pub async fn chat_turn<B: CompletionBackend>(
    line: &str,
    session: &mut ChatSession<B>,
    renderer: &mut dyn Renderer,
    interrupted: &AtomicBool,
) -> TurnOutcome {
    CHAT_TURNS.click();
    let result = tokio::select! {
        result = session.send(line) => result,
        _ = wait_for_interrupt(interrupted) => return TurnOutcome::Interrupted,
    };

    match result {
        Ok(reply) => {
            renderer.type_text(&format!("AI: {reply}"), Style::Primary);
            TurnOutcome::Replied
        }
        Err(err) if err.is_malformed_response() => {
            CHAT_MALFORMED_RESPONSES.click();
            tracing::warn!(error = %err, "discarding malformed response");
            renderer.print_error("Error processing response");
            TurnOutcome::Failed
        }
        Err(err) => {
            renderer.print_error(&format!("API Error: {err}"));
            TurnOutcome::Failed
        }
    }
}

async fn wait_for_interrupt(interrupted: &AtomicBool) {
    while !interrupted.load(Ordering::Relaxed) {
        tokio::time::sleep(INTERRUPT_POLL).await;
    }
}

/// Runs the loop until `/exit`, an interrupt, or end of input.
///
/// Only input failures and unexpected command failures are returned as
/// errors; request failures are shown and the loop continues.
pub async fn run<B: CompletionBackend>(
    session: &mut ChatSession<B>,
    registry: &ModelRegistry,
    console: &mut Console<'_>,
    interrupted: &AtomicBool,
) -> Result<SessionEnd> {
    let prompt = console.renderer.paint("You: ", Style::Success);
    loop {
        interrupted.store(false, Ordering::Relaxed);

        console.renderer.print_plain("");
        let line = match console.input.read_line(&prompt)? {
            InputEvent::Line(line) => line,
            InputEvent::Interrupted => return Ok(end_session(console, SessionEnd::Interrupted)),
            InputEvent::Eof => return Ok(end_session(console, SessionEnd::EndOfInput)),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = parse_command(line) {
            match dispatch(&command, session, registry, console)? {
                CommandOutcome::Exit => return Ok(SessionEnd::Exit),
                // Ctrl+C while a command's output was typed out.
                CommandOutcome::Continue if interrupted.load(Ordering::Relaxed) => {
                    return Ok(end_session(console, SessionEnd::Interrupted));
                }
                CommandOutcome::Continue => continue,
            }
        }

        let outcome = chat_turn(line, session, console.renderer, interrupted).await;
        if outcome == TurnOutcome::Interrupted || interrupted.load(Ordering::Relaxed) {
            return Ok(end_session(console, SessionEnd::Interrupted));
        }
    }
}

fn end_session(console: &mut Console<'_>, end: SessionEnd) -> SessionEnd {
    console
        .renderer
        .type_text("\nSession ended.", Style::Warning);
    end
}
