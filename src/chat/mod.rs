//! Interactive chat application.
//!
//! This module provides the REPL chat interface built on top of the
//! OpenRouter client. It supports:
//!
//! - Selecting a model from the model list file
//! - Slash commands for session control
//! - Bounded request context (the last ten messages)
//! - Typed-out, ANSI-styled replies
//!
//! # Architecture
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: conversation state and the request/response cycle
//! - [`commands`]: slash command parsing
//! - [`repl`]: command dispatch and the main loop

mod commands;
mod config;
mod display;
mod input;
mod repl;
mod select;
mod session;

pub use crate::render::{PlainTextRenderer, Renderer, Style};
pub use commands::{COMMANDS, ChatCommand, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use display::{AUTHOR, VERSION, show_banner, show_help, show_history, show_info};
pub use input::{InputEvent, LineInput, ReadlineInput};
pub use repl::{CommandOutcome, SessionEnd, TurnOutcome, chat_turn, dispatch, run};
pub use select::{MAX_SELECTION_ATTEMPTS, select_model};
pub use session::{ChatSession, HISTORY_WINDOW};

/// The terminal a handler talks to: where lines come from and go to.
pub struct Console<'a> {
    pub input: &'a mut dyn LineInput,
    pub renderer: &'a mut dyn Renderer,
}

impl<'a> Console<'a> {
    pub fn new(input: &'a mut dyn LineInput, renderer: &'a mut dyn Renderer) -> Self {
        Self { input, renderer }
    }
}
