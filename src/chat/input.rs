//! Line input for the chat application.

use std::io;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::error::{Error, Result};

/// What a single prompt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A line of text, without its newline.
    Line(String),
    /// Ctrl+C at the prompt.
    Interrupted,
    /// Ctrl+D or end of piped input.
    Eof,
}

/// Source of user input lines.
pub trait LineInput {
    /// Shows `prompt` and reads one line.
    fn read_line(&mut self, prompt: &str) -> Result<InputEvent>;
}

/// Line editor backed by rustyline, with in-memory history.
pub struct ReadlineInput {
    editor: DefaultEditor,
}

impl ReadlineInput {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new()
            .map_err(|err| Error::io("failed to initialize line editor", readline_io(err)))?;
        Ok(Self { editor })
    }
}

impl LineInput for ReadlineInput {
    fn read_line(&mut self, prompt: &str) -> Result<InputEvent> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(InputEvent::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(InputEvent::Interrupted),
            Err(ReadlineError::Eof) => Ok(InputEvent::Eof),
            Err(err) => Err(Error::io("failed to read input", readline_io(err))),
        }
    }
}

fn readline_io(err: ReadlineError) -> io::Error {
    match err {
        ReadlineError::Io(err) => err,
        other => io::Error::other(other.to_string()),
    }
}
