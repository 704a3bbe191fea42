//! Configuration types for the chat application.
//!
//! The program is normally launched without arguments; the flags parsed
//! here via `arrrg` only override defaults.

use std::path::PathBuf;
use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::models::DEFAULT_MODELS_FILE;
use crate::render::DEFAULT_TYPING_DELAY;

/// Command-line arguments for the anonai tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Path of the model list file.
    #[arrrg(optional, "Model list file (default: models.txt)", "FILE")]
    pub models: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,

    /// Per-character delay of the typing effect.
    #[arrrg(optional, "Typing effect delay per character (default: 15)", "MS")]
    pub typing_delay_ms: Option<u32>,
}

/// Resolved configuration for a chat run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Where the model list is read from and, on first run, written to.
    pub models_path: PathBuf,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// Pause between characters of the typing effect.
    pub typing_delay: Duration,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Model list: `models.txt` in the working directory
    /// - Color: enabled
    /// - Typing delay: 15 ms
    pub fn new() -> Self {
        Self {
            models_path: PathBuf::from(DEFAULT_MODELS_FILE),
            use_color: true,
            typing_delay: DEFAULT_TYPING_DELAY,
        }
    }

    /// Sets the model list path.
    pub fn with_models_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.models_path = path.into();
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Sets the typing effect delay.
    pub fn with_typing_delay(mut self, delay: Duration) -> Self {
        self.typing_delay = delay;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        let defaults = ChatConfig::new();
        ChatConfig {
            models_path: args
                .models
                .map(PathBuf::from)
                .unwrap_or(defaults.models_path),
            use_color: !args.no_color,
            typing_delay: args
                .typing_delay_ms
                .map(|ms| Duration::from_millis(u64::from(ms)))
                .unwrap_or(defaults.typing_delay),
        }
    }
}
