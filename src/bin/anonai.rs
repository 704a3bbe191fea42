//! Interactive terminal chat with OpenRouter models.
//!
//! # Usage
//!
//! ```bash
//! export OPENROUTER_API_KEY='your_key_here'
//! anonai
//!
//! # Read the model list from elsewhere
//! anonai --models ~/.config/anonai/models.txt
//!
//! # Disable colors and the typing effect (useful for piping output)
//! anonai --no-color --typing-delay-ms 0
//! ```
//!
//! # Commands
//!
//! - `/help` - Show all commands
//! - `/exit` - Exit the program
//! - `/clear` - Reset conversation
//! - `/model` - Change AI model
//! - `/history` - View conversation
//! - `/info` - Show system info
//! - `/new` - Start fresh session
//!
//! Set `ANONAI_LOG` (e.g. `ANONAI_LOG=debug`) to see diagnostic logs on stderr.

use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arrrg::CommandLine;
use tracing_subscriber::EnvFilter;

use anonai::chat::{
    ChatArgs, ChatConfig, ChatSession, Console, PlainTextRenderer, ReadlineInput, Renderer, Style,
    run, select_model, show_banner,
};
use anonai::{ModelRegistry, OpenRouter, api_key_from_env};

/// Main entry point for the anonai application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let (args, _) = ChatArgs::from_command_line_relaxed("anonai [OPTIONS]");
    let config = ChatConfig::from(args);
    init_logging();

    match chat(&config).await {
        Ok(code) => code,
        Err(err) => {
            let mut renderer = PlainTextRenderer::with_color(config.use_color);
            renderer.print_line(&format!("\nCritical Error: {err}"), Style::Error);
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("ANONAI_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn chat(config: &ChatConfig) -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Flag for interrupt handling while a request is in flight
    let interrupted = Arc::new(AtomicBool::new(false));
    let mut renderer = PlainTextRenderer::with_color(config.use_color)
        .with_typing_delay(config.typing_delay)
        .with_interrupt(Arc::clone(&interrupted));

    let api_key = match api_key_from_env() {
        Ok(key) => key,
        Err(err) => {
            tracing::debug!(error = %err, "no credential");
            renderer.print_line(
                "API Key Required!\n\
                 Set your OpenRouter API key first:\n\
                 export OPENROUTER_API_KEY='your_key_here'",
                Style::Error,
            );
            return Ok(ExitCode::FAILURE);
        }
    };

    let registry = ModelRegistry::load(&config.models_path)?;
    let client = OpenRouter::new(Some(api_key))?;

    let interrupted_clone = interrupted.clone();
    ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::Relaxed);
    })?;

    let mut input = ReadlineInput::new()?;
    let mut console = Console::new(&mut input, &mut renderer);

    let model = match select_model(&registry, &mut console) {
        Ok(model) => model,
        Err(err) if err.is_selection() => {
            console.renderer.print_line(&err.to_string(), Style::Error);
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err.into()),
    };

    show_banner(console.renderer);

    let mut session = ChatSession::new(client, model);
    let end = run(&mut session, &registry, &mut console, &interrupted).await?;
    tracing::debug!(?end, messages = session.message_count(), "session finished");

    Ok(ExitCode::SUCCESS)
}
