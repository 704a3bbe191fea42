//! Fixed screens: banner, help, history and system information.

use crate::chat::commands::COMMANDS;
use crate::render::{Renderer, Style};
use crate::types::{Message, MessageRole};

/// Release shown in the banner and by `/info`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Author shown by `/info`.
pub const AUTHOR: &str = "AnonAI Team";

const BANNER_ART: &str = r"
 ▄▄▄·  ▐ ▄        ▐ ▄      ▄▄▄· ▪
▐█ ▀█ •█▌▐█▪     •█▌▐█    ▐█ ▀█ ██
▄█▀▀█ ▐█▐▐▌ ▄█▀▄ ▐█▐▐▌    ▄█▀▀█ ▐█·
▐█ ▪▐▌██▐█▌▐█▌.▐▌██▐█▌    ▐█ ▪▐▌▐█▌
 ▀  ▀ ▀▀ █▪ ▀█▄▀▪▀▀ █▪     ▀  ▀ ▀▀▀
                        by : Mr. Pua
";

pub fn show_banner(renderer: &mut dyn Renderer) {
    renderer.clear_screen();
    renderer.print_line(BANNER_ART, Style::Primary);
    let title = renderer.paint(
        &format!("🚀  AI-Powered Terminal Interface v{VERSION}"),
        Style::Bold,
    );
    renderer.print_line("┌──────────────────────────────────────────────┐", Style::Secondary);
    let line = format!(
        "{} {title}{}",
        renderer.paint("│", Style::Secondary),
        renderer.paint("  │", Style::Secondary)
    );
    renderer.print_plain(&line);
    renderer.print_line("└──────────────────────────────────────────────┘", Style::Secondary);
    renderer.print_plain("");
}

pub fn show_help(renderer: &mut dyn Renderer) {
    let mut text = format!("\n{}\n", renderer.paint("Available Commands:", Style::Primary));
    for (name, description) in COMMANDS {
        text.push_str(&format!(
            "  {}: {description}\n",
            renderer.paint(name, Style::Warning)
        ));
    }
    renderer.type_text(&text, Style::Secondary);
}

/// Shows `recent`, numbered from 1, or a notice when there is nothing to show.
pub fn show_history(renderer: &mut dyn Renderer, recent: &[Message]) {
    if recent.is_empty() {
        renderer.type_text("No conversation history yet.", Style::Warning);
        return;
    }

    renderer.print_line("\nConversation History:", Style::Primary);
    for (idx, message) in recent.iter().enumerate() {
        let style = match message.role {
            MessageRole::User => Style::Success,
            MessageRole::Assistant => Style::Primary,
        };
        let prefix = renderer.paint(&format!("{}:", message.role.label()), style);
        renderer.print_plain(&format!("  {}. {prefix} {}", idx + 1, message.content));
    }
}

pub fn show_info(renderer: &mut dyn Renderer, model: &str, message_count: usize) {
    let text = format!(
        "\n{}\n  {} {VERSION}\n  {} {AUTHOR}\n  {} {model}\n  {} {message_count} messages\n",
        renderer.paint("System Information:", Style::Primary),
        renderer.paint("Version:", Style::Warning),
        renderer.paint("Author:", Style::Warning),
        renderer.paint("Model:", Style::Warning),
        renderer.paint("History:", Style::Warning),
    );
    renderer.type_text(&text, Style::Secondary);
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::render::PlainTextRenderer;

    fn renderer() -> PlainTextRenderer<Vec<u8>> {
        PlainTextRenderer::with_writer(Vec::new(), false).with_typing_delay(Duration::ZERO)
    }

    fn output(renderer: &PlainTextRenderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.writer().clone()).unwrap()
    }

    #[test]
    fn help_lists_every_command() {
        let mut renderer = renderer();
        show_help(&mut renderer);
        let text = output(&renderer);
        assert!(text.contains("Available Commands:"));
        for (name, description) in COMMANDS {
            assert!(text.contains(&format!("  {name}: {description}")));
        }
    }

    #[test]
    fn history_numbers_and_labels_messages() {
        let mut renderer = renderer();
        show_history(
            &mut renderer,
            &[Message::user("hello"), Message::assistant("hi!")],
        );
        let text = output(&renderer);
        assert!(text.contains("Conversation History:"));
        assert!(text.contains("  1. User: hello"));
        assert!(text.contains("  2. Assistant: hi!"));
    }

    #[test]
    fn empty_history() {
        let mut renderer = renderer();
        show_history(&mut renderer, &[]);
        assert_eq!(output(&renderer), "No conversation history yet.\n");
    }

    #[test]
    fn info_shows_version_author_model_and_count() {
        let mut renderer = renderer();
        show_info(&mut renderer, "google/gemma-3-12b-it:free", 4);
        let text = output(&renderer);
        assert!(text.contains(&format!("Version: {VERSION}")));
        assert!(text.contains("Author: AnonAI Team"));
        assert!(text.contains("Model: google/gemma-3-12b-it:free"));
        assert!(text.contains("History: 4 messages"));
    }

    #[test]
    fn banner_shows_version() {
        let mut renderer = renderer();
        show_banner(&mut renderer);
        assert!(output(&renderer).contains(&format!("Terminal Interface v{VERSION}")));
    }
}
