//! Terminal output for the chat application.
//!
//! Styling is a closed set of named ANSI styles; [`styled`] wraps text in one
//! of them and always appends a reset. The [`Renderer`] trait abstracts over
//! where output goes so the chat loop can be driven in tests.

use std::io::{self, Stdout, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// ANSI escape code for bright cyan text.
const ANSI_BRIGHT_CYAN: &str = "\x1b[96m";

/// ANSI escape code for bright magenta text.
const ANSI_BRIGHT_MAGENTA: &str = "\x1b[95m";

/// ANSI escape code for bright green text.
const ANSI_BRIGHT_GREEN: &str = "\x1b[92m";

/// ANSI escape code for bright yellow text.
const ANSI_BRIGHT_YELLOW: &str = "\x1b[93m";

/// ANSI escape code for bright red text.
const ANSI_BRIGHT_RED: &str = "\x1b[91m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for bold text.
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI sequence that clears the screen and homes the cursor.
const ANSI_CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Default pause between characters of the typing effect.
pub const DEFAULT_TYPING_DELAY: Duration = Duration::from_millis(15);

/// Named terminal styles.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Style {
    /// Cyan; replies and headings.
    Primary,
    /// Magenta; framed blocks and help text.
    Secondary,
    /// Green; the user prompt and confirmations.
    Success,
    /// Yellow; labels and notices.
    Warning,
    /// Red; errors.
    Error,
    /// No styling.
    Reset,
    /// Bold.
    Bold,
}

impl Style {
    /// The escape sequence that turns this style on.
    pub fn code(self) -> &'static str {
        match self {
            Style::Primary => ANSI_BRIGHT_CYAN,
            Style::Secondary => ANSI_BRIGHT_MAGENTA,
            Style::Success => ANSI_BRIGHT_GREEN,
            Style::Warning => ANSI_BRIGHT_YELLOW,
            Style::Error => ANSI_BRIGHT_RED,
            Style::Reset => ANSI_RESET,
            Style::Bold => ANSI_BOLD,
        }
    }
}

/// Wraps `text` in `style`, followed by a reset.
pub fn styled(text: &str, style: Style) -> String {
    format!("{}{text}{ANSI_RESET}", style.code())
}

/// Removes the markdown emphasis the typing effect does not render.
pub fn strip_markdown(text: &str) -> String {
    text.replace("**", "").replace('`', "")
}

/// Splits text into escape sequences and single characters.
///
/// Escape sequences stay whole so the typing effect never cuts one apart.
fn typing_units(text: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut rest = text;
    while let Some(first) = rest.chars().next() {
        let len = if first == '\x1b' && rest[1..].starts_with('[') {
            rest[2..]
                .find(|c: char| c.is_ascii_alphabetic())
                .map(|end| end + 3)
                .unwrap_or(rest.len())
        } else {
            first.len_utf8()
        };
        units.push(&rest[..len]);
        rest = &rest[len..];
    }
    units
}

/// Trait for rendering chat output.
pub trait Renderer {
    /// Styles text for embedding in a larger line.
    ///
    /// Returns the text unchanged when color is disabled.
    fn paint(&self, text: &str, style: Style) -> String;

    /// Prints a whole line at once in the given style.
    fn print_line(&mut self, text: &str, style: Style);

    /// Prints a whole line that is already styled.
    fn print_plain(&mut self, text: &str);

    /// Prints text one character at a time, then a newline.
    fn type_text(&mut self, text: &str, style: Style);

    /// Prints an error message.
    fn print_error(&mut self, error: &str) {
        self.type_text(error, Style::Error);
    }

    /// Clears the terminal.
    fn clear_screen(&mut self);
}

/// Renderer writing to a terminal (stdout by default).
pub struct PlainTextRenderer<W: Write = Stdout> {
    out: W,
    use_color: bool,
    typing_delay: Duration,
    interrupted: Option<Arc<AtomicBool>>,
}

impl PlainTextRenderer<Stdout> {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_writer(io::stdout(), true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self::with_writer(io::stdout(), use_color)
    }
}

impl Default for PlainTextRenderer<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> PlainTextRenderer<W> {
    /// Creates a renderer over an arbitrary writer.
    pub fn with_writer(out: W, use_color: bool) -> Self {
        Self {
            out,
            use_color,
            typing_delay: DEFAULT_TYPING_DELAY,
            interrupted: None,
        }
    }

    /// Sets the per-character delay of the typing effect.
    pub fn with_typing_delay(mut self, delay: Duration) -> Self {
        self.typing_delay = delay;
        self
    }

    /// Finishes typing immediately once `flag` is raised.
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupted = Some(flag);
        self
    }

    /// Returns the underlying writer.
    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Flushes the writer to ensure immediate display.
    fn flush(&mut self) {
        let _ = self.out.flush();
    }

    fn is_interrupted(&self) -> bool {
        self.interrupted
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

impl<W: Write> Renderer for PlainTextRenderer<W> {
    fn paint(&self, text: &str, style: Style) -> String {
        if self.use_color {
            styled(text, style)
        } else {
            text.to_string()
        }
    }

    fn print_line(&mut self, text: &str, style: Style) {
        let line = self.paint(text, style);
        let _ = writeln!(self.out, "{line}");
        self.flush();
    }

    fn print_plain(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
        self.flush();
    }

    fn type_text(&mut self, text: &str, style: Style) {
        let text = strip_markdown(text);
        // One style code for the whole run renders the same as styling each character.
        if self.use_color {
            let _ = write!(self.out, "{}", style.code());
        }
        for unit in typing_units(&text) {
            if unit.starts_with('\x1b') {
                let _ = write!(self.out, "{unit}");
                // An embedded reset ends the inner style, not the outer one.
                if self.use_color && unit == ANSI_RESET {
                    let _ = write!(self.out, "{}", style.code());
                }
                continue;
            }
            let _ = write!(self.out, "{unit}");
            if !self.typing_delay.is_zero() && !self.is_interrupted() {
                self.flush();
                thread::sleep(self.typing_delay);
            }
        }
        if self.use_color {
            let _ = write!(self.out, "{ANSI_RESET}");
        }
        let _ = writeln!(self.out);
        self.flush();
    }

    fn clear_screen(&mut self) {
        if self.use_color {
            let _ = write!(self.out, "{ANSI_CLEAR_SCREEN}");
            self.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_renderer(use_color: bool) -> PlainTextRenderer<Vec<u8>> {
        PlainTextRenderer::with_writer(Vec::new(), use_color).with_typing_delay(Duration::ZERO)
    }

    fn output(renderer: &PlainTextRenderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.writer().clone()).unwrap()
    }

    #[test]
    fn renderer_default_has_color() {
        let renderer = PlainTextRenderer::new();
        assert!(renderer.use_color);
        assert_eq!(renderer.typing_delay, DEFAULT_TYPING_DELAY);
    }

    #[test]
    fn renderer_without_color() {
        let renderer = PlainTextRenderer::with_color(false);
        assert!(!renderer.use_color);
    }

    #[test]
    fn styled_always_resets() {
        assert_eq!(styled("hi", Style::Error), "\x1b[91mhi\x1b[0m");
        assert_eq!(styled("hi", Style::Bold), "\x1b[1mhi\x1b[0m");
        assert_eq!(styled("", Style::Primary), "\x1b[96m\x1b[0m");
    }

    #[test]
    fn every_style_has_a_code() {
        for style in [
            Style::Primary,
            Style::Secondary,
            Style::Success,
            Style::Warning,
            Style::Error,
            Style::Reset,
            Style::Bold,
        ] {
            assert!(style.code().starts_with("\x1b["));
        }
    }

    #[test]
    fn typing_strips_markdown() {
        let mut renderer = buffer_renderer(false);
        renderer.type_text("AI: **bold** and `code`", Style::Primary);
        assert_eq!(output(&renderer), "AI: bold and code\n");
    }

    #[test]
    fn typing_keeps_escape_sequences_whole() {
        assert_eq!(
            typing_units("a\x1b[93mb\x1b[0m"),
            vec!["a", "\x1b[93m", "b", "\x1b[0m"]
        );
        assert_eq!(typing_units("é!"), vec!["é", "!"]);
    }

    #[test]
    fn colored_typing_styles_the_whole_run_once() {
        let mut renderer = buffer_renderer(true);
        renderer.type_text("abc", Style::Warning);
        let expected = format!("{}abc{ANSI_RESET}\n", Style::Warning.code());
        assert_eq!(output(&renderer), expected);
    }

    #[test]
    fn typing_restores_outer_style_after_inner_reset() {
        let mut renderer = buffer_renderer(true);
        let inner = styled("x", Style::Warning);
        renderer.type_text(&format!("{inner}y"), Style::Secondary);
        assert_eq!(
            output(&renderer),
            "\x1b[95m\x1b[93mx\x1b[0m\x1b[95my\x1b[0m\n"
        );
    }

    #[test]
    fn plain_output_has_no_escapes() {
        let mut renderer = buffer_renderer(false);
        renderer.clear_screen();
        renderer.print_line("hello", Style::Success);
        assert_eq!(renderer.paint("x", Style::Error), "x");
        assert_eq!(output(&renderer), "hello\n");
    }

    #[test]
    fn interrupted_typing_finishes_immediately() {
        let flag = Arc::new(AtomicBool::new(true));
        let mut renderer = PlainTextRenderer::with_writer(Vec::new(), false)
            .with_typing_delay(Duration::from_secs(10))
            .with_interrupt(flag);
        renderer.type_text("no waiting here", Style::Primary);
        assert_eq!(output(&renderer), "no waiting here\n");
    }
}
