//! Interactive model selection.

use crate::chat::Console;
use crate::chat::input::InputEvent;
use crate::error::{Error, Result};
use crate::models::ModelRegistry;
use crate::render::Style;

/// Invalid answers tolerated before selection gives up.
pub const MAX_SELECTION_ATTEMPTS: usize = 5;

/// Lists the registry and asks for a key until a valid one is entered.
///
/// Returns a selection error when the registry is empty, when input ends or
/// is interrupted, or after [`MAX_SELECTION_ATTEMPTS`] invalid answers.
pub fn select_model(registry: &ModelRegistry, console: &mut Console<'_>) -> Result<String> {
    if registry.is_empty() {
        return Err(Error::selection("the model list is empty"));
    }

    console.renderer.clear_screen();
    console
        .renderer
        .print_line("Available AI Models:", Style::Primary);
    for entry in registry.entries() {
        let key = console.renderer.paint(&entry.key, Style::Warning);
        console
            .renderer
            .print_plain(&format!("  {key}: {}", entry.identifier));
    }

    let prompt = console.renderer.paint(
        &format!("Select model (1-{}): ", registry.len()),
        Style::Primary,
    );
    for _ in 0..MAX_SELECTION_ATTEMPTS {
        console.renderer.print_plain("");
        let choice = match console.input.read_line(&prompt)? {
            InputEvent::Line(line) => line,
            InputEvent::Interrupted | InputEvent::Eof => {
                return Err(Error::selection("selection aborted"));
            }
        };
        if let Some(identifier) = registry.get(choice.trim()) {
            tracing::debug!(model = identifier, "model selected");
            return Ok(identifier.to_string());
        }
        console
            .renderer
            .print_line("Invalid selection. Please try again.", Style::Error);
    }

    Err(Error::selection(format!(
        "no valid choice after {MAX_SELECTION_ATTEMPTS} attempts"
    )))
}
