//! Plain-text rendering of turns and session status.

use letrades_core::message::Turn;

/// Shown while a request is in flight.
pub const LOADING_INDICATOR: &str = "Thinking...";

/// Shown before the first turn.
pub const INPUT_PLACEHOLDER: &str = "Tell us what you need...";

/// One line per turn, prefixed by its author.
pub fn render_turn(turn: &Turn) -> String {
    let author = if turn.is_user { "You" } else { "Assistant" };
    format!("{author}: {}", turn.text)
}

/// Render every turn from `from` up to and including the newest one.
pub fn render_since(turns: &[Turn], from: usize) -> Vec<String> {
    turns.iter().skip(from).map(render_turn).collect()
}
