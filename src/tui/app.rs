//! Screen state that is not game state.

use super::input::{GuessInput, InputOutcome};
use crate::render_loop::Commit;
use crossterm::event::KeyCode;
use tracing::debug;

/// Input buffer and the local status line.
///
/// Game state lives in the render loop; this only tracks what the player is
/// typing and hints about it.
#[derive(Debug, Default)]
pub struct App {
    input: GuessInput,
    hint: Option<String>,
}

impl App {
    /// Creates a new application.
    pub fn new() -> Self {
        Self::default()
    }

    /// Letters typed so far.
    pub fn input(&self) -> &str {
        self.input.as_str()
    }

    /// Local hint, if any.
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Applies a key press and reports what it asks for.
    pub fn handle_key(&mut self, key: KeyCode) -> InputOutcome {
        let outcome = self.input.handle_key(key);
        debug!(?key, ?outcome, "Key handled");
        self.hint = match &outcome {
            InputOutcome::Incomplete => Some("Guesses need five letters".to_string()),
            InputOutcome::Submit(word) => Some(format!("Sending {}...", word)),
            _ => None,
        };
        outcome
    }

    /// Clears the sending hint once the loop has answered.
    pub fn note(&mut self, commit: &Commit) {
        if matches!(commit, Commit::GuessAccepted(_) | Commit::GuessRejected) {
            self.hint = None;
        }
    }
}
