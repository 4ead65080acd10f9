//! Keyboard entry of a guess.

use crate::games::wordle::WORD_LENGTH;
use crossterm::event::KeyCode;

/// What a key press asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// The buffer changed.
    Edited,
    /// A full word was entered and the buffer cleared.
    Submit(String),
    /// Enter was pressed before the word was complete.
    Incomplete,
    /// The player wants to leave.
    Quit,
    /// The key does nothing here.
    Ignored,
}

/// Letters typed so far for the next guess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuessInput {
    buffer: String,
}

impl GuessInput {
    /// Creates an empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Letters typed so far, uppercased.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Applies one key press.
    pub fn handle_key(&mut self, key: KeyCode) -> InputOutcome {
        match key {
            KeyCode::Esc => InputOutcome::Quit,
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                if self.buffer.len() >= WORD_LENGTH {
                    return InputOutcome::Ignored;
                }
                self.buffer.push(c.to_ascii_uppercase());
                InputOutcome::Edited
            }
            KeyCode::Backspace => {
                if self.buffer.pop().is_some() {
                    InputOutcome::Edited
                } else {
                    InputOutcome::Ignored
                }
            }
            KeyCode::Enter => {
                if self.buffer.len() == WORD_LENGTH {
                    InputOutcome::Submit(std::mem::take(&mut self.buffer))
                } else {
                    InputOutcome::Incomplete
                }
            }
            _ => InputOutcome::Ignored,
        }
    }
}
