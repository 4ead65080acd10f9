//! Two-team Wordle: snapshot types and the pure derivation pipeline.
//!
//! A snapshot flows through three pure steps on every refresh:
//!
//! 1. [`visibility`] decides, per team, whether the observer sees letters.
//! 2. [`board`] lays each team's guesses out on a fixed 6x5 grid.
//! 3. [`color`] maps every tri-state code to a display category.
//!
//! [`GameView`] bundles the result for one observer.

pub mod board;
pub mod color;
pub mod contracts;
pub mod types;
pub mod view;
pub mod visibility;

pub use board::{Board, Cell, Row};
pub use color::LetterColor;
pub use contracts::ContractViolation;
pub use types::{GameState, Guess, MAX_GUESSES, PlayerId, TeamNumber, TeamState, WORD_LENGTH};
pub use view::GameView;
pub use visibility::{Reveal, TeamReveal};
