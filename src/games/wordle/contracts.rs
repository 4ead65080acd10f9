//! Checks that a snapshot honors the agreed data model.
//!
//! A failure here means the server and this client have drifted apart. It is
//! never a condition to recover from: nothing is defaulted or clamped.

use super::types::{Guess, MAX_GUESSES, PlayerId, TeamNumber, WORD_LENGTH};
use derive_more::{Display, Error};
use tracing::{error, instrument};

/// The server sent data outside the agreed model.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ContractViolation {
    /// A color code outside {-1, 0, 1}.
    #[display("Color code {} is outside {{-1, 0, 1}}", code)]
    UnknownColorCode {
        /// The offending code.
        code: i64,
    },

    /// A guess whose word and color codes are not both `WORD_LENGTH` long.
    #[display(
        "{} guess {} has {} letters and {} color codes, expected {}",
        team,
        index,
        letters,
        colors,
        WORD_LENGTH
    )]
    LengthMismatch {
        /// Team that owns the guess.
        team: TeamNumber,
        /// Row of the guess.
        index: usize,
        /// Letters in the word.
        letters: usize,
        /// Entries in the color code array.
        colors: usize,
    },

    /// More guesses than the board has rows.
    #[display("{} has {} guesses, at most {} allowed", team, count, MAX_GUESSES)]
    TooManyGuesses {
        /// Team that overflowed.
        team: TeamNumber,
        /// Guesses received.
        count: usize,
    },

    /// The observer is listed on both rosters.
    #[display("Player {} is on both team rosters", player)]
    ObserverOnBothTeams {
        /// The observer.
        player: PlayerId,
    },
}

impl ContractViolation {
    /// Logs the violation at error level and hands it back.
    #[track_caller]
    pub fn report(self) -> Self {
        let loc = std::panic::Location::caller();
        error!(violation = %self, file = loc.file(), line = loc.line(), "Contract violation");
        self
    }
}

/// Rejects a guess list that cannot fit on the board.
#[instrument(skip(guesses), fields(count = guesses.len()))]
pub fn check_guess_count(team: TeamNumber, guesses: &[Guess]) -> Result<(), ContractViolation> {
    if guesses.len() > MAX_GUESSES {
        return Err(ContractViolation::TooManyGuesses {
            team,
            count: guesses.len(),
        });
    }
    Ok(())
}

/// Rejects a guess whose letters and codes are not both `WORD_LENGTH` long.
pub fn check_guess_shape(
    team: TeamNumber,
    index: usize,
    guess: &Guess,
) -> Result<(), ContractViolation> {
    let letters = guess.letter_count();
    let colors = guess.color_codes().len();
    if letters != WORD_LENGTH || colors != WORD_LENGTH {
        return Err(ContractViolation::LengthMismatch {
            team,
            index,
            letters,
            colors,
        });
    }
    Ok(())
}
