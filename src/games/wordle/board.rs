//! Fixed-size board derived from a team's guesses.

use super::color::LetterColor;
use super::contracts::{self, ContractViolation};
use super::types::{Guess, MAX_GUESSES, TeamNumber, TeamState, WORD_LENGTH};
use super::visibility::Reveal;
use tracing::{instrument, trace};

/// One square of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    letter: Option<char>,
    color: Option<LetterColor>,
}

impl Cell {
    /// An unplayed, unfilled cell.
    pub const BLANK: Cell = Cell {
        letter: None,
        color: None,
    };

    /// The letter, if played and revealed.
    pub fn letter(&self) -> Option<char> {
        self.letter
    }

    /// The color, if played. Played cells always carry one.
    pub fn color(&self) -> Option<LetterColor> {
        self.color
    }

    /// Returns true if this cell belongs to a played guess.
    pub fn is_filled(&self) -> bool {
        self.color.is_some()
    }
}

/// One row of cells.
pub type Row = [Cell; WORD_LENGTH];

const BLANK_ROW: Row = [Cell::BLANK; WORD_LENGTH];

/// A team's 6x5 grid, oldest guess on top.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: [Row; MAX_GUESSES],
}

impl Board {
    /// A board with no guesses played.
    pub fn blank() -> Self {
        Self {
            rows: [BLANK_ROW; MAX_GUESSES],
        }
    }

    /// Lays `guesses` out row by row, gating letters by `reveal`.
    ///
    /// Rows past the last guess stay blank. Colors are shown regardless of
    /// `reveal`.
    #[instrument(skip(guesses), fields(guesses = guesses.len()))]
    pub fn derive(
        team: TeamNumber,
        guesses: &[Guess],
        reveal: Reveal,
    ) -> Result<Self, ContractViolation> {
        contracts::check_guess_count(team, guesses)?;

        let mut board = Self::blank();
        for (index, guess) in guesses.iter().enumerate() {
            board.rows[index] = derive_row(team, index, guess, reveal)?;
        }
        trace!(board = %board.display(), "Board derived");
        Ok(board)
    }

    /// Derives the board of a possibly absent team.
    pub fn derive_team(
        team: TeamNumber,
        state: Option<&TeamState>,
        reveal: Reveal,
    ) -> Result<Self, ContractViolation> {
        match state {
            Some(state) => Self::derive(team, state.guesses(), reveal),
            None => Ok(Self::blank()),
        }
    }

    /// All rows, top to bottom.
    pub fn rows(&self) -> &[Row; MAX_GUESSES] {
        &self.rows
    }

    /// Number of rows holding a guess.
    pub fn played_rows(&self) -> usize {
        self.rows
            .iter()
            .take_while(|row| row.iter().any(Cell::is_filled))
            .count()
    }

    /// Formats the board as text: a letter line and a color line per row.
    ///
    /// Hidden letters print as `_`, unplayed cells as `·` over `⬜`.
    pub fn display(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                let letters = row
                    .iter()
                    .map(|cell| match (cell.letter, cell.color) {
                        (Some(letter), _) => letter.to_string(),
                        (None, Some(_)) => "_".to_string(),
                        (None, None) => "·".to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join("  ");
                let colors: String = row
                    .iter()
                    .map(|cell| cell.color.map_or("⬜", LetterColor::square))
                    .collect();
                format!("{}\n{}", letters, colors)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::blank()
    }
}

fn derive_row(
    team: TeamNumber,
    index: usize,
    guess: &Guess,
    reveal: Reveal,
) -> Result<Row, ContractViolation> {
    contracts::check_guess_shape(team, index, guess)?;

    let mut row = BLANK_ROW;
    for ((cell, letter), code) in row
        .iter_mut()
        .zip(guess.letters())
        .zip(guess.color_codes().iter().copied())
    {
        *cell = Cell {
            letter: reveal.shows_letters().then_some(letter),
            color: Some(LetterColor::from_code(code)?),
        };
    }
    Ok(row)
}
