//! Display category for a tri-state color code.

use super::contracts::ContractViolation;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

/// How a guessed letter relates to the secret word.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LetterColor {
    /// Letter is in the word, at another position. Code `-1`.
    Displaced,
    /// Letter is not in the word. Code `0`.
    Absent,
    /// Letter is in the word at this position. Code `1`.
    Correct,
}

impl LetterColor {
    /// Maps a wire code to its category.
    ///
    /// Codes outside {-1, 0, 1} are a contract violation; there is no default.
    pub fn from_code(code: i64) -> Result<Self, ContractViolation> {
        match code {
            -1 => Ok(LetterColor::Displaced),
            0 => Ok(LetterColor::Absent),
            1 => Ok(LetterColor::Correct),
            code => Err(ContractViolation::UnknownColorCode { code }),
        }
    }

    /// Returns the wire code for this category.
    pub fn code(self) -> i64 {
        match self {
            LetterColor::Displaced => -1,
            LetterColor::Absent => 0,
            LetterColor::Correct => 1,
        }
    }

    /// Square glyph used by the plain-text board.
    pub fn square(self) -> &'static str {
        match self {
            LetterColor::Correct => "🟩",
            LetterColor::Displaced => "🟨",
            LetterColor::Absent => "⬛",
        }
    }
}

impl TryFrom<i64> for LetterColor {
    type Error = ContractViolation;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}
