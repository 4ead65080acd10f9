//! Core domain types for two-team Wordle snapshots.

use derive_getters::Getters;
use derive_more::{Display, From};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strum::EnumIter;

/// Letters per guess.
pub const WORD_LENGTH: usize = 5;

/// Attempts each team gets.
pub const MAX_GUESSES: usize = 6;

/// Opaque identifier of a connected player.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Creates a player identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One of the two teams. Addressed as `1` and `2` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(into = "u8", try_from = "u8")]
pub enum TeamNumber {
    /// First team.
    #[display("Team One")]
    One,
    /// Second team.
    #[display("Team Two")]
    Two,
}

impl TeamNumber {
    /// Returns the opposing team.
    pub fn opponent(self) -> Self {
        match self {
            TeamNumber::One => TeamNumber::Two,
            TeamNumber::Two => TeamNumber::One,
        }
    }

    /// Returns the wire number of this team.
    pub fn number(self) -> u8 {
        match self {
            TeamNumber::One => 1,
            TeamNumber::Two => 2,
        }
    }
}

impl From<TeamNumber> for u8 {
    fn from(team: TeamNumber) -> Self {
        team.number()
    }
}

impl TryFrom<u8> for TeamNumber {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TeamNumber::One),
            2 => Ok(TeamNumber::Two),
            other => Err(format!("team number must be 1 or 2, got {}", other)),
        }
    }
}

/// A guessed word with its server-computed color codes.
///
/// Codes are positionally aligned with the letters of `word`: `-1` for a
/// letter present elsewhere, `0` for an absent letter, `1` for a letter in
/// the right place. Length and domain are checked during board derivation,
/// not on deserialization, so a drifting server is reported rather than
/// rejected as a transport failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct Guess {
    /// The guessed word, one character per letter.
    #[new(into)]
    word: String,
    /// Tri-state code per letter.
    color_codes: Vec<i64>,
}

impl Guess {
    /// Iterates over the letters of the word.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.word.chars()
    }

    /// Returns the number of letters in the word.
    pub fn letter_count(&self) -> usize {
        self.word.chars().count()
    }
}

/// A team's roster and its guesses so far, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct TeamState {
    /// Players on the team. Only membership matters.
    #[serde(default)]
    members: HashSet<PlayerId>,
    /// Guesses in submission order.
    #[serde(default)]
    guesses: Vec<Guess>,
}

impl TeamState {
    /// Returns true if `player` is on this team.
    pub fn contains(&self, player: &PlayerId) -> bool {
        self.members.contains(player)
    }
}

/// Immutable snapshot of a game as the server reports it.
///
/// A team is absent before the game starts or while it has no players.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// First team, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_one: Option<TeamState>,
    /// Second team, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_two: Option<TeamState>,
    /// Whether the game has ended.
    #[serde(default)]
    pub game_over: bool,
}

impl GameState {
    /// Returns the state of the given team, if present.
    pub fn team(&self, team: TeamNumber) -> Option<&TeamState> {
        match team {
            TeamNumber::One => self.team_one.as_ref(),
            TeamNumber::Two => self.team_two.as_ref(),
        }
    }

    /// Returns true if `player` is on the given team's roster.
    pub fn is_member(&self, team: TeamNumber, player: &PlayerId) -> bool {
        self.team(team).is_some_and(|state| state.contains(player))
    }
}
