//! Everything one observer sees of a snapshot.

use super::board::Board;
use super::contracts::ContractViolation;
use super::types::{GameState, PlayerId, TeamNumber};
use super::visibility::{self, TeamReveal};
use tracing::{debug, instrument};

/// Both boards derived for one observer from one snapshot.
///
/// Derivation is pure: the same snapshot and observer always give an equal
/// view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameView {
    team_one: Board,
    team_two: Board,
    reveal: TeamReveal,
    observer_team: Option<TeamNumber>,
    game_over: bool,
}

impl GameView {
    /// Derives the view of `state` for `observer`.
    #[instrument(skip(state), fields(observer = %observer, game_over = state.game_over))]
    pub fn derive(observer: &PlayerId, state: &GameState) -> Result<Self, ContractViolation> {
        let reveal = visibility::decide_for(observer, state)?;

        let team_one = Board::derive_team(
            TeamNumber::One,
            state.team(TeamNumber::One),
            reveal.team_one,
        )?;
        let team_two = Board::derive_team(
            TeamNumber::Two,
            state.team(TeamNumber::Two),
            reveal.team_two,
        )?;

        let observer_team = if state.is_member(TeamNumber::One, observer) {
            Some(TeamNumber::One)
        } else if state.is_member(TeamNumber::Two, observer) {
            Some(TeamNumber::Two)
        } else {
            None
        };

        debug!(
            team_one_rows = team_one.played_rows(),
            team_two_rows = team_two.played_rows(),
            ?observer_team,
            "View derived"
        );

        Ok(Self {
            team_one,
            team_two,
            reveal,
            observer_team,
            game_over: state.game_over,
        })
    }

    /// Returns the board of the given team.
    pub fn board(&self, team: TeamNumber) -> &Board {
        match team {
            TeamNumber::One => &self.team_one,
            TeamNumber::Two => &self.team_two,
        }
    }

    /// Returns the reveal decision used for both boards.
    pub fn reveal(&self) -> TeamReveal {
        self.reveal
    }

    /// Returns the observer's team, or `None` for a spectator.
    pub fn observer_team(&self) -> Option<TeamNumber> {
        self.observer_team
    }

    /// Returns true if the snapshot reported the game as over.
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Formats both boards as text, one after the other.
    pub fn display(&self) -> String {
        let heading = |team: TeamNumber| {
            if self.observer_team == Some(team) {
                format!("{} (your team)", team)
            } else {
                team.to_string()
            }
        };
        let status = if self.game_over { "Game over" } else { "In progress" };
        format!(
            "{}\n\n{}\n{}\n\n{}\n{}",
            status,
            heading(TeamNumber::One),
            self.team_one.display(),
            heading(TeamNumber::Two),
            self.team_two.display()
        )
    }
}
