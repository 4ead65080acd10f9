//! Who may see which team's letters.
//!
//! Letters of team X are shown to observer P iff P is not on the team
//! opposing X, or the game is over. Colors are never gated. A spectator is on
//! neither roster and therefore sees both teams' letters.

use super::contracts::ContractViolation;
use super::types::{GameState, PlayerId, TeamNumber, TeamState};
use tracing::{debug, instrument};

/// Whether a team's letters are shown to an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reveal {
    /// Letters and colors are shown.
    Letters,
    /// Only colors are shown; letters render as empty glyphs.
    ColorsOnly,
}

impl Reveal {
    /// Returns true if letters are shown.
    pub fn shows_letters(self) -> bool {
        matches!(self, Reveal::Letters)
    }
}

/// Reveal decision for both teams, for one observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TeamReveal {
    /// Decision for team one's guesses.
    pub team_one: Reveal,
    /// Decision for team two's guesses.
    pub team_two: Reveal,
}

impl TeamReveal {
    /// Returns the decision for the given team.
    pub fn for_team(&self, team: TeamNumber) -> Reveal {
        match team {
            TeamNumber::One => self.team_one,
            TeamNumber::Two => self.team_two,
        }
    }
}

/// Decides what `observer` may see of each team.
///
/// An absent team has no members. An observer on both rosters is reported as
/// a contract violation.
#[instrument(skip(team_one, team_two), fields(observer = %observer))]
pub fn decide(
    observer: &PlayerId,
    team_one: Option<&TeamState>,
    team_two: Option<&TeamState>,
    game_over: bool,
) -> Result<TeamReveal, ContractViolation> {
    let on_one = team_one.is_some_and(|team| team.contains(observer));
    let on_two = team_two.is_some_and(|team| team.contains(observer));

    if on_one && on_two {
        return Err(ContractViolation::ObserverOnBothTeams {
            player: observer.clone(),
        });
    }

    let gate = |on_opposing_team: bool| {
        if !on_opposing_team || game_over {
            Reveal::Letters
        } else {
            Reveal::ColorsOnly
        }
    };

    let reveal = TeamReveal {
        team_one: gate(on_two),
        team_two: gate(on_one),
    };
    debug!(on_one, on_two, game_over, ?reveal, "Visibility decided");
    Ok(reveal)
}

/// Applies [`decide`] to a snapshot.
pub fn decide_for(observer: &PlayerId, state: &GameState) -> Result<TeamReveal, ContractViolation> {
    decide(
        observer,
        state.team(TeamNumber::One),
        state.team(TeamNumber::Two),
        state.game_over,
    )
}
