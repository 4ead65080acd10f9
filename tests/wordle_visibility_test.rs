//! Tests for the letter visibility rule.

mod common;

use common::{team, two_guess_state};
use town_wordle::games::wordle::visibility;
use town_wordle::{Cell, ContractViolation, GameState, GameView, PlayerId, Reveal, TeamNumber};

fn letters_of(view: &GameView, team: TeamNumber, row: usize) -> String {
    view.board(team).rows()[row]
        .iter()
        .filter_map(Cell::letter)
        .collect()
}

#[test]
fn test_teammate_sees_own_letters() {
    // alice is on team one, which has guessed CRANE
    let view = GameView::derive(&PlayerId::new("alice"), &two_guess_state(false)).unwrap();
    assert_eq!(view.reveal().team_one, Reveal::Letters);
    assert_eq!(letters_of(&view, TeamNumber::One, 0), "CRANE");
}

#[test]
fn test_opponent_sees_only_colors_during_game() {
    // carol is on team two and must not read team one's words
    let view = GameView::derive(&PlayerId::new("carol"), &two_guess_state(false)).unwrap();
    assert_eq!(view.reveal().team_one, Reveal::ColorsOnly);
    assert_eq!(view.reveal().team_two, Reveal::Letters);

    let row = &view.board(TeamNumber::One).rows()[0];
    assert!(row.iter().all(|cell| cell.letter().is_none()));
    assert!(row.iter().all(Cell::is_filled));
    assert_eq!(letters_of(&view, TeamNumber::One, 1), "");
    assert_eq!(view.board(TeamNumber::One).played_rows(), 2);
    for row in &view.board(TeamNumber::One).rows()[2..] {
        assert!(row.iter().all(|cell| *cell == Cell::BLANK));
    }
    assert_eq!(view.board(TeamNumber::Two).played_rows(), 0);
}

#[test]
fn test_opponent_sees_letters_after_game_over() {
    let view = GameView::derive(&PlayerId::new("carol"), &two_guess_state(true)).unwrap();
    assert_eq!(view.reveal().team_one, Reveal::Letters);
    assert_eq!(letters_of(&view, TeamNumber::One, 0), "CRANE");
    assert_eq!(letters_of(&view, TeamNumber::One, 1), "SAUTE");
    assert!(view.is_game_over());
}

#[test]
fn test_spectator_sees_both_teams() {
    let view = GameView::derive(&PlayerId::new("erin"), &two_guess_state(false)).unwrap();
    assert_eq!(view.reveal().team_one, Reveal::Letters);
    assert_eq!(view.reveal().team_two, Reveal::Letters);
    assert_eq!(letters_of(&view, TeamNumber::One, 0), "CRANE");
}

#[test]
fn test_colors_identical_for_every_observer() {
    let state = two_guess_state(false);
    let colors = |observer: &str| {
        let view = GameView::derive(&PlayerId::new(observer), &state).unwrap();
        view.board(TeamNumber::One).rows()[0]
            .iter()
            .map(Cell::color)
            .collect::<Vec<_>>()
    };
    assert_eq!(colors("alice"), colors("carol"));
    assert_eq!(colors("carol"), colors("erin"));
}

#[test]
fn test_absent_teams_hide_nothing() {
    let reveal = visibility::decide(&PlayerId::new("alice"), None, None, false).unwrap();
    assert_eq!(reveal.for_team(TeamNumber::One), Reveal::Letters);
    assert_eq!(reveal.for_team(TeamNumber::Two), Reveal::Letters);
}

#[test]
fn test_reveal_follows_roster_when_other_team_absent() {
    // bob is on team two; team one has not been formed yet
    let two = team(&["bob"], vec![]);
    let reveal = visibility::decide(&PlayerId::new("bob"), None, Some(&two), false).unwrap();
    assert_eq!(reveal.team_two, Reveal::Letters);
    assert_eq!(reveal.team_one, Reveal::ColorsOnly);
}

#[test]
fn test_observer_on_both_rosters_is_violation() {
    let state = GameState {
        team_one: Some(team(&["alice"], vec![])),
        team_two: Some(team(&["alice", "bob"], vec![])),
        game_over: false,
    };
    let result = visibility::decide_for(&PlayerId::new("alice"), &state);
    assert_eq!(
        result,
        Err(ContractViolation::ObserverOnBothTeams {
            player: PlayerId::new("alice")
        })
    );
    assert!(GameView::derive(&PlayerId::new("alice"), &state).is_err());
    // Other observers are unaffected
    assert!(GameView::derive(&PlayerId::new("bob"), &state).is_ok());
}
