//! Tests for the refresh state machine.

mod common;

use common::{ScriptedTransport, ack_envelope, descriptor, state_envelope, team, two_guess_state};
use serde_json::json;
use town_wordle::{
    Activation, Commit, ContractViolation, GameState, Guess, LoopEvent, LoopState, Method, Notice,
    PlayerId, RefreshError, RenderLoop, RequestError, TeamNumber, Trigger,
};

fn scripted_state(request: &town_wordle::TransportRequest) -> Result<serde_json::Value, RequestError> {
    match request.method() {
        Method::Get => Ok(state_envelope(&two_guess_state(false))),
        Method::Post => Ok(ack_envelope()),
    }
}

#[tokio::test]
async fn test_rapid_activations_start_one_fetch() {
    let transport = ScriptedTransport::gated(scripted_state);
    let (mut render_loop, mut events) =
        RenderLoop::new(transport.client(), descriptor(), PlayerId::new("alice"));

    assert_eq!(
        render_loop.activate(Trigger::Entered),
        Activation::Started { epoch: 0 }
    );
    assert_eq!(render_loop.state(), LoopState::Refreshing);
    for _ in 0..5 {
        assert_eq!(render_loop.activate(Trigger::Tick), Activation::Coalesced);
    }

    transport.wait_for_requests(1).await;
    transport.release(1);
    let event = events.recv().await.unwrap();
    assert_eq!(render_loop.handle(event), Commit::Refreshed);

    assert_eq!(render_loop.state(), LoopState::Idle);
    assert_eq!(transport.fetch_count(), 1);
    assert_eq!(transport.max_in_flight(), 1);
    assert!(render_loop.view().is_some());
}

#[tokio::test]
async fn test_loop_can_refresh_again_after_completion() {
    let transport = ScriptedTransport::new(scripted_state);
    let (mut render_loop, mut events) =
        RenderLoop::new(transport.client(), descriptor(), PlayerId::new("alice"));

    render_loop.activate(Trigger::Entered);
    let event = events.recv().await.unwrap();
    assert_eq!(render_loop.handle(event), Commit::Refreshed);

    assert_eq!(
        render_loop.activate(Trigger::Tick),
        Activation::Started { epoch: 0 }
    );
    let event = events.recv().await.unwrap();
    assert_eq!(render_loop.handle(event), Commit::Refreshed);
    assert_eq!(transport.fetch_count(), 2);
}

#[tokio::test]
async fn test_teardown_discards_in_flight_result() {
    let transport = ScriptedTransport::gated(scripted_state);
    let (mut render_loop, _events) =
        RenderLoop::new(transport.client(), descriptor(), PlayerId::new("alice"));

    render_loop.activate(Trigger::Entered);
    transport.wait_for_requests(1).await;
    render_loop.teardown();

    assert!(render_loop.is_torn_down());
    assert_eq!(render_loop.state(), LoopState::Idle);
    assert_eq!(render_loop.epoch(), 1);

    // A result from the old epoch that slipped through is dropped
    let stale = LoopEvent::Fetched {
        epoch: 0,
        result: Ok(two_guess_state(false)),
    };
    assert_eq!(render_loop.handle(stale), Commit::Discarded);
    assert!(render_loop.view().is_none());

    assert_eq!(render_loop.activate(Trigger::Tick), Activation::TornDown);
    assert!(!render_loop.submit_guess("CRANE"));
    assert_eq!(transport.fetch_count(), 1);
}

#[tokio::test]
async fn test_accepted_guess_triggers_refresh() {
    let transport = ScriptedTransport::new(scripted_state);
    let (mut render_loop, mut events) =
        RenderLoop::new(transport.client(), descriptor(), PlayerId::new("alice"));

    assert!(render_loop.submit_guess("CRANE"));
    let event = events.recv().await.unwrap();
    assert_eq!(
        render_loop.handle(event),
        Commit::GuessAccepted(Activation::Started { epoch: 0 })
    );
    assert_eq!(
        render_loop.notice(),
        Some(&Notice::GuessAccepted("CRANE".to_string()))
    );

    let event = events.recv().await.unwrap();
    assert_eq!(render_loop.handle(event), Commit::Refreshed);

    let requests = transport.requests();
    assert_eq!(requests[0].path(), "/towns/town-1/games/actions");
    assert_eq!(requests[1].path(), "/towns/town-1/games/state");
}

#[tokio::test]
async fn test_guess_during_refresh_schedules_one_follow_up() {
    let transport = ScriptedTransport::gated(scripted_state);
    let (mut render_loop, mut events) =
        RenderLoop::new(transport.client(), descriptor(), PlayerId::new("alice"));

    render_loop.activate(Trigger::Entered);
    render_loop.submit_guess("CRANE");

    // The submission is not gated, so it answers while the fetch is held
    let event = events.recv().await.unwrap();
    assert_eq!(
        render_loop.handle(event),
        Commit::GuessAccepted(Activation::Coalesced)
    );
    render_loop.activate(Trigger::Tick);

    transport.release(1);
    let event = events.recv().await.unwrap();
    assert_eq!(render_loop.handle(event), Commit::Refreshed);
    assert_eq!(render_loop.state(), LoopState::Refreshing);

    transport.release(1);
    let event = events.recv().await.unwrap();
    assert_eq!(render_loop.handle(event), Commit::Refreshed);
    assert_eq!(render_loop.state(), LoopState::Idle);
    assert_eq!(transport.fetch_count(), 2);
}

#[tokio::test]
async fn test_rejected_guess_sets_notice_without_refresh() {
    let transport = ScriptedTransport::new(|request| match request.method() {
        Method::Post => Ok(json!({ "isOK": false, "message": "Not a word" })),
        Method::Get => Ok(state_envelope(&GameState::default())),
    });
    let (mut render_loop, mut events) =
        RenderLoop::new(transport.client(), descriptor(), PlayerId::new("alice"));

    render_loop.submit_guess("QQQQQ");
    let event = events.recv().await.unwrap();
    assert_eq!(render_loop.handle(event), Commit::GuessRejected);
    assert_eq!(render_loop.state(), LoopState::Idle);
    assert_eq!(render_loop.notice().unwrap().to_string(), "Not a word");
    assert_eq!(transport.fetch_count(), 0);
}

#[tokio::test]
async fn test_request_failure_keeps_last_view() {
    let transport = ScriptedTransport::new(scripted_state);
    let (mut render_loop, mut events) =
        RenderLoop::new(transport.client(), descriptor(), PlayerId::new("alice"));

    render_loop.activate(Trigger::Entered);
    let event = events.recv().await.unwrap();
    assert_eq!(render_loop.handle(event), Commit::Refreshed);
    let before = render_loop.view().cloned();

    render_loop.activate(Trigger::Tick);
    let failed = LoopEvent::Fetched {
        epoch: 0,
        result: Err(RequestError::new("timed out")),
    };
    assert_eq!(render_loop.handle(failed), Commit::Failed);
    assert_eq!(render_loop.view().cloned(), before);
    assert!(matches!(render_loop.notice(), Some(Notice::Request(_))));
    assert_eq!(render_loop.state(), LoopState::Idle);

    // The real fetch from the tick now arrives for an idle loop and is dropped
    let late = events.recv().await.unwrap();
    assert_eq!(render_loop.handle(late), Commit::Discarded);
}

#[tokio::test]
async fn test_contract_violation_withholds_boards() {
    let overfull = GameState {
        team_one: Some(team(
            &["alice"],
            (0..7)
                .map(|_| Guess::new("CRANE", vec![0, 0, 0, 0, 0]))
                .collect(),
        )),
        team_two: None,
        game_over: false,
    };
    let body = state_envelope(&overfull);
    let transport = ScriptedTransport::new(move |_| Ok(body.clone()));
    let (mut render_loop, mut events) =
        RenderLoop::new(transport.client(), descriptor(), PlayerId::new("alice"));

    render_loop.activate(Trigger::Entered);
    let event = events.recv().await.unwrap();
    assert_eq!(render_loop.handle(event), Commit::Failed);
    assert!(render_loop.view().is_none());
    assert_eq!(
        render_loop.notice(),
        Some(&Notice::Refresh(RefreshError::Contract(
            ContractViolation::TooManyGuesses {
                team: TeamNumber::One,
                count: 7
            }
        )))
    );
    assert_eq!(render_loop.state(), LoopState::Idle);
}
