//! Shared fixtures for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use town_wordle::{
    GameSessionClient, GameSessionDescriptor, GameState, Guess, Method, PlayerId, RequestError,
    TeamState, Transport, TransportClient, TransportRequest,
};

type Responder = Box<dyn Fn(&TransportRequest) -> Result<Value, RequestError> + Send + Sync>;

/// In-memory transport answering from a closure.
///
/// When gated, GET requests wait for a permit before answering, which keeps
/// a fetch in flight for as long as a test needs.
pub struct ScriptedTransport {
    respond: Responder,
    gate: Option<Semaphore>,
    requests: Mutex<Vec<TransportRequest>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl std::fmt::Debug for ScriptedTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedTransport")
            .field("requests", &self.request_count())
            .finish()
    }
}

impl ScriptedTransport {
    /// Answers every request immediately.
    pub fn new(
        respond: impl Fn(&TransportRequest) -> Result<Value, RequestError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            respond: Box::new(respond),
            gate: None,
            requests: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        })
    }

    /// Holds GET requests until [`release`](Self::release) is called.
    pub fn gated(
        respond: impl Fn(&TransportRequest) -> Result<Value, RequestError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            respond: Box::new(respond),
            gate: Some(Semaphore::new(0)),
            requests: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        })
    }

    /// Lets `count` held GET requests answer.
    pub fn release(&self, count: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(count);
        }
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests received.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Number of GET requests received.
    pub fn fetch_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|request| *request.method() == Method::Get)
            .count()
    }

    /// Highest number of requests that were in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Yields until at least `count` requests have arrived.
    pub async fn wait_for_requests(&self, count: usize) {
        while self.request_count() < count {
            tokio::task::yield_now().await;
        }
    }

    /// Client over a shared handle to this transport.
    pub fn client(self: &Arc<Self>) -> GameSessionClient {
        let transport: Arc<dyn Transport> = self.clone();
        GameSessionClient::new(TransportClient::from_arc(transport))
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: TransportRequest) -> Result<Value, RequestError> {
        self.requests.lock().unwrap().push(request.clone());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if *request.method() == Method::Get {
            if let Some(gate) = &self.gate {
                gate.acquire().await.unwrap().forget();
            }
        }

        let result = (self.respond)(&request);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// Descriptor used across tests.
pub fn descriptor() -> GameSessionDescriptor {
    GameSessionDescriptor::new("town-1", "token-abc", "Wordle Corner")
}

/// A team with the given members and guesses.
pub fn team(members: &[&str], guesses: Vec<Guess>) -> TeamState {
    let members: HashSet<PlayerId> = members.iter().map(|m| PlayerId::new(*m)).collect();
    TeamState::new(members, guesses)
}

/// Team one has guessed CRANE and SAUTE; team two has not guessed yet.
pub fn two_guess_state(game_over: bool) -> GameState {
    GameState {
        team_one: Some(team(
            &["alice", "bob"],
            vec![
                Guess::new("CRANE", vec![0, 1, -1, 0, 0]),
                Guess::new("SAUTE", vec![1, 1, 1, 1, 1]),
            ],
        )),
        team_two: Some(team(&["carol", "dave"], vec![])),
        game_over,
    }
}

/// Successful envelope wrapping a fetch-state payload.
pub fn state_envelope(state: &GameState) -> Value {
    json!({ "isOK": true, "response": { "state": state } })
}

/// Successful envelope with no payload.
pub fn ack_envelope() -> Value {
    json!({ "isOK": true })
}
