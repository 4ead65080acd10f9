//! Poll-and-reconcile state machine behind the game screen.
//!
//! The loop is `Idle` until activated, then `Refreshing` while one fetch is
//! in flight. Activations that arrive while a fetch is in flight are
//! coalesced, never queued. Network work runs on spawned tasks that report
//! back through a channel as [`LoopEvent`]s; the owner feeds those to
//! [`RenderLoop::handle`] from its single driving task.
//!
//! Every fetch is tagged with the loop's epoch. [`RenderLoop::teardown`]
//! aborts the in-flight task and moves to a new epoch, so a result that
//! slips through afterwards is discarded instead of rendered.

use crate::error::{RefreshError, RequestError};
use crate::games::wordle::{GameState, GameView, PlayerId};
use crate::session_client::{GameAction, GameSessionClient, GameSessionDescriptor};
use derive_more::Display;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

/// Whether a fetch is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum LoopState {
    /// No fetch in flight.
    Idle,
    /// One fetch in flight.
    Refreshing,
}

/// Why the loop is being activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The player entered the game area.
    Entered,
    /// The poll interval elapsed.
    Tick,
    /// A submitted action was accepted.
    Submitted,
}

/// Outcome of an activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// A fetch was started in the given epoch.
    Started {
        /// Epoch the fetch belongs to.
        epoch: u64,
    },
    /// A fetch was already in flight; nothing new was started.
    Coalesced,
    /// The loop has been torn down.
    TornDown,
}

/// Result of background work, delivered back to the loop.
#[derive(Debug)]
pub enum LoopEvent {
    /// A state fetch finished.
    Fetched {
        /// Epoch the fetch was started in.
        epoch: u64,
        /// The snapshot or the failure.
        result: Result<GameState, RequestError>,
    },
    /// An action submission finished.
    Submitted {
        /// Epoch the submission was started in.
        epoch: u64,
        /// The guessed word.
        word: String,
        /// Acknowledgment or the failure.
        result: Result<(), RequestError>,
    },
}

/// What handling an event changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commit {
    /// A fresh view was committed.
    Refreshed,
    /// The fetch or derivation failed; the notice says why.
    Failed,
    /// The event belonged to a torn-down epoch and was dropped.
    Discarded,
    /// A guess was accepted and a refresh was requested.
    GuessAccepted(Activation),
    /// A guess was rejected; the notice says why.
    GuessRejected,
}

/// Message shown alongside the boards.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Notice {
    /// A request failed. Transient; the next refresh may clear it.
    #[display("{}", _0.message())]
    Request(RequestError),
    /// The snapshot broke the data model. The boards are withheld.
    #[display("Client and server disagree: {}", _0)]
    Refresh(RefreshError),
    /// A guess went through.
    #[display("Guess {} accepted", _0)]
    GuessAccepted(String),
}

/// Refresh state machine for one game session.
#[derive(Debug)]
pub struct RenderLoop {
    client: GameSessionClient,
    descriptor: GameSessionDescriptor,
    observer: PlayerId,
    state: LoopState,
    epoch: u64,
    torn_down: bool,
    refresh_after_flight: bool,
    in_flight: Option<JoinHandle<()>>,
    events_tx: mpsc::UnboundedSender<LoopEvent>,
    view: Option<GameView>,
    notice: Option<Notice>,
}

impl RenderLoop {
    /// Creates an idle loop and the receiver its background work reports to.
    pub fn new(
        client: GameSessionClient,
        descriptor: GameSessionDescriptor,
        observer: PlayerId,
    ) -> (Self, mpsc::UnboundedReceiver<LoopEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        info!(observer = %observer, area = %descriptor.area_label(), "Render loop created");
        let render_loop = Self {
            client,
            descriptor,
            observer,
            state: LoopState::Idle,
            epoch: 0,
            torn_down: false,
            refresh_after_flight: false,
            in_flight: None,
            events_tx,
            view: None,
            notice: None,
        };
        (render_loop, events_rx)
    }

    /// Starts a fetch unless one is already in flight.
    ///
    /// While refreshing, ticks and entries are ignored. An accepted
    /// submission instead marks the in-flight fetch as stale, so exactly one
    /// follow-up fetch runs when it completes.
    #[instrument(skip(self), fields(epoch = self.epoch, state = %self.state))]
    pub fn activate(&mut self, trigger: Trigger) -> Activation {
        if self.torn_down {
            debug!("Activation after teardown ignored");
            return Activation::TornDown;
        }
        if self.state == LoopState::Refreshing {
            if trigger == Trigger::Submitted {
                self.refresh_after_flight = true;
            }
            debug!("Fetch already in flight, activation coalesced");
            return Activation::Coalesced;
        }

        self.state = LoopState::Refreshing;
        let epoch = self.epoch;
        let client = self.client.clone();
        let descriptor = self.descriptor.clone();
        let events_tx = self.events_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = client.fetch_state(&descriptor).await;
            let _ = events_tx.send(LoopEvent::Fetched { epoch, result });
        }));
        debug!("Fetch started");
        Activation::Started { epoch }
    }

    /// Sends a guess for the observer's team. Returns false after teardown.
    ///
    /// Runs independently of the refresh cycle; acceptance triggers a
    /// refresh when the resulting [`LoopEvent::Submitted`] is handled.
    #[instrument(skip(self), fields(epoch = self.epoch))]
    pub fn submit_guess(&mut self, word: impl Into<String> + std::fmt::Debug) -> bool {
        if self.torn_down {
            warn!("Guess after teardown ignored");
            return false;
        }
        let word = word.into();
        let epoch = self.epoch;
        let client = self.client.clone();
        let descriptor = self.descriptor.clone();
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let action = GameAction::Guess { word: word.clone() };
            let result = client.submit_action(&descriptor, &action).await;
            let _ = events_tx.send(LoopEvent::Submitted {
                epoch,
                word,
                result,
            });
        });
        true
    }

    /// Commits the outcome of background work.
    #[instrument(skip(self, event), fields(epoch = self.epoch))]
    pub fn handle(&mut self, event: LoopEvent) -> Commit {
        match event {
            LoopEvent::Fetched { epoch, result } => {
                if self.torn_down || epoch != self.epoch || self.state != LoopState::Refreshing {
                    debug!(event_epoch = epoch, "Stale fetch result discarded");
                    return Commit::Discarded;
                }
                self.state = LoopState::Idle;
                self.in_flight = None;
                let commit = self.commit_fetch(result);
                if std::mem::take(&mut self.refresh_after_flight) {
                    self.activate(Trigger::Submitted);
                }
                commit
            }
            LoopEvent::Submitted {
                epoch,
                word,
                result,
            } => {
                if self.torn_down || epoch != self.epoch {
                    debug!(event_epoch = epoch, "Stale submission result discarded");
                    return Commit::Discarded;
                }
                match result {
                    Ok(()) => {
                        info!(word = %word, "Guess accepted");
                        self.notice = Some(Notice::GuessAccepted(word));
                        Commit::GuessAccepted(self.activate(Trigger::Submitted))
                    }
                    Err(e) => {
                        warn!(error = %e, word = %word, "Guess rejected");
                        self.notice = Some(Notice::Request(e));
                        Commit::GuessRejected
                    }
                }
            }
        }
    }

    fn commit_fetch(&mut self, result: Result<GameState, RequestError>) -> Commit {
        let state = match result {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "Refresh failed, keeping last view");
                self.notice = Some(Notice::Request(e));
                return Commit::Failed;
            }
        };

        match GameView::derive(&self.observer, &state) {
            Ok(view) => {
                self.view = Some(view);
                if matches!(self.notice, Some(Notice::Request(_) | Notice::Refresh(_))) {
                    self.notice = None;
                }
                Commit::Refreshed
            }
            Err(violation) => {
                let violation = violation.report();
                error!(observer = %self.observer, "Snapshot rejected, boards withheld");
                self.view = None;
                self.notice = Some(Notice::Refresh(RefreshError::Contract(violation)));
                Commit::Failed
            }
        }
    }

    /// Stops the loop. In-flight work is aborted and its results dropped.
    #[instrument(skip(self), fields(epoch = self.epoch))]
    pub fn teardown(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
        self.epoch += 1;
        self.torn_down = true;
        self.state = LoopState::Idle;
        self.refresh_after_flight = false;
        self.view = None;
        info!("Render loop torn down");
    }

    /// Current state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Current epoch.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Returns true once [`teardown`](Self::teardown) has run.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Last committed view, if any.
    pub fn view(&self) -> Option<&GameView> {
        self.view.as_ref()
    }

    /// Last notice, if any.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// The observing player.
    pub fn observer(&self) -> &PlayerId {
        &self.observer
    }
}

impl Drop for RenderLoop {
    fn drop(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}
