//! Game operations scoped to one conversation area.

use crate::error::RequestError;
use crate::games::wordle::{GameState, PlayerId, TeamNumber};
use crate::transport::{HttpTransport, Method, TransportClient, TransportRequest};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use strum::{Display, EnumString};
use tracing::{debug, info, instrument};

/// Identifies one active game instance: the town, the caller's session in
/// it, and the conversation area hosting the game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, new)]
pub struct GameSessionDescriptor {
    /// Town the area belongs to.
    #[new(into)]
    town_id: String,
    /// Session token issued to the caller on joining the town.
    #[new(into)]
    session_token: String,
    /// Label of the conversation area.
    #[new(into)]
    area_label: String,
}

/// Kind of game an area can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum GameKind {
    /// Two-team Wordle.
    Wordle,
}

/// Game-kind-specific action payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameAction {
    /// Submit a word for the caller's team.
    Guess {
        /// The guessed word.
        word: String,
    },
}

#[derive(Debug, Deserialize)]
struct FetchStateResponse {
    state: GameState,
}

/// Client for the game operations of the town service.
#[derive(Debug, Clone)]
pub struct GameSessionClient {
    transport: TransportClient,
}

impl GameSessionClient {
    /// Creates a client over the given transport.
    pub fn new(transport: TransportClient) -> Self {
        Self { transport }
    }

    /// Creates a client talking HTTP to `base_url`.
    pub fn http(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self, RequestError> {
        Ok(Self::new(TransportClient::new(HttpTransport::new(
            base_url, timeout,
        )?)))
    }

    /// Opens a game of `kind` in the area.
    ///
    /// Fails if the area already hosts a conflicting game.
    #[instrument(skip(self, descriptor), fields(town = %descriptor.town_id(), area = %descriptor.area_label()))]
    pub async fn create_game(
        &self,
        descriptor: &GameSessionDescriptor,
        kind: GameKind,
    ) -> Result<(), RequestError> {
        info!(%kind, "Creating game");
        let body = json!({
            "sessionToken": descriptor.session_token(),
            "conversationAreaLabel": descriptor.area_label(),
            "gameKind": kind,
        });
        self.post(descriptor, "games", body).await
    }

    /// Puts `player` on `team`.
    ///
    /// Fails if the roster is full or the player is already on a team.
    #[instrument(skip(self, descriptor), fields(town = %descriptor.town_id(), area = %descriptor.area_label()))]
    pub async fn join_team(
        &self,
        descriptor: &GameSessionDescriptor,
        player: &PlayerId,
        team: TeamNumber,
    ) -> Result<(), RequestError> {
        info!(%player, %team, "Joining team");
        let body = json!({
            "sessionToken": descriptor.session_token(),
            "conversationAreaLabel": descriptor.area_label(),
            "playerId": player,
            "teamNumber": team,
        });
        self.post(descriptor, "games/teams/join", body).await
    }

    /// Takes `player` off their team.
    ///
    /// Not idempotent: the caller must only call this for a current member.
    #[instrument(skip(self, descriptor), fields(town = %descriptor.town_id(), area = %descriptor.area_label()))]
    pub async fn leave_team(
        &self,
        descriptor: &GameSessionDescriptor,
        player: &PlayerId,
    ) -> Result<(), RequestError> {
        info!(%player, "Leaving team");
        let body = json!({
            "sessionToken": descriptor.session_token(),
            "conversationAreaLabel": descriptor.area_label(),
            "playerId": player,
        });
        self.post(descriptor, "games/teams/leave", body).await
    }

    /// Starts the game. Roster minimums are enforced by the server.
    #[instrument(skip(self, descriptor), fields(town = %descriptor.town_id(), area = %descriptor.area_label()))]
    pub async fn start_game(&self, descriptor: &GameSessionDescriptor) -> Result<(), RequestError> {
        info!("Starting game");
        let body = json!({
            "sessionToken": descriptor.session_token(),
            "conversationAreaLabel": descriptor.area_label(),
        });
        self.post(descriptor, "games/start", body).await
    }

    /// Submits an action for the caller's team.
    ///
    /// Fails if it is not the team's turn, the game has ended, or the server
    /// rejects the payload (for a guess: wrong length, not in dictionary).
    #[instrument(skip(self, descriptor), fields(town = %descriptor.town_id(), area = %descriptor.area_label()))]
    pub async fn submit_action(
        &self,
        descriptor: &GameSessionDescriptor,
        action: &GameAction,
    ) -> Result<(), RequestError> {
        info!(?action, "Submitting action");
        let body = json!({
            "sessionToken": descriptor.session_token(),
            "conversationAreaLabel": descriptor.area_label(),
            "action": action,
        });
        self.post(descriptor, "games/actions", body).await
    }

    /// Fetches the current snapshot. Read-only.
    #[instrument(skip(self, descriptor), fields(town = %descriptor.town_id(), area = %descriptor.area_label()))]
    pub async fn fetch_state(
        &self,
        descriptor: &GameSessionDescriptor,
    ) -> Result<GameState, RequestError> {
        debug!("Fetching game state");
        let body = json!({
            "sessionToken": descriptor.session_token(),
            "conversationAreaLabel": descriptor.area_label(),
        });
        let request = TransportRequest::new(
            Method::Get,
            route(descriptor, "games/state"),
            descriptor.session_token().as_str(),
            body,
        );
        let response: FetchStateResponse = self.transport.request(request).await?;
        debug!(
            team_one = response.state.team_one.is_some(),
            team_two = response.state.team_two.is_some(),
            game_over = response.state.game_over,
            "Fetched game state"
        );
        Ok(response.state)
    }

    async fn post(
        &self,
        descriptor: &GameSessionDescriptor,
        operation: &str,
        body: serde_json::Value,
    ) -> Result<(), RequestError> {
        let request = TransportRequest::new(
            Method::Post,
            route(descriptor, operation),
            descriptor.session_token().as_str(),
            body,
        );
        self.transport.request_ack(request).await
    }
}

fn route(descriptor: &GameSessionDescriptor, operation: &str) -> String {
    format!("/towns/{}/{}", descriptor.town_id(), operation)
}
