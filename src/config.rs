//! Client configuration.
//!
//! Values come from a TOML file, then the environment, then command-line
//! overrides, each layer replacing the one before.

use crate::games::wordle::PlayerId;
use crate::session_client::GameSessionDescriptor;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable overriding the session token.
pub const SESSION_TOKEN_ENV: &str = "TOWN_WORDLE_SESSION_TOKEN";

/// Configuration for connecting to one game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the town service.
    #[serde(default = "default_server_url")]
    server_url: String,

    /// Town hosting the game.
    #[serde(default)]
    town_id: String,

    /// Session token issued on joining the town.
    #[serde(default)]
    session_token: String,

    /// Label of the conversation area hosting the game.
    #[serde(default)]
    area_label: String,

    /// This player's identifier.
    #[serde(default)]
    player_id: String,

    /// Milliseconds between state refreshes.
    #[serde(default = "default_poll_interval_ms")]
    poll_interval_ms: u64,

    /// Milliseconds before a request is abandoned.
    #[serde(default = "default_request_timeout_ms")]
    request_timeout_ms: u64,
}

fn default_server_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_request_timeout_ms() -> u64 {
    5000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            town_id: String::new(),
            session_token: String::new(),
            area_label: String::new(),
            player_id: String::new(),
            poll_interval_ms: default_poll_interval_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Replaces `server_url`.
    pub server_url: Option<String>,
    /// Replaces `town_id`.
    pub town_id: Option<String>,
    /// Replaces `area_label`.
    pub area_label: Option<String>,
    /// Replaces `player_id`.
    pub player_id: Option<String>,
    /// Replaces `poll_interval_ms`.
    pub poll_interval_ms: Option<u64>,
}

impl ClientConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(town = %config.town_id, area = %config.area_label, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise starts from defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Takes the session token from the environment when set.
    #[instrument(skip(self))]
    pub fn with_env(mut self) -> Self {
        if let Ok(token) = std::env::var(SESSION_TOKEN_ENV) {
            debug!("Session token taken from environment");
            self.session_token = token;
        }
        self
    }

    /// Applies command-line overrides.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(server_url) = overrides.server_url {
            self.server_url = server_url;
        }
        if let Some(town_id) = overrides.town_id {
            self.town_id = town_id;
        }
        if let Some(area_label) = overrides.area_label {
            self.area_label = area_label;
        }
        if let Some(player_id) = overrides.player_id {
            self.player_id = player_id;
        }
        if let Some(poll_interval_ms) = overrides.poll_interval_ms {
            self.poll_interval_ms = poll_interval_ms;
        }
        self
    }

    /// Builds the descriptor scoping every request.
    ///
    /// Fails if the town, token or area is missing.
    pub fn descriptor(&self) -> Result<GameSessionDescriptor, ConfigError> {
        require("town_id", &self.town_id)?;
        require("session_token", &self.session_token)?;
        require("area_label", &self.area_label)?;
        Ok(GameSessionDescriptor::new(
            self.town_id.as_str(),
            self.session_token.as_str(),
            self.area_label.as_str(),
        ))
    }

    /// Returns this player's identifier, failing if it is missing.
    pub fn player(&self) -> Result<PlayerId, ConfigError> {
        require("player_id", &self.player_id)?;
        Ok(PlayerId::new(self.player_id.as_str()))
    }

    /// Interval between refreshes.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    /// Request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[track_caller]
fn require(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::new(format!("{} is not set", field)));
    }
    Ok(())
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
