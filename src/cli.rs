//! Command-line interface for town_wordle.

use clap::{Args, Parser, Subcommand};
use town_wordle::{ConfigOverrides, GameKind, TeamNumber};

/// Town Wordle - two-team Wordle client for town conversation areas
#[derive(Parser, Debug)]
#[command(name = "town_wordle")]
#[command(about = "Play and watch two-team Wordle games in a town", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Connection settings
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Settings shared by every command
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Path to the TOML config file
    #[arg(short, long, global = true, default_value = "town_wordle.toml")]
    pub config: std::path::PathBuf,

    /// Town service URL
    #[arg(long, global = true)]
    pub server_url: Option<String>,

    /// Town ID
    #[arg(long, global = true)]
    pub town: Option<String>,

    /// Conversation area label
    #[arg(long, global = true)]
    pub area: Option<String>,

    /// Your player ID
    #[arg(long, global = true)]
    pub player: Option<String>,

    /// Milliseconds between refreshes
    #[arg(long, global = true)]
    pub poll_interval_ms: Option<u64>,
}

impl ConnectionArgs {
    /// Returns the values that override the config file.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            server_url: self.server_url.clone(),
            town_id: self.town.clone(),
            area_label: self.area.clone(),
            player_id: self.player.clone(),
            poll_interval_ms: self.poll_interval_ms,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Watch and play the game in the terminal UI
    Watch,

    /// Open a game in the conversation area
    Create {
        /// Kind of game
        #[arg(long, default_value = "wordle")]
        kind: GameKind,
    },

    /// Join a team
    Join {
        /// Team number (1 or 2)
        #[arg(long, value_parser = parse_team)]
        team: TeamNumber,
    },

    /// Leave your team
    Leave,

    /// Start the game
    Start,

    /// Submit a guess for your team
    Guess {
        /// The five-letter word
        word: String,
    },

    /// Print both boards once, as you would see them
    State,
}

fn parse_team(value: &str) -> Result<TeamNumber, String> {
    let number: u8 = value
        .parse()
        .map_err(|_| format!("team must be 1 or 2, got {}", value))?;
    TeamNumber::try_from(number)
}
