//! Town Wordle - Unified CLI
//!
//! One-shot game operations plus the terminal UI.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use town_wordle::{
    ClientConfig, GameAction, GameSessionClient, GameSessionDescriptor, GameView, PlayerId,
};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = ClientConfig::load(&cli.connection.config)?
        .with_env()
        .with_overrides(cli.connection.overrides());

    // The TUI logs to a file and sets up its own subscriber
    if !matches!(cli.command, Command::Watch) {
        initialize_tracing();
    }

    run_command(cli.command, config).await
}

/// Runs a command against the town service.
#[instrument(skip(config))]
async fn run_command(command: Command, config: ClientConfig) -> Result<()> {
    if let Command::Watch = command {
        return town_wordle::tui::run_tui(config).await;
    }

    let descriptor = config.descriptor()?;
    let client = GameSessionClient::http(config.server_url(), config.request_timeout())?;

    match command {
        Command::Create { kind } => {
            client.create_game(&descriptor, kind).await?;
            println!("Created {} game in {}", kind, descriptor.area_label());
        }
        Command::Join { team } => {
            client.join_team(&descriptor, &config.player()?, team).await?;
            println!("Joined {}", team);
        }
        Command::Leave => {
            client.leave_team(&descriptor, &config.player()?).await?;
            println!("Left team");
        }
        Command::Start => {
            client.start_game(&descriptor).await?;
            println!("Game started");
        }
        Command::Guess { word } => {
            let word = word.to_uppercase();
            let action = GameAction::Guess { word: word.clone() };
            client.submit_action(&descriptor, &action).await?;
            println!("Guess {} accepted", word);
        }
        Command::State => {
            print_state(&client, &descriptor, &config.player()?).await?;
        }
        Command::Watch => {}
    }

    Ok(())
}

/// Fetches once and prints both boards as `observer` sees them.
#[instrument(skip(client, descriptor))]
async fn print_state(
    client: &GameSessionClient,
    descriptor: &GameSessionDescriptor,
    observer: &PlayerId,
) -> Result<()> {
    let state = client.fetch_state(descriptor).await?;
    let view = GameView::derive(observer, &state).map_err(|violation| violation.report())?;
    info!(game_over = view.is_game_over(), "Printing boards");
    println!("{}", view.display());
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,town_wordle=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
