//! Town Wordle - poll-and-reconcile client for two-team Wordle games
//!
//! Games live in the conversation areas of a shared virtual town. The server
//! owns all game state; this crate fetches snapshots, decides what each
//! observer may see, and lays both teams' guesses out on fixed boards.
//!
//! # Architecture
//!
//! - **Transport**: typed request/response over HTTP, unwrapping the service's
//!   uniform response envelope
//! - **Session client**: create, join, leave, start, guess, fetch state
//! - **Games**: snapshot types and the pure visibility/board derivation
//! - **Render loop**: refresh state machine with one fetch in flight at most
//! - **TUI**: ratatui front end over the render loop
//!
//! # Example
//!
//! ```no_run
//! use town_wordle::{GameSessionClient, GameSessionDescriptor, GameView, PlayerId};
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = GameSessionClient::http("http://localhost:8081", Duration::from_secs(5))?;
//! let descriptor = GameSessionDescriptor::new("town-1", "token", "Wordle Corner");
//! let state = client.fetch_state(&descriptor).await?;
//! let view = GameView::derive(&PlayerId::new("alice"), &state)?;
//! println!("{}", view.display());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod games;
pub mod render_loop;
pub mod session_client;
pub mod transport;
pub mod tui;

// Crate-level exports - Errors
pub use error::{RefreshError, RequestError};

// Crate-level exports - Configuration
pub use config::{ClientConfig, ConfigError, ConfigOverrides};

// Crate-level exports - Transport
pub use transport::{Envelope, HttpTransport, Method, Transport, TransportClient, TransportRequest};

// Crate-level exports - Session client
pub use session_client::{GameAction, GameKind, GameSessionClient, GameSessionDescriptor};

// Crate-level exports - Render loop
pub use render_loop::{Activation, Commit, LoopEvent, LoopState, Notice, RenderLoop, Trigger};

// Crate-level exports - Game types (wordle)
pub use games::wordle::{
    Board, Cell, ContractViolation, GameState, GameView, Guess, LetterColor, MAX_GUESSES,
    PlayerId, Reveal, Row, TeamNumber, TeamReveal, TeamState, WORD_LENGTH,
};
