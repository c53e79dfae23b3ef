//! domino-rs: Domino rules engine library
//!
//! Goals:
//! - A single owned match engine enforcing placement, draw and pass rules
//! - Deterministic, replayable matches from a seed
//! - No panics for invalid input; use `Result` for precondition violations
//!
//! ## Quick start: play a match with bots
//! ```
//! use domino_rs::agents::{AgentTable, BotProfile};
//! use domino_rs::game::Game;
//! use domino_rs::settings::Settings;
//!
//! let settings = Settings::try_new(3, 0, 0, 6).unwrap();
//! let mut game = Game::with_seed(settings.clone(), 42);
//! game.start_match();
//!
//! let mut table = AgentTable::from_settings(&settings, &BotProfile::default().with_seed(42));
//! assert!(table.play_out(&mut game, 10_000).unwrap());
//! assert!(game.winner_index().is_some());
//! ```
//!
//! ## TUI
//! Run the interactive TUI with:
//! ```sh
//! cargo run --bin domino-rs
//! ```

pub mod agents;
pub mod board;
pub mod engine;
pub mod game;
pub mod logging;
pub mod player;
pub mod pool;
pub mod settings;
pub mod tiles;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
