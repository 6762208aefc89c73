//! RL vs LLM Duel
//!
//! This crate provides the pieces around a single game:
//! - [`GameLoop`]: alternates the two seats, re-validates their moves and
//!   detects the end of the game
//! - [`TerminalRenderer`]: board, agent panels, timer and move history
//! - [`StdinEvents`]: quit handling while the game runs
//! - [`DuelConfig`]: `duel.toml` loading
//! - [`GameReport`]: JSON summary of a finished game
//!
//! # Usage
//!
//! ```bash
//! # Ask for the white player and seed, then play
//! cargo run -p arena --bin duel
//!
//! # Fully specified, non-interactive
//! cargo run -p arena --bin duel -- play --white llm --seed 42 --exit-on-game-over
//!
//! # Train the RL model ahead of time
//! cargo run -p arena --bin duel -- train --timesteps 20000
//! ```

mod config;
mod error;
mod events;
mod game_loop;
mod render;
mod report;
mod seat;
mod setup;

pub use config::*;
pub use error::ArenaError;
pub use events::*;
pub use game_loop::*;
pub use render::*;
pub use report::*;
pub use seat::*;
pub use setup::*;
