pub mod encode;
pub mod error;
pub mod game;
pub mod time_control;
pub mod uci;

pub use encode::*;
pub use error::ChessError;
pub use game::*;
pub use time_control::*;
pub use uci::*;

// Rules types are part of this crate's API.
pub use cozy_chess::{Board, Color, Move, Piece, Square};

// =============================================================================
// MoveChooser trait: implemented by every agent that can sit at the board
// =============================================================================

/// Where a decision came from, for logging and status panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOrigin {
    /// Trained policy output mapped onto a legal move
    Policy,
    /// Move suggested by a language model
    Model,
    /// Previously chosen move replayed from a cache
    Cache,
    /// Check > capture > random heuristic
    Heuristic,
    /// Uniformly random legal move
    Random,
    /// Fixed move list (tests, replays)
    Scripted,
}

/// Result of a move decision
#[derive(Debug, Clone)]
pub struct Decision {
    /// The chosen move (None if there are no legal moves)
    pub best_move: Option<Move>,
    pub origin: MoveOrigin,
    /// Whether the chooser gave up early because its time ran out
    pub stopped: bool,
}

impl Decision {
    pub fn new(best_move: Option<Move>, origin: MoveOrigin) -> Self {
        Self {
            best_move,
            origin,
            stopped: false,
        }
    }
}

/// Trait that every seat at the board implements.
///
/// The game loop depends only on this interface, so policy-driven,
/// model-driven and heuristic players are interchangeable.
pub trait MoveChooser: Send {
    /// Choose a move for the side to move in `game`.
    ///
    /// Implementations should return a legal move whenever one exists and
    /// should consult `limits` if they can run for long.
    fn get_action(&mut self, game: &Game, limits: &ThinkLimits) -> Decision;

    /// Display name for logs
    fn name(&self) -> &str;

    /// Reset internal state for a new game.
    fn new_game(&mut self) {}
}
