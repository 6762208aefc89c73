//! Gym-style training environment
//!
//! One environment drives a single game in which the learner moves for both
//! sides. Actions are `from * 64 + to` over the 64×64 square pairs; anything
//! that does not name a legal move ends the episode with a penalty.

use chess_core::{encode, legal_moves, uci_target, EncodedState, Game, GameResult, Move, Piece};

/// Size of the discrete action space: origin × destination square.
pub const NUM_ACTIONS: usize = 64 * 64;

/// Reward for an action that is not a legal move.
pub const ILLEGAL_MOVE_REWARD: f32 = -1.0;

#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub state: EncodedState,
    /// +1 when White wins, -1 when Black wins or the action was illegal
    pub reward: f32,
    pub done: bool,
    pub illegal: bool,
}

/// Maps a legal move to its action index.
pub fn move_to_action(game: &Game, mv: Move) -> usize {
    mv.from as usize * 64 + uci_target(game.board(), mv) as usize
}

#[derive(Debug, Clone, Default)]
pub struct ChessEnvironment {
    game: Game,
}

impl ChessEnvironment {
    pub fn new() -> Self {
        Self { game: Game::new() }
    }

    pub fn reset(&mut self) -> EncodedState {
        self.game = Game::new();
        self.state()
    }

    pub fn state(&self) -> EncodedState {
        encode(self.game.board())
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Decodes an action into a legal move, if it names one.
    ///
    /// The action carries no promotion piece, so pawn moves to the last rank
    /// promote to a queen.
    pub fn action_to_move(&self, action: usize) -> Option<Move> {
        decode_action(&self.game, action)
    }

    pub fn legal_actions(&self) -> Vec<usize> {
        legal_moves(self.game.board())
            .into_iter()
            .filter(|m| m.promotion.is_none() || m.promotion == Some(Piece::Queen))
            .map(|m| move_to_action(&self.game, m))
            .collect()
    }

    pub fn step(&mut self, action: usize) -> StepOutcome {
        let mv = match self.action_to_move(action) {
            Some(mv) => mv,
            None => {
                return StepOutcome {
                    state: self.state(),
                    reward: ILLEGAL_MOVE_REWARD,
                    done: true,
                    illegal: true,
                }
            }
        };

        // Legal by construction
        let illegal = self.game.push(mv).is_err();
        let result = self.game.result();
        let reward = match result {
            GameResult::WhiteWins => 1.0,
            GameResult::BlackWins => -1.0,
            _ => 0.0,
        };

        StepOutcome {
            state: self.state(),
            reward,
            done: illegal || result != GameResult::Ongoing,
            illegal,
        }
    }
}

/// Decodes `from * 64 + to` against the legal moves of `game`.
pub fn decode_action(game: &Game, action: usize) -> Option<Move> {
    if action >= NUM_ACTIONS {
        return None;
    }
    let (from, to) = (action / 64, action % 64);
    legal_moves(game.board()).into_iter().find(|&m| {
        m.from as usize == from
            && uci_target(game.board(), m) as usize == to
            && (m.promotion.is_none() || m.promotion == Some(Piece::Queen))
    })
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod env_tests;
