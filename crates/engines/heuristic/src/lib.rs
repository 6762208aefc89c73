//! Heuristic Move Chooser
//!
//! Picks a random move among checking moves if there are any, otherwise
//! among captures, otherwise among all legal moves. It is weak on purpose:
//! - It is what the LLM agent plays when the model gives nothing usable
//! - The game loop uses it when a seat hands back a missing or illegal move
//! - It doubles as a cheap opponent for tests

use chess_core::{
    Board, Decision, Game, Move, MoveChooser, MoveOrigin, Piece, ThinkLimits, legal_moves, other,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;


/// True if `mv` takes a piece, en passant included.
pub fn is_capture(board: &Board, mv: Move) -> bool {
    let them = other(board.side_to_move());
    if board.color_on(mv.to) == Some(them) {
        return true;
    }
    board.piece_on(mv.from) == Some(Piece::Pawn)
        && mv.from.file() != mv.to.file()
        && board.piece_on(mv.to).is_none()
}

/// True if playing the (legal) move `mv` puts the opponent in check.
pub fn gives_check(board: &Board, mv: Move) -> bool {
    let mut next = board.clone();
    next.play_unchecked(mv);
    !next.checkers().is_empty()
}

pub fn pick_random<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Move> {
    legal_moves(board).choose(rng).copied()
}

/// Checks first, then captures, then anything.
pub fn pick_heuristic<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Move> {
    let moves = legal_moves(board);

    let checks: Vec<Move> = moves
        .iter()
        .copied()
        .filter(|&m| gives_check(board, m))
        .collect();
    if let Some(&mv) = checks.choose(rng) {
        return Some(mv);
    }

    let captures: Vec<Move> = moves
        .iter()
        .copied()
        .filter(|&m| is_capture(board, m))
        .collect();
    if let Some(&mv) = captures.choose(rng) {
        return Some(mv);
    }

    moves.choose(rng).copied()
}

/// A chooser that plays `pick_heuristic` with its own seeded RNG.
#[derive(Debug, Clone)]
pub struct HeuristicChooser {
    rng: StdRng,
}

impl Default for HeuristicChooser {
    fn default() -> Self {
        Self::new()
    }
}

impl HeuristicChooser {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Picks for a bare board, outside of any game.
    pub fn pick(&mut self, board: &Board) -> Option<Move> {
        pick_heuristic(board, &mut self.rng)
    }
}

impl MoveChooser for HeuristicChooser {
    fn get_action(&mut self, game: &Game, _limits: &ThinkLimits) -> Decision {
        let best_move = self.pick(game.board());
        debug!(?best_move, "heuristic pick");
        Decision::new(best_move, MoveOrigin::Heuristic)
    }

    fn name(&self) -> &str {
        "Heuristic"
    }
}
