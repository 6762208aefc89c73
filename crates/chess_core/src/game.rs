//! Game record built on top of the rules crate.
//!
//! The board itself only knows about checkmate, stalemate and the halfmove
//! clock. Repetition and material draws need the position history, which is
//! kept here next to the move list.

use cozy_chess::{BitBoard, Board, Color, Move, Piece};
use std::fmt;

use crate::{error::ChessError, uci::move_to_uci};

pub fn other(c: Color) -> Color {
    match c {
        Color::White => Color::Black,
        Color::Black => Color::White,
    }
}

pub fn color_name(c: Color) -> &'static str {
    match c {
        Color::White => "White",
        Color::Black => "Black",
    }
}

/// All legal moves of the position, in generator order.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    board.generate_moves(|moves| {
        out.extend(moves);
        false
    });
    out
}

fn has_legal_moves(board: &Board) -> bool {
    board.generate_moves(|moves| moves.into_iter().next().is_some())
}

/// True when neither side can possibly deliver mate.
pub fn is_insufficient_material(board: &Board) -> bool {
    let heavy = board.pieces(Piece::Pawn) | board.pieces(Piece::Rook) | board.pieces(Piece::Queen);
    if !heavy.is_empty() {
        return false;
    }

    let knights = board.pieces(Piece::Knight);
    let bishops = board.pieces(Piece::Bishop);
    if (knights | bishops).len() <= 1 {
        return true;
    }
    if !knights.is_empty() {
        return false;
    }

    // Bishops only: a draw when they all stand on one square colour.
    let mut light = 0;
    let mut dark = 0;
    for sq in bishops {
        if (sq.file() as usize + sq.rank() as usize) % 2 == 1 {
            light += 1;
        } else {
            dark += 1;
        }
    }
    light == 0 || dark == 0
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    ThreefoldRepetition,
    FiftyMoves,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Termination::Checkmate => "checkmate",
            Termination::Stalemate => "stalemate",
            Termination::InsufficientMaterial => "insufficient material",
            Termination::ThreefoldRepetition => "threefold repetition",
            Termination::FiftyMoves => "fifty-move rule",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub termination: Termination,
    /// None for draws
    pub winner: Option<Color>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    Ongoing,
    WhiteWins,
    BlackWins,
    Draw,
}

impl GameResult {
    /// PGN-style result string.
    pub fn as_str(self) -> &'static str {
        match self {
            GameResult::Ongoing => "*",
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
        }
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameResult::WhiteWins => Some(Color::White),
            GameResult::BlackWins => Some(Color::Black),
            _ => None,
        }
    }
}

impl From<Option<Outcome>> for GameResult {
    fn from(outcome: Option<Outcome>) -> Self {
        match outcome {
            None => GameResult::Ongoing,
            Some(Outcome {
                winner: Some(Color::White),
                ..
            }) => GameResult::WhiteWins,
            Some(Outcome {
                winner: Some(Color::Black),
                ..
            }) => GameResult::BlackWins,
            Some(Outcome { winner: None, .. }) => GameResult::Draw,
        }
    }
}

/// A game in progress: current board plus everything needed to judge draws.
#[derive(Clone, Debug)]
pub struct Game {
    start_fen: String,
    board: Board,
    /// Position hashes, one per ply plus the starting position
    hashes: Vec<u64>,
    moves: Vec<String>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_board(Board::default())
    }

    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let board = Board::from_fen(fen.trim(), false).map_err(|e| ChessError::InvalidFen {
            fen: fen.to_string(),
            reason: format!("{e:?}"),
        })?;
        Ok(Self::from_board(board))
    }

    fn from_board(board: Board) -> Self {
        Self {
            start_fen: board.to_string(),
            hashes: vec![board.hash()],
            board,
            moves: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn start_fen(&self) -> &str {
        &self.start_fen
    }

    pub fn fen(&self) -> String {
        self.board.to_string()
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.board)
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.board.is_legal(mv)
    }

    /// Played moves in UCI notation, oldest first.
    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    pub fn ply(&self) -> usize {
        self.moves.len()
    }

    /// Applies a legal move. The board is left untouched on error.
    pub fn push(&mut self, mv: Move) -> Result<(), ChessError> {
        if !self.board.is_legal(mv) {
            return Err(ChessError::IllegalMove {
                uci: move_to_uci(&self.board, mv),
                fen: self.fen(),
            });
        }
        let uci = move_to_uci(&self.board, mv);
        self.board.play_unchecked(mv);
        self.moves.push(uci);
        self.hashes.push(self.board.hash());
        Ok(())
    }

    pub fn push_uci(&mut self, uci: &str) -> Result<Move, ChessError> {
        let mv = crate::uci::parse_uci_move(&self.board, uci)?;
        self.push(mv)?;
        Ok(mv)
    }

    /// How many times the current position has occurred, counting this one.
    pub fn repetitions(&self) -> usize {
        let current = self.board.hash();
        self.hashes
            .iter()
            .rev()
            .take(self.board.halfmove_clock() as usize + 1)
            .step_by(2) // Same side to move only
            .filter(|&&h| h == current)
            .count()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        let stm = self.board.side_to_move();

        if !has_legal_moves(&self.board) {
            let in_check = self.board.checkers() != BitBoard::EMPTY;
            return Some(if in_check {
                Outcome {
                    termination: Termination::Checkmate,
                    winner: Some(other(stm)),
                }
            } else {
                Outcome {
                    termination: Termination::Stalemate,
                    winner: None,
                }
            });
        }

        let draw = |termination| {
            Some(Outcome {
                termination,
                winner: None,
            })
        };
        if is_insufficient_material(&self.board) {
            return draw(Termination::InsufficientMaterial);
        }
        if self.repetitions() >= 3 {
            return draw(Termination::ThreefoldRepetition);
        }
        if self.board.halfmove_clock() >= 100 {
            return draw(Termination::FiftyMoves);
        }
        None
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn result(&self) -> GameResult {
        self.outcome().into()
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
