//! Prompt construction and move extraction

use chess_core::{color_name, move_to_uci, parse_uci_move, Game, Move};
use regex::Regex;
use std::sync::OnceLock;

fn uci_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"[a-h][1-8][a-h][1-8][qrbn]?").ok())
        .as_ref()
}

/// Builds the completion prompt for the side to move.
///
/// ```text
/// You are playing chess as White.
/// Position (FEN): rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1
/// Legal moves: a2a3 a2a4 ...
/// Reply with one legal move in UCI notation.
/// Move:
/// ```
pub fn build_prompt(game: &Game) -> String {
    let board = game.board();
    let legal: Vec<String> = game
        .legal_moves()
        .into_iter()
        .map(|m| move_to_uci(board, m))
        .collect();

    format!(
        "You are playing chess as {}.\n\
         Position (FEN): {}\n\
         Legal moves: {}\n\
         Reply with one legal move in UCI notation.\n\
         Move:",
        color_name(game.side_to_move()),
        game.fen(),
        legal.join(" ")
    )
}

/// First UCI-shaped substring of `text`, lowercased.
pub fn extract_uci(text: &str) -> Option<String> {
    let lowered = text.to_ascii_lowercase();
    uci_pattern()?
        .find(&lowered)
        .map(|m| m.as_str().to_string())
}

/// The first UCI-shaped substring of `text`, if it is legal in `game`.
pub fn extract_legal_move(game: &Game, text: &str) -> Option<Move> {
    let uci = extract_uci(text)?;
    parse_uci_move(game.board(), &uci).ok()
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod prompt_tests;
