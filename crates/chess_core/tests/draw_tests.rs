//! Tests for game termination
//!
//! Covers every way `Game::outcome` can end a game:
//! - Checkmate
//! - Stalemate
//! - Fifty-move rule
//! - Threefold repetition
//! - Insufficient material

use chess_core::{Color, Game, GameResult, Termination, is_insufficient_material};

fn game(fen: &str) -> Game {
    Game::from_fen(fen).expect("test FEN should parse")
}

// =============================================================================
// Stalemate Tests
// =============================================================================

#[test]
fn test_stalemate_king_in_corner() {
    // Black king on a8, White queen on b6, White king on c7
    let g = game("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");

    assert!(g.legal_moves().is_empty(), "Stalemate position should have no legal moves");
    let outcome = g.outcome().expect("stalemate ends the game");
    assert_eq!(outcome.termination, Termination::Stalemate);
    assert_eq!(outcome.winner, None);
    assert_eq!(g.result(), GameResult::Draw);
}

#[test]
fn test_stalemate_king_and_pawn_endgame() {
    let g = game("6k1/6P1/6K1/8/8/8/8/8 b - - 0 1");

    assert_eq!(
        g.outcome().map(|o| o.termination),
        Some(Termination::Stalemate)
    );
}

// =============================================================================
// Checkmate Tests
// =============================================================================

#[test]
fn test_checkmate_is_not_stalemate() {
    // Scholar's mate
    let g = game("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");

    let outcome = g.outcome().expect("mate ends the game");
    assert_eq!(outcome.termination, Termination::Checkmate);
    assert_eq!(outcome.winner, Some(Color::White));
    assert_eq!(g.result().as_str(), "1-0");
}

#[test]
fn test_check_is_not_checkmate() {
    let g = game("rnbqkbnr/ppppp1pp/8/5p1Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2");

    assert!(!g.legal_moves().is_empty(), "Check position should have legal moves");
    assert!(!g.is_game_over());
    assert_eq!(g.result(), GameResult::Ongoing);
}

#[test]
fn test_fools_mate_black_wins() {
    let mut g = Game::new();
    for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        assert!(!g.is_game_over(), "game ended before {uci}");
        g.push_uci(uci).unwrap();
    }

    assert!(g.is_game_over());
    assert_eq!(g.result(), GameResult::BlackWins);
    assert_eq!(g.result().winner(), Some(Color::Black));
}

// =============================================================================
// Fifty-Move Rule Tests
// =============================================================================

#[test]
fn test_fifty_move_rule_at_100_halfmoves() {
    let g = game("8/8/8/4k3/8/4K3/8/4R3 w - - 100 60");

    assert_eq!(
        g.outcome().map(|o| o.termination),
        Some(Termination::FiftyMoves)
    );
}

#[test]
fn test_fifty_move_rule_at_99_halfmoves() {
    let g = game("8/8/8/4k3/8/4K3/8/4R3 w - - 99 60");

    assert!(!g.is_game_over(), "halfmove clock 99 is not a draw yet");
}

#[test]
fn test_fifty_move_rule_reset_on_pawn_move() {
    let mut g = game("8/8/8/4k3/8/3K4/4P3/8 w - - 99 60");
    g.push_uci("e2e3").unwrap();

    assert_eq!(g.board().halfmove_clock(), 0);
    assert!(!g.is_game_over());
}

// =============================================================================
// Insufficient Material Tests
// =============================================================================

#[test]
fn test_insufficient_material_king_vs_king() {
    let g = game("8/8/8/4k3/8/4K3/8/8 w - - 0 1");

    assert!(is_insufficient_material(g.board()));
    assert_eq!(
        g.outcome().map(|o| o.termination),
        Some(Termination::InsufficientMaterial)
    );
}

#[test]
fn test_insufficient_material_single_minor() {
    for fen in [
        "8/8/8/4k3/8/4KB2/8/8 w - - 0 1",
        "8/8/8/4k3/8/4K3/8/5N2 w - - 0 1",
        "8/8/4b3/4k3/8/4K3/8/8 w - - 0 1",
        "8/8/4n3/4k3/8/4K3/8/8 w - - 0 1",
    ] {
        assert!(is_insufficient_material(game(fen).board()), "{fen}");
    }
}

#[test]
fn test_insufficient_material_same_color_bishops() {
    // c1 and f8 are both dark squares
    let g = game("5b2/8/8/4k3/8/4K3/8/2B5 w - - 0 1");

    assert!(is_insufficient_material(g.board()));
}

#[test]
fn test_sufficient_material_opposite_color_bishops() {
    // c1 is dark, c8 is light
    let g = game("2b5/8/8/4k3/8/4K3/8/2B5 w - - 0 1");

    assert!(!is_insufficient_material(g.board()));
}

#[test]
fn test_sufficient_material_heavy_pieces_and_pawns() {
    for fen in [
        "8/8/8/4k3/8/4K3/4P3/8 w - - 0 1",
        "8/8/8/4k3/8/4K3/8/4R3 w - - 0 1",
        "8/8/8/4k3/8/4K3/8/4Q3 w - - 0 1",
        "8/8/8/4k3/8/4K3/3NN3/8 w - - 0 1",
    ] {
        assert!(!is_insufficient_material(game(fen).board()), "{fen}");
    }
}

// =============================================================================
// Threefold Repetition Tests
// =============================================================================

#[test]
fn test_threefold_repetition_by_knight_shuffle() {
    let mut g = Game::new();
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];

    for uci in shuffle {
        g.push_uci(uci).unwrap();
    }
    assert_eq!(g.repetitions(), 2);
    assert!(!g.is_game_over());

    for uci in shuffle {
        g.push_uci(uci).unwrap();
    }
    assert_eq!(g.repetitions(), 3);
    assert_eq!(
        g.outcome().map(|o| o.termination),
        Some(Termination::ThreefoldRepetition)
    );
    assert_eq!(g.result(), GameResult::Draw);
}

#[test]
fn test_repetition_ignores_positions_before_irreversible_move() {
    let mut g = Game::new();
    for uci in ["g1f3", "g8f6", "f3g1", "f6g8", "e2e4"] {
        g.push_uci(uci).unwrap();
    }
    assert_eq!(g.repetitions(), 1);
}
