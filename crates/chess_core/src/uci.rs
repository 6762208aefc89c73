use cozy_chess::{Board, File, Move, Piece, Rank, Square};

use crate::{error::ChessError, game::legal_moves};

pub fn square_name(sq: Square) -> String {
    let f = (b'a' + sq.file() as u8) as char;
    let r = (b'1' + sq.rank() as u8) as char;
    format!("{f}{r}")
}

pub fn parse_square(c: &str) -> Option<Square> {
    let b = c.as_bytes();
    if b.len() != 2 {
        return None;
    }
    let f = b[0].to_ascii_lowercase();
    let r = b[1];
    if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
        return None;
    }
    Some(Square::new(
        File::index((f - b'a') as usize),
        Rank::index((r - b'1') as usize),
    ))
}

fn promo_char(p: Piece) -> char {
    match p {
        Piece::Queen => 'q',
        Piece::Rook => 'r',
        Piece::Bishop => 'b',
        Piece::Knight => 'n',
        _ => 'q',
    }
}

/// Destination square as UCI reports it.
///
/// The rules crate stores castling as "king takes own rook"; UCI wants the
/// king's destination square instead (`e1g1`, not `e1h1`).
pub fn uci_target(board: &Board, mv: Move) -> Square {
    if board.piece_on(mv.from) == Some(Piece::King)
        && board.color_on(mv.to).is_some()
        && board.color_on(mv.to) == board.color_on(mv.from)
    {
        let file = if (mv.to.file() as usize) > (mv.from.file() as usize) {
            File::G
        } else {
            File::C
        };
        return Square::new(file, mv.from.rank());
    }
    mv.to
}

/// Formats a move in standard UCI notation.
pub fn move_to_uci(board: &Board, mv: Move) -> String {
    let mut s = String::with_capacity(5);
    s.push_str(&square_name(mv.from));
    s.push_str(&square_name(uci_target(board, mv)));
    if let Some(p) = mv.promotion {
        s.push(promo_char(p));
    }
    s
}

/// Returns true when `txt` has the shape of a UCI move, legal or not.
pub fn is_uci_shaped(txt: &str) -> bool {
    let txt = txt.trim();
    if txt.len() != 4 && txt.len() != 5 {
        return false;
    }
    if !txt.is_ascii() {
        return false;
    }
    if parse_square(&txt[0..2]).is_none() || parse_square(&txt[2..4]).is_none() {
        return false;
    }
    match txt.as_bytes().get(4) {
        None => true,
        Some(c) => matches!(c.to_ascii_lowercase(), b'q' | b'r' | b'b' | b'n'),
    }
}

pub fn parse_uci_move(board: &Board, txt: &str) -> Result<Move, ChessError> {
    // Parse the shape first, then match against legal moves so castling comes
    // back in the rules crate's own representation.
    let txt = txt.trim();
    if !is_uci_shaped(txt) {
        return Err(ChessError::MalformedUci(txt.to_string()));
    }
    let wanted = txt.to_ascii_lowercase();

    legal_moves(board)
        .into_iter()
        .find(|&m| move_to_uci(board, m) == wanted)
        .ok_or_else(|| ChessError::IllegalMove {
            uci: wanted,
            fen: board.to_string(),
        })
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
