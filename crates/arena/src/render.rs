//! Terminal display of a running duel

use chess_core::{Board, Color, Piece, Square};
use std::io::{self, Write};
use std::time::Duration;

use crate::seat::{Seat, Seating};

/// Everything the renderer needs for one redraw.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub board: &'a Board,
    pub seating: Seating,
    pub rl_status: &'a str,
    pub llm_status: &'a str,
    pub history: &'a [String],
    pub elapsed: Duration,
    /// Origin and destination of the last move, for highlighting
    pub last_move: Option<(Square, Square)>,
}

impl Frame<'_> {
    pub fn status_of(&self, seat: Seat) -> &str {
        match seat {
            Seat::Rl => self.rl_status,
            Seat::Llm => self.llm_status,
        }
    }
}

pub trait Renderer {
    fn update(&mut self, frame: &Frame<'_>) -> io::Result<()>;
}

/// Pieces that can be captured, in display order.
const CAPTURABLE: [Piece; 5] = [Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen];
const INITIAL_COUNT: [u32; 5] = [8, 2, 2, 2, 1];

/// Material missing from each side relative to the starting position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapturedPieces {
    /// White pieces no longer on the board, indexed like `CAPTURABLE`
    pub white_lost: [u32; 5],
    pub black_lost: [u32; 5],
}

impl CapturedPieces {
    pub fn from_board(board: &Board) -> Self {
        let mut captured = Self::default();
        for (i, &piece) in CAPTURABLE.iter().enumerate() {
            let white = (board.pieces(piece) & board.colors(Color::White)).len();
            let black = (board.pieces(piece) & board.colors(Color::Black)).len();
            captured.white_lost[i] = INITIAL_COUNT[i].saturating_sub(white);
            captured.black_lost[i] = INITIAL_COUNT[i].saturating_sub(black);
        }
        captured
    }

    /// Opponent pieces taken by `color`.
    pub fn taken_by(&self, color: Color) -> [u32; 5] {
        match color {
            Color::White => self.black_lost,
            Color::Black => self.white_lost,
        }
    }

    pub fn total_taken_by(&self, color: Color) -> u32 {
        self.taken_by(color).iter().sum()
    }

    /// e.g. `p:2 n:1`, lowercase for Black's pieces and uppercase for White's
    pub fn summary(&self, color: Color) -> String {
        let victims = match color {
            Color::White => Color::Black,
            Color::Black => Color::White,
        };
        self.taken_by(color)
            .iter()
            .zip(CAPTURABLE)
            .filter(|&(&n, _)| n > 0)
            .map(|(n, piece)| format!("{}:{}", piece_char(piece, victims), n))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub fn piece_char(piece: Piece, color: Color) -> char {
    let c = match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    };
    match color {
        Color::White => c.to_ascii_uppercase(),
        Color::Black => c,
    }
}

/// Format a duration as `M:SS`, with tenths under ten seconds.
pub fn format_time(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let mins = total_secs / 60;
    let secs = total_secs % 60;

    if duration.as_millis() < 10_000 {
        let tenths = (duration.as_millis() % 1000) / 100;
        format!("{}:{:02}.{}", mins, secs, tenths)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

/// ASCII board, rank 8 at the top. Last-move squares are bracketed.
pub fn board_diagram(board: &Board, last_move: Option<(Square, Square)>) -> String {
    let mut out = String::from("    a  b  c  d  e  f  g  h\n");
    for rank in (0..8).rev() {
        out.push_str(&format!(" {} ", rank + 1));
        for file in 0..8 {
            let sq = Square::index(rank * 8 + file);
            let symbol = match (board.piece_on(sq), board.color_on(sq)) {
                (Some(piece), Some(color)) => piece_char(piece, color),
                _ => '.',
            };
            let marked = last_move.is_some_and(|(from, to)| sq == from || sq == to);
            if marked {
                out.push_str(&format!("[{symbol}]"));
            } else {
                out.push_str(&format!(" {symbol} "));
            }
        }
        out.push_str(&format!(" {}\n", rank + 1));
    }
    out.push_str("    a  b  c  d  e  f  g  h\n");
    out
}

/// Redraws the whole screen on every update.
pub struct TerminalRenderer<W: Write> {
    out: W,
    clear_screen: bool,
    /// History lines shown at most
    history_len: usize,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout(), true)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, clear_screen: bool) -> Self {
        Self {
            out,
            clear_screen,
            history_len: 12,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn agent_panel(&self, frame: &Frame<'_>, captured: &CapturedPieces, seat: Seat) -> String {
        let color = frame.seating.color_of(seat);
        let opponent = match color {
            Color::White => "Black",
            Color::Black => "White",
        };
        format!(
            "{seat} Agent ({}): {}\n  Captured pieces: {}  {opponent} pieces captured: {}\n",
            chess_core::color_name(color),
            frame.status_of(seat),
            captured.total_taken_by(color),
            captured.summary(color),
        )
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn update(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        let captured = CapturedPieces::from_board(frame.board);
        let mut screen = String::new();

        if self.clear_screen {
            screen.push_str("\x1b[2J\x1b[H");
        }
        screen.push_str("=== Chess: RL vs LLM ===\n\n");
        screen.push_str(&board_diagram(frame.board, frame.last_move));
        screen.push('\n');
        screen.push_str(&self.agent_panel(frame, &captured, frame.seating.white));
        screen.push_str(&self.agent_panel(frame, &captured, frame.seating.black()));
        screen.push_str(&format!("\nGame time: {}\n", format_time(frame.elapsed)));

        if !frame.history.is_empty() {
            screen.push_str("Move history:\n");
            let skip = frame.history.len().saturating_sub(self.history_len);
            for (i, entry) in frame.history.iter().enumerate().skip(skip) {
                screen.push_str(&format!("  {}. {}\n", i + 1, entry));
            }
        }
        screen.push_str("(q + Enter to quit)\n");

        self.out.write_all(screen.as_bytes())?;
        self.out.flush()
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
