use thiserror::Error;

/// Errors raised while reading positions or moves from text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error("invalid FEN `{fen}`: {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("malformed UCI move `{0}`")]
    MalformedUci(String),

    #[error("illegal move `{uci}` in position {fen}")]
    IllegalMove { uci: String, fen: String },
}
