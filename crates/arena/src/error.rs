use std::path::PathBuf;
use thiserror::Error;

use chess_core::ChessError;
use rl_engine::RlError;

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to write game report: {0}")]
    Report(#[from] serde_json::Error),

    #[error("failed to draw: {0}")]
    Render(#[source] std::io::Error),

    #[error(transparent)]
    Chess(#[from] ChessError),

    #[error(transparent)]
    Rl(#[from] RlError),
}
