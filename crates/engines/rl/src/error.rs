use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RlError {
    #[error("model not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read policy from {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize policy: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("ONNX policy error: {0}")]
    Onnx(String),
}
