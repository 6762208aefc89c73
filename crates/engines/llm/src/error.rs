use thiserror::Error;

/// Failure to get a completion out of a text generator.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("generator returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed completion response: {0}")]
    Response(String),

    #[error("no time left for generation")]
    OutOfTime,

    #[error("{0}")]
    Other(String),
}
