use thiserror::Error;

/// Errors raised by the transcript formatters.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormatError {
    #[error("malformed word #{index} ({word:?}): {reason}")]
    MalformedEntry {
        index: usize,
        word: String,
        reason: String,
    },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Failures while decoding a transcription server response.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// The server answered with an `error` field; the text is shown as-is.
    #[error("Error: {0}")]
    Server(String),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}
