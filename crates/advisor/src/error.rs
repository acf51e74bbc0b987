//! Error types for the advisory service.

use thiserror::Error;

/// Every way a request to the advisory service can fail. None of these is
/// fatal: the caller falls back to the search engine.
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("No API credential configured for the advisory service")]
    MissingCredential,

    #[error("No legal moves to choose from")]
    NoLegalMoves,

    #[error("Advisory request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Advisory transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Advisory service answered with HTTP status {0}")]
    Status(u16),

    #[error("Malformed advisory response: {0}")]
    MalformedResponse(String),

    #[error("Advisor proposed a move that is not legal here: {0:?}")]
    UnknownMove(String),

    #[error("Advisor proposal {0:?} matches more than one legal move")]
    AmbiguousMove(String),
}

pub type AdvisorResult<T> = Result<T, AdvisorError>;
