//! Errors that abort a query before any engine is called.
//!
//! Everything that goes wrong after planning (engine failures, timeouts, storage trouble) is
//! absorbed into failed step results instead and never surfaces here.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("Invalid query request: {0}")]
    InvalidRequest(String),

    /// The registry lists an engine for a dictionary or language but cannot resolve its handle.
    #[error("Unknown search engine: {0}")]
    UnknownEngine(String),
}
