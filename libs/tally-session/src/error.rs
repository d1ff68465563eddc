//! Error types for tally-session

use tally_engine::EngineError;
use tally_store::StoreError;
use thiserror::Error;

/// Session-level failures surfaced to the front-ends.
///
/// All of these are recoverable: the buffer is reset, the failure is
/// journaled, and the session keeps running.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Unparsable numeric text
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Evaluate requested with an incomplete buffer
    #[error("incomplete entry: two operands and an operator are required")]
    IncompleteEntry,

    /// Arithmetic precondition violation (division by zero)
    #[error("calculation error: {0}")]
    Engine(#[from] EngineError),

    /// The persistence gateway failed
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
