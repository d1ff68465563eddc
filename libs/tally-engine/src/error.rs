//! Error types for tally-engine

use thiserror::Error;

/// Arithmetic errors
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// The divisor was exactly zero
    #[error("division by zero")]
    DivisionByZero,
}

pub type Result<T> = std::result::Result<T, EngineError>;
