//! Errors raised while loading inputs or running the bootstrapping loop.
//!
//! Every error aborts the run: iterations depend on the state left by the previous one, so
//! there is nothing sensible to resume from.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BootstrapError {
    /// A context record that does not have the `<noun phrase> * ... <pattern>` shape.
    #[error("malformed context record on line {line}: {message}")]
    MalformedInput { line: usize, message: String },

    /// The engine reached a state the loop should never produce.
    #[error("invalid engine state: {0}")]
    InvalidState(String),

    /// Inputs unreadable or trace output unwritable.
    #[error("resource error: {0}")]
    Resource(#[from] std::io::Error),

    #[error("trace serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl BootstrapError {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        BootstrapError::MalformedInput {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BootstrapError>;
