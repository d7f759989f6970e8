use thiserror::Error;

/// Errors produced while enriching item records.
///
/// "No grammar matched" is deliberately not represented here: an unexplained
/// description is a normal outcome and the resolver models it as `None`.
/// Likewise a missing or non-numeric price source is recovered with a
/// documented default, never an error.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A calculator produced a price that cannot be represented as a JSON
    /// number, e.g. a division by a zero quantity.
    #[error("non-finite price computed for `{field}`")]
    NonFinitePrice { field: &'static str },

    /// A worker task was cancelled or panicked; the payload is the join
    /// error rendered as text.
    #[error("worker task failed: {0}")]
    Task(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
