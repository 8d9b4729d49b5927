use thiserror::Error;

/// Errors surfaced by the driver layer.
///
/// Logical and mode failures never reach this type -- they are just a
/// `Solved::Done` from the goal stream, recovered silently by whatever
/// combinator encloses them. `EngineError` exists only for the two
/// classes spec'd as fatal: a built-in handed a term of the wrong
/// shape, and a debug-only contract violation detected on a stream's
/// `close` path.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum EngineError {
    #[error("type error: expected {expected}, found {found}")]
    TypeError {
        expected: &'static str,
        found: String,
    },

    #[error("stream contract violation: {0}")]
    ContractViolation(String),
}
